//! Bounded undo/redo history over an immutable value.
//!
//! `commit` records the previous value; `replace` swaps the value without
//! leaving an undo step (used when loading state from the host).

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct History<T> {
    current: T,
    undo_stack: VecDeque<T>,
    redo_stack: Vec<T>,
    /// Maximum undo depth; the oldest entries are evicted first.
    capacity: usize,
}

impl<T> History<T> {
    pub fn new(initial: T, capacity: usize) -> Self {
        Self {
            current: initial,
            undo_stack: VecDeque::with_capacity(capacity.min(64)),
            redo_stack: Vec::new(),
            capacity,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    /// Make `next` current and record the previous value. Clears redo.
    pub fn commit(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.current, next);
        self.undo_stack.push_back(previous);
        while self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Make `next` current without touching either stack.
    pub fn replace(&mut self, next: T) {
        self.current = next;
    }

    /// Step back. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(undone);
        true
    }

    /// Step forward. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let redone = std::mem::replace(&mut self.current, next);
        self.undo_stack.push_back(redone);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_undo_redo() {
        let mut h = History::new(0, 10);
        h.commit(1);
        h.commit(2);
        assert_eq!(*h.current(), 2);
        assert!(h.undo());
        assert_eq!(*h.current(), 1);
        assert!(h.redo());
        assert_eq!(*h.current(), 2);
        assert!(!h.redo());
    }

    #[test]
    fn commit_clears_redo() {
        let mut h = History::new("a", 10);
        h.commit("b");
        h.undo();
        assert!(h.can_redo());
        h.commit("c");
        assert!(!h.can_redo());
        assert_eq!(h.undo_depth(), 1);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut h = History::new(0, 3);
        for i in 1..=5 {
            h.commit(i);
        }
        assert_eq!(h.undo_depth(), 3);
        while h.undo() {}
        assert_eq!(*h.current(), 2);
    }

    #[test]
    fn replace_leaves_no_trace() {
        let mut h = History::new(0, 3);
        h.replace(7);
        assert_eq!(*h.current(), 7);
        assert!(!h.can_undo());
        assert!(!h.undo());
    }
}
