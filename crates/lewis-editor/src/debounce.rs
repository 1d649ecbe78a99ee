//! Trailing-edge debounce driven by host-supplied timestamps.
//!
//! The host owns the clock: it pushes values with the current time and
//! polls on every animation frame. No timers live inside the editor.

/// Milliseconds, as reported by `performance.now()` on the host.
pub type Millis = f64;

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_ms: Millis,
    pending: Option<(T, Millis)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_ms: Millis) -> Self {
        Self {
            quiet_ms,
            pending: None,
        }
    }

    /// Schedule `value`, replacing any pending one and restarting the
    /// quiet period.
    pub fn push(&mut self, value: T, now: Millis) {
        self.pending = Some((value, now + self.quiet_ms));
    }

    /// Take the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Millis) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Take the pending value regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            log::trace!("debounce: pending value dropped");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_quiet_period_with_latest_value() {
        let mut debounce = Debouncer::new(1000.0);
        debounce.push("a", 0.0);
        debounce.push("b", 500.0);
        assert_eq!(debounce.poll(1200.0), None);
        assert_eq!(debounce.poll(1500.0), Some("b"));
        assert!(!debounce.is_pending());
        assert_eq!(debounce.poll(3000.0), None);
    }

    #[test]
    fn cancel_and_flush() {
        let mut debounce = Debouncer::new(1000.0);
        debounce.push(1, 0.0);
        debounce.cancel_pending();
        assert_eq!(debounce.poll(5000.0), None);

        debounce.push(2, 0.0);
        assert_eq!(debounce.flush(), Some(2));
        assert_eq!(debounce.flush(), None);
    }
}
