//! Interaction controller: routes pointer events through the editor state
//! machine and commits model transitions to history.
//!
//! Pointer events arrive from three sources:
//!
//! | Source | Temporary target | Locally handled | Bubbles to canvas |
//! |--------|------------------|-----------------|-------------------|
//! | canvas | —                | all             | —                 |
//! | atom   | forwarded        | down, up, click | move              |
//! | bond   | forwarded        | click           | move, up, down    |
//!
//! A target is temporary when its id is not in the committed model (the
//! ghosts of an operation in progress). After every committed change the
//! relationship graph is rebuilt and the revision counter advances.

use crate::config::HISTORY_CAPACITY;
use crate::history::History;
use crate::input::{PointerEvent, PointerEventKind};
use crate::picker::{ElementPicker, PickRequest};
use lewis_core::{
    AtomId, BondId, BondMultiplicity, EditorState, ElementNumber, ItemId, ItemKind, MoleculeGraph,
    MoleculeModel, ToolMode, Vector2, build_graph,
};
use lewis_render::{
    BondingStyle, ExportScene, MoleculeView, RenderMetrics, build_export_scene, derive_view,
};
use std::collections::VecDeque;

/// Work scheduled for the next tick of the host event loop.
#[derive(Debug, Clone, PartialEq)]
enum Deferred {
    /// Continue after an atom was placed, according to the tool armed
    /// when the continuation runs.
    AfterAtomAdded {
        id: AtomId,
        element: ElementNumber,
        position: Vector2,
    },
}

pub struct MoleculeEditor {
    history: History<MoleculeModel>,
    graph: MoleculeGraph,
    tool: ToolMode,
    state: EditorState,
    deferred: VecDeque<Deferred>,
    picker: ElementPicker,
    /// Bumped on every change of the current model.
    revision: u64,
}

impl Default for MoleculeEditor {
    fn default() -> Self {
        Self::new(MoleculeModel::new())
    }
}

impl MoleculeEditor {
    pub fn new(model: MoleculeModel) -> Self {
        let graph = build_graph(&model);
        Self {
            history: History::new(model, HISTORY_CAPACITY),
            graph,
            tool: ToolMode::default(),
            state: EditorState::default(),
            deferred: VecDeque::new(),
            picker: ElementPicker::new(),
            revision: 0,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn model(&self) -> &MoleculeModel {
        self.history.current()
    }

    pub fn graph(&self) -> &MoleculeGraph {
        &self.graph
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_model_empty(&self) -> bool {
        self.model().is_empty()
    }

    /// Live view: committed items with their current flags plus ghosts.
    pub fn view(&self) -> MoleculeView {
        derive_view(self.model(), &self.graph, &self.state)
    }

    /// Standalone drawing of the committed model for image export.
    pub fn export_scene(&self, style: BondingStyle, metrics: &RenderMetrics) -> ExportScene {
        build_export_scene(self.model(), style, metrics)
    }

    // ─── Model commits ───────────────────────────────────────────────────

    /// Record `next` as a new history step. A model equal to the current
    /// one leaves no step behind.
    fn commit(&mut self, next: MoleculeModel) {
        if next == *self.model() {
            log::trace!("editor: commit without changes skipped");
            return;
        }
        self.history.commit(next);
        self.model_changed();
    }

    fn model_changed(&mut self) {
        self.graph = build_graph(self.model());
        self.revision += 1;
        log::debug!(
            "editor: model r{} ({} atoms, {} bonds)",
            self.revision,
            self.model().atoms.len(),
            self.model().bonds.len()
        );
    }

    /// Replace the model without recording history, e.g. when the host
    /// restores a saved state. Like [`reset`](Self::reset), this disarms
    /// the tool and closes any open element pick.
    pub fn load_model(&mut self, model: MoleculeModel) {
        self.picker.dismiss();
        self.deferred.clear();
        self.tool = ToolMode::Pointer;
        self.state = EditorState::Idle;
        self.history.replace(model);
        self.model_changed();
    }

    /// Clear the canvas as an undoable step and disarm every tool.
    pub fn reset(&mut self) {
        self.picker.dismiss();
        self.deferred.clear();
        self.tool = ToolMode::Pointer;
        self.state = EditorState::Idle;
        self.commit(MoleculeModel::new());
    }

    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        self.state = EditorState::Idle;
        self.model_changed();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        self.state = EditorState::Idle;
        self.model_changed();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn fresh_atom_id(&self) -> AtomId {
        loop {
            let id = AtomId::fresh();
            if !self.model().contains(id.item()) {
                return id;
            }
        }
    }

    fn fresh_bond_id(&self) -> BondId {
        loop {
            let id = BondId::fresh();
            if !self.model().contains(id.item()) {
                return id;
            }
        }
    }

    fn transition(&mut self, next: EditorState) {
        if next != self.state {
            log::debug!("editor: {} -> {}", self.state.name(), next.name());
        }
        self.state = next;
    }

    // ─── Tool mode ───────────────────────────────────────────────────────

    /// Arm `tool`. The editor state is re-evaluated against its value
    /// before the switch: an open bond keeps its anchor and takes the new
    /// multiplicity, a selected bond is re-typed in place, placement
    /// survives a switch to the duplicate tool, everything else returns
    /// to idle.
    pub fn set_tool_mode(&mut self, tool: ToolMode) {
        log::debug!("editor: tool {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
        let previous = std::mem::take(&mut self.state);
        let before = previous.name();

        let next = match tool {
            ToolMode::Bonding(multiplicity) => match previous {
                EditorState::AddingBond { start, hover, .. } => EditorState::AddingBond {
                    start,
                    multiplicity,
                    hover,
                },
                EditorState::Selected(item) => match self.model().kind_of(item) {
                    Some(ItemKind::Bond) => {
                        let next = self
                            .model()
                            .set_bond_multiplicity(BondId::from_item(item), multiplicity);
                        self.commit(next);
                        EditorState::Selected(item)
                    }
                    Some(ItemKind::Atom) | None => EditorState::Idle,
                },
                EditorState::Idle
                | EditorState::AddingAtom { .. }
                | EditorState::PreMoveAtom(_)
                | EditorState::MovingAtom { .. }
                | EditorState::MovingGroup { .. } => EditorState::Idle,
            },
            ToolMode::Duplicate => match previous {
                adding @ EditorState::AddingAtom { .. } => adding,
                EditorState::Idle
                | EditorState::Selected(_)
                | EditorState::PreMoveAtom(_)
                | EditorState::MovingAtom { .. }
                | EditorState::AddingBond { .. }
                | EditorState::MovingGroup { .. } => EditorState::Idle,
            },
            ToolMode::Pointer | ToolMode::GroupMove => EditorState::Idle,
        };

        if before != next.name() {
            log::debug!("editor: {before} -> {} on tool switch", next.name());
        }
        self.state = next;
    }

    // ─── Canvas events ───────────────────────────────────────────────────

    pub fn handle_canvas(&mut self, event: PointerEvent) {
        let state = std::mem::take(&mut self.state);
        let before = state.name();
        let next = match event.kind {
            PointerEventKind::Move => canvas_move(state, event.position),
            PointerEventKind::Down => state,
            PointerEventKind::Up => self.canvas_up(state),
            PointerEventKind::Click => self.canvas_click(state),
        };
        if before != next.name() {
            log::debug!("editor: {before} -> {} on canvas {:?}", next.name(), event.kind);
        }
        self.state = next;
    }

    fn canvas_up(&mut self, state: EditorState) -> EditorState {
        match state {
            EditorState::PreMoveAtom(_) => EditorState::Idle,
            EditorState::MovingAtom { id, target } => {
                let next = self.model().move_atom(id, target);
                self.commit(next);
                EditorState::Idle
            }
            EditorState::MovingGroup { start, target, items } => {
                let next = self.model().move_group(target - start, &items);
                self.commit(next);
                EditorState::Idle
            }
            state @ (EditorState::Idle
            | EditorState::Selected(_)
            | EditorState::AddingAtom { .. }
            | EditorState::AddingBond { .. }) => state,
        }
    }

    fn canvas_click(&mut self, state: EditorState) -> EditorState {
        match state {
            EditorState::Selected(_) => EditorState::Idle,
            EditorState::AddingAtom { element, hover } => {
                let id = self.fresh_atom_id();
                let next = self.model().add_atom(id, element, hover);
                self.commit(next);
                self.deferred.push_back(Deferred::AfterAtomAdded {
                    id,
                    element,
                    position: hover,
                });
                EditorState::Idle
            }
            EditorState::AddingBond { .. } => EditorState::Idle,
            state @ (EditorState::Idle
            | EditorState::PreMoveAtom(_)
            | EditorState::MovingAtom { .. }
            | EditorState::MovingGroup { .. }) => state,
        }
    }

    // ─── Atom events ─────────────────────────────────────────────────────

    pub fn handle_atom(&mut self, atom: AtomId, event: PointerEvent) {
        if self.model().atom(atom).is_none() {
            log::trace!("editor: {atom} is temporary, forwarding {:?}", event.kind);
            self.handle_canvas(event);
            return;
        }
        match event.kind {
            PointerEventKind::Move => self.handle_canvas(event),
            PointerEventKind::Down => self.atom_down(atom, event.position),
            PointerEventKind::Up => {
                if !self.try_complete_bond(atom) {
                    self.handle_canvas(event);
                }
            }
            PointerEventKind::Click => {
                if !self.try_complete_bond(atom) {
                    self.atom_click(atom, event.position);
                }
            }
        }
    }

    fn atom_down(&mut self, atom: AtomId, position: Vector2) {
        match self.tool {
            ToolMode::Pointer => self.transition(EditorState::PreMoveAtom(atom)),
            // Duplication happens on click
            ToolMode::Duplicate => {}
            ToolMode::Bonding(multiplicity) => {
                let anchored_elsewhere =
                    matches!(&self.state, EditorState::AddingBond { start, .. } if *start != atom);
                if !anchored_elsewhere {
                    self.transition(EditorState::AddingBond {
                        start: atom,
                        multiplicity,
                        hover: position,
                    });
                }
            }
            ToolMode::GroupMove => {
                let items = self.graph.find_connected_group(atom.item());
                if !items.is_empty() {
                    self.transition(EditorState::MovingGroup {
                        start: position,
                        target: position,
                        items,
                    });
                }
            }
        }
    }

    /// Commit the open bond if `atom` is a valid second endpoint. Up and
    /// click both complete a bond; whichever fires first wins and leaves
    /// the editor idle for the other.
    fn try_complete_bond(&mut self, atom: AtomId) -> bool {
        let EditorState::AddingBond {
            start, multiplicity, ..
        } = self.state
        else {
            return false;
        };
        if start == atom {
            return false;
        }
        self.complete_bond(start, atom, multiplicity);
        true
    }

    fn complete_bond(&mut self, start: AtomId, end: AtomId, multiplicity: BondMultiplicity) {
        let id = self.fresh_bond_id();
        let next = self.model().add_bond(id, start, end, multiplicity);
        self.commit(next);
        self.transition(EditorState::Idle);
    }

    fn atom_click(&mut self, atom: AtomId, position: Vector2) {
        match self.tool {
            ToolMode::Pointer => {
                let targeted = self.state.is_selected(atom.item())
                    || matches!(self.state, EditorState::PreMoveAtom(id) if id == atom);
                let next = if targeted {
                    EditorState::Idle
                } else {
                    EditorState::Selected(atom.item())
                };
                self.transition(next);
            }
            ToolMode::Duplicate => {
                let Some(record) = self.model().atom(atom) else {
                    return;
                };
                let element = record.element;
                self.transition(EditorState::AddingAtom {
                    element,
                    hover: position,
                });
            }
            ToolMode::Bonding(_) | ToolMode::GroupMove => {}
        }
    }

    // ─── Bond events ─────────────────────────────────────────────────────

    pub fn handle_bond(&mut self, bond: BondId, event: PointerEvent) {
        if self.model().bond(bond).is_none() {
            log::trace!("editor: {bond} is temporary, forwarding {:?}", event.kind);
            self.handle_canvas(event);
            return;
        }
        match event.kind {
            PointerEventKind::Move | PointerEventKind::Up | PointerEventKind::Down => {
                self.handle_canvas(event)
            }
            PointerEventKind::Click => match self.tool {
                ToolMode::Pointer => {
                    let next = if self.state.is_selected(bond.item()) {
                        EditorState::Idle
                    } else {
                        EditorState::Selected(bond.item())
                    };
                    self.transition(next);
                }
                ToolMode::Bonding(multiplicity) => {
                    let next = self.model().set_bond_multiplicity(bond, multiplicity);
                    self.commit(next);
                }
                ToolMode::Duplicate | ToolMode::GroupMove => {}
            },
        }
    }

    // ─── Deferred continuations ──────────────────────────────────────────

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Run continuations queued during the previous event. The host calls
    /// this once per tick, after the event that queued them has finished.
    pub fn run_deferred(&mut self) {
        while let Some(task) = self.deferred.pop_front() {
            match task {
                Deferred::AfterAtomAdded {
                    id,
                    element,
                    position,
                } => self.after_atom_added(id, element, position),
            }
        }
    }

    fn after_atom_added(&mut self, id: AtomId, element: ElementNumber, position: Vector2) {
        match self.tool {
            ToolMode::Pointer => {
                if self.model().atom(id).is_some() {
                    self.transition(EditorState::Selected(id.item()));
                }
            }
            ToolMode::Duplicate => self.transition(EditorState::AddingAtom {
                element,
                hover: position,
            }),
            ToolMode::Bonding(multiplicity) => {
                if self.model().atom(id).is_some() {
                    self.transition(EditorState::AddingBond {
                        start: id,
                        multiplicity,
                        hover: position,
                    });
                }
            }
            ToolMode::GroupMove => {}
        }
    }

    // ─── Element placement ───────────────────────────────────────────────

    /// Ask the host to show the element picker for a placement at
    /// `anchor`. Any earlier request is rejected as superseded.
    pub fn pick_element(&mut self, anchor: Vector2) -> PickRequest {
        self.picker.request(anchor)
    }

    /// The picker returned `element`: start placing it at the anchor of
    /// the open request.
    pub fn element_picked(&mut self, element: ElementNumber) {
        match self.picker.resolve(element) {
            Some(anchor) => self.add_element_to_canvas(element, anchor),
            None => log::debug!("editor: {element} picked without an open request"),
        }
    }

    pub fn dismiss_picker(&mut self) {
        self.picker.dismiss();
    }

    pub fn is_picking(&self) -> bool {
        self.picker.is_open()
    }

    /// Start placing `element` with its ghost at `position`.
    pub fn add_element_to_canvas(&mut self, element: ElementNumber, position: Vector2) {
        self.transition(EditorState::AddingAtom {
            element,
            hover: position,
        });
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn selected_item(&self) -> Option<ItemId> {
        self.state.selected_item()
    }

    pub fn selected_atom(&self) -> Option<AtomId> {
        let item = self.state.selected_item()?;
        let atom = AtomId::from_item(item);
        self.model().atom(atom).map(|record| record.id)
    }

    /// Free electrons the selected atom may still carry.
    pub fn selected_atom_max_electrons(&self) -> Option<u8> {
        self.selected_atom().map(|atom| self.model().max_free_electrons(atom))
    }

    pub fn can_increment_electrons(&self) -> bool {
        self.selected_atom()
            .and_then(|atom| self.model().atom(atom))
            .is_some_and(|record| {
                record.electron_count < self.model().max_free_electrons(record.id)
            })
    }

    pub fn can_decrement_electrons(&self) -> bool {
        self.selected_atom()
            .and_then(|atom| self.model().atom(atom))
            .is_some_and(|record| record.electron_count > 0)
    }

    pub fn change_selected_electrons(&mut self, delta: i32) {
        let Some(atom) = self.selected_atom() else {
            log::debug!("editor: no atom selected for electron change");
            return;
        };
        let next = self.model().change_atom_electrons(atom, delta);
        self.commit(next);
    }

    /// Delete the selected atom or bond and return to idle.
    pub fn delete_selected(&mut self) {
        let Some(item) = self.state.selected_item() else {
            return;
        };
        let next = self.model().delete_item(item);
        self.commit(next);
        self.transition(EditorState::Idle);
    }
}

fn canvas_move(state: EditorState, position: Vector2) -> EditorState {
    match state {
        EditorState::AddingAtom { element, .. } => EditorState::AddingAtom {
            element,
            hover: position,
        },
        EditorState::PreMoveAtom(id) | EditorState::MovingAtom { id, .. } => {
            EditorState::MovingAtom {
                id,
                target: position,
            }
        }
        EditorState::AddingBond {
            start, multiplicity, ..
        } => EditorState::AddingBond {
            start,
            multiplicity,
            hover: position,
        },
        EditorState::MovingGroup { start, items, .. } => EditorState::MovingGroup {
            start,
            target: position,
            items,
        },
        state @ (EditorState::Idle | EditorState::Selected(_)) => state,
    }
}
