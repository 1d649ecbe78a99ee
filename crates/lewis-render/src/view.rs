//! Model + graph + editor state → renderable view.
//!
//! The view is recomputed from scratch after every change. It carries the
//! committed atoms and bonds with their live positions and selection
//! flags, plus the temporary ghost items of an operation in progress.

use crate::glyphs::{Glyphs, place_electrons};
use lewis_core::{
    AtomId, AtomRecord, BondId, BondMultiplicity, EditorState, ElementNumber, MoleculeGraph,
    MoleculeModel, Vector2,
};
use serde::Serialize;
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomView {
    pub item_id: AtomId,
    pub element: ElementNumber,
    pub symbol: &'static str,
    pub position: Vector2,
    pub electrons: Glyphs,
    pub selected: bool,
    pub targeted: bool,
    pub temporary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BondView {
    pub item_id: BondId,
    pub multiplicity: BondMultiplicity,
    pub left_position: Vector2,
    pub right_position: Vector2,
    pub selected: bool,
    pub temporary: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MoleculeView {
    pub atoms: Vec<AtomView>,
    pub bonds: Vec<BondView>,
}

impl MoleculeView {
    pub fn atom(&self, id: AtomId) -> Option<&AtomView> {
        self.atoms.iter().find(|a| a.item_id == id)
    }

    pub fn bond(&self, id: BondId) -> Option<&BondView> {
        self.bonds.iter().find(|b| b.item_id == id)
    }
}

pub fn derive_view(
    model: &MoleculeModel,
    graph: &MoleculeGraph,
    state: &EditorState,
) -> MoleculeView {
    let mut view = MoleculeView {
        atoms: Vec::with_capacity(model.atoms.len() + 1),
        bonds: Vec::with_capacity(model.bonds.len() + 1),
    };
    render_model_atoms(model, graph, state, &mut view.atoms);
    render_model_bonds(model, state, &mut view.bonds);
    render_ghosts(model, graph, state, &mut view);
    view
}

fn live_position(model: &MoleculeModel, state: &EditorState, atom: AtomId) -> Option<Vector2> {
    model.atom(atom).map(|a| state.live_position(atom, a.position))
}

/// Electron glyphs for `record` drawn at `center`, avoiding the sides
/// its bonds leave from.
fn atom_glyphs(
    model: &MoleculeModel,
    graph: &MoleculeGraph,
    state: &EditorState,
    record: &AtomRecord,
    center: Vector2,
) -> Glyphs {
    let directions: SmallVec<[Vector2; 4]> = graph
        .neighbors(record.id)
        .into_iter()
        .filter_map(|(_, other)| live_position(model, state, other))
        .map(|p| p - center)
        .collect();
    place_electrons(record.electron_count, &directions)
}

// ─── Committed items ─────────────────────────────────────────────────────

fn render_model_atoms(
    model: &MoleculeModel,
    graph: &MoleculeGraph,
    state: &EditorState,
    atoms: &mut Vec<AtomView>,
) {
    for record in model.atoms.values() {
        // Drawn as a ghost at the drop target instead
        if state.is_moving(record.id) {
            continue;
        }
        atoms.push(AtomView {
            item_id: record.id,
            element: record.element,
            symbol: record.element.symbol(),
            position: record.position,
            electrons: atom_glyphs(model, graph, state, record, record.position),
            selected: state.is_selected(record.id.item()),
            targeted: state.is_targeted(record.id),
            temporary: false,
        });
    }
}

fn render_model_bonds(model: &MoleculeModel, state: &EditorState, bonds: &mut Vec<BondView>) {
    for bond in model.bonds.values() {
        let (Some(left), Some(right)) = (
            live_position(model, state, bond.left),
            live_position(model, state, bond.right),
        ) else {
            log::warn!("view: bond {} references a missing atom", bond.id);
            continue;
        };
        bonds.push(BondView {
            item_id: bond.id,
            multiplicity: bond.multiplicity,
            left_position: left,
            right_position: right,
            selected: state.is_selected(bond.id.item()),
            temporary: state.is_moving(bond.left) || state.is_moving(bond.right),
        });
    }
}

// ─── Ghosts ──────────────────────────────────────────────────────────────

fn ghost_atom(
    item_id: AtomId,
    element: ElementNumber,
    position: Vector2,
    electrons: Glyphs,
) -> AtomView {
    AtomView {
        item_id,
        element,
        symbol: element.symbol(),
        position,
        electrons,
        selected: false,
        targeted: false,
        temporary: true,
    }
}

fn render_ghosts(
    model: &MoleculeModel,
    graph: &MoleculeGraph,
    state: &EditorState,
    view: &mut MoleculeView,
) {
    match state {
        EditorState::Idle | EditorState::Selected(_) | EditorState::PreMoveAtom(_) => {}
        EditorState::AddingAtom { element, hover } => {
            view.atoms
                .push(ghost_atom(AtomId::add_preview(), *element, *hover, Glyphs::new()));
        }
        EditorState::MovingAtom { id, target } => {
            let Some(record) = model.atom(*id) else {
                log::warn!("view: moving unknown atom {id}");
                return;
            };
            let glyphs = atom_glyphs(model, graph, state, record, *target);
            view.atoms
                .push(ghost_atom(AtomId::move_preview(), record.element, *target, glyphs));
        }
        EditorState::MovingGroup { items, .. } => {
            for item in items {
                let Some(record) = model.atom(AtomId::from_item(*item)) else {
                    // Bond members follow their endpoints
                    continue;
                };
                let position = state.live_position(record.id, record.position);
                let glyphs = atom_glyphs(model, graph, state, record, position);
                view.atoms.push(ghost_atom(
                    AtomId::group_preview(record.id),
                    record.element,
                    position,
                    glyphs,
                ));
            }
        }
        EditorState::AddingBond {
            start,
            multiplicity,
            hover,
        } => {
            let Some(anchor) = model.atom(*start) else {
                log::warn!("view: bond anchored at unknown atom {start}");
                return;
            };
            view.bonds.push(BondView {
                item_id: BondId::add_preview(),
                multiplicity: *multiplicity,
                left_position: anchor.position,
                right_position: *hover,
                selected: false,
                temporary: true,
            });
        }
    }
}
