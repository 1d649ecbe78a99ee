//! Transient interaction state: the armed tool and the current step of
//! the pointer state machine.

use crate::element::ElementNumber;
use crate::geometry::Vector2;
use crate::id::{AtomId, ItemId};
use crate::model::BondMultiplicity;

/// The currently armed tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToolMode {
    #[default]
    Pointer,
    Duplicate,
    GroupMove,
    Bonding(BondMultiplicity),
}

impl ToolMode {
    pub fn name(&self) -> &'static str {
        match self {
            ToolMode::Pointer => "pointer",
            ToolMode::Duplicate => "duplicate",
            ToolMode::GroupMove => "groupMove",
            ToolMode::Bonding(_) => "bonding",
        }
    }

    pub fn bond_multiplicity(&self) -> Option<BondMultiplicity> {
        match self {
            ToolMode::Bonding(m) => Some(*m),
            ToolMode::Pointer | ToolMode::Duplicate | ToolMode::GroupMove => None,
        }
    }
}

/// One step of the pointer interaction state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Selected(ItemId),
    AddingAtom {
        element: ElementNumber,
        hover: Vector2,
    },
    /// Pointer pressed on an atom; becomes a move once the pointer travels.
    PreMoveAtom(AtomId),
    MovingAtom {
        id: AtomId,
        target: Vector2,
    },
    AddingBond {
        start: AtomId,
        multiplicity: BondMultiplicity,
        hover: Vector2,
    },
    MovingGroup {
        start: Vector2,
        target: Vector2,
        items: Vec<ItemId>,
    },
}

impl EditorState {
    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Idle => "idle",
            EditorState::Selected(_) => "selected",
            EditorState::AddingAtom { .. } => "addingAtom",
            EditorState::PreMoveAtom(_) => "preMoveAtom",
            EditorState::MovingAtom { .. } => "movingAtom",
            EditorState::AddingBond { .. } => "addingBond",
            EditorState::MovingGroup { .. } => "movingGroup",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditorState::Idle)
    }

    pub fn is_selected(&self, item: ItemId) -> bool {
        matches!(self, EditorState::Selected(id) if *id == item)
    }

    pub fn selected_item(&self) -> Option<ItemId> {
        match self {
            EditorState::Selected(id) => Some(*id),
            _ => None,
        }
    }

    /// Atom under an active press or anchoring a bond being drawn.
    pub fn is_targeted(&self, atom: AtomId) -> bool {
        match self {
            EditorState::PreMoveAtom(id) => *id == atom,
            EditorState::AddingBond { start, .. } => *start == atom,
            _ => false,
        }
    }

    /// Whether `atom` is being dragged, alone or as part of a group.
    pub fn is_moving(&self, atom: AtomId) -> bool {
        match self {
            EditorState::MovingAtom { id, .. } => *id == atom,
            EditorState::MovingGroup { items, .. } => items.contains(&atom.item()),
            _ => false,
        }
    }

    /// Offset currently applied to a dragged group.
    pub fn group_delta(&self) -> Option<Vector2> {
        match self {
            EditorState::MovingGroup { start, target, .. } => Some(*target - *start),
            _ => None,
        }
    }

    /// Where `atom` should be drawn right now, given its committed
    /// position.
    pub fn live_position(&self, atom: AtomId, committed: Vector2) -> Vector2 {
        match self {
            EditorState::MovingAtom { id, target } if *id == atom => *target,
            EditorState::MovingGroup {
                start,
                target,
                items,
            } if items.contains(&atom.item()) => committed + (*target - *start),
            _ => committed,
        }
    }
}
