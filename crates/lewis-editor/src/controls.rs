//! Cursor hints and zoom stepping for the canvas surface.

use lewis_core::{EditorState, ToolMode};

/// CSS cursor for the empty canvas, or `None` for the default arrow.
pub fn canvas_cursor(state: &EditorState) -> Option<&'static str> {
    match state {
        EditorState::AddingAtom { .. } => Some("pointer"),
        EditorState::MovingAtom { .. } => Some("grabbing"),
        EditorState::AddingBond { .. } => Some("no-drop"),
        EditorState::Idle
        | EditorState::Selected(_)
        | EditorState::PreMoveAtom(_)
        | EditorState::MovingGroup { .. } => None,
    }
}

/// CSS cursor while hovering an atom.
pub fn atom_handle_cursor(state: &EditorState, tool: ToolMode) -> &'static str {
    match state {
        EditorState::AddingAtom { .. } | EditorState::PreMoveAtom(_) => "pointer",
        EditorState::MovingAtom { .. } => "grabbing",
        EditorState::MovingGroup { .. } => "move",
        EditorState::Idle | EditorState::Selected(_) | EditorState::AddingBond { .. } => {
            match tool {
                ToolMode::Pointer => "pointer",
                ToolMode::GroupMove => "move",
                ToolMode::Duplicate => "copy",
                ToolMode::Bonding(_) => "crosshair",
            }
        }
    }
}

/// CSS cursor while hovering a bond.
pub fn bond_handle_cursor(tool: ToolMode) -> &'static str {
    match tool {
        ToolMode::Pointer | ToolMode::Bonding(_) => "pointer",
        ToolMode::Duplicate | ToolMode::GroupMove => "not-allowed",
    }
}

// ─── Zoom ────────────────────────────────────────────────────────────────

/// Available zoom levels in percent.
pub const ZOOM_LEVELS: [u16; 7] = [25, 50, 75, 100, 125, 150, 200];

const DEFAULT_ZOOM_INDEX: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zoom {
    index: usize,
}

impl Default for Zoom {
    fn default() -> Self {
        Self {
            index: DEFAULT_ZOOM_INDEX,
        }
    }
}

impl Zoom {
    pub fn can_zoom_in(&self) -> bool {
        self.index + 1 < ZOOM_LEVELS.len()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.index > 0
    }

    pub fn zoom_in(&mut self) {
        if self.can_zoom_in() {
            self.index += 1;
        }
    }

    pub fn zoom_out(&mut self) {
        if self.can_zoom_out() {
            self.index -= 1;
        }
    }

    pub fn reset(&mut self) {
        self.index = DEFAULT_ZOOM_INDEX;
    }

    pub fn percent(&self) -> u16 {
        ZOOM_LEVELS[self.index]
    }

    /// Canvas scale factor (1.0 at 100 %).
    pub fn scale(&self) -> f64 {
        f64::from(self.percent()) / 100.0
    }
}
