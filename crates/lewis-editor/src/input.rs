//! Pointer input normalization.
//!
//! DOM pointer and mouse events arrive as a type string plus a canvas
//! position; the state machine only distinguishes four kinds.

use lewis_core::Vector2;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Move,
    Down,
    Up,
    Click,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unexpected editor canvas pointer event: {0}")]
    UnknownEventType(String),
}

impl FromStr for PointerEventKind {
    type Err = InputError;

    /// Accepts the DOM event `type` string.
    fn from_str(dom_type: &str) -> Result<Self, Self::Err> {
        match dom_type {
            "pointermove" | "mousemove" => Ok(Self::Move),
            "pointerdown" | "mousedown" => Ok(Self::Down),
            "pointerup" | "mouseup" => Ok(Self::Up),
            "click" => Ok(Self::Click),
            other => Err(InputError::UnknownEventType(other.to_string())),
        }
    }
}

/// A classified pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Vector2,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Vector2) -> Self {
        Self { kind, position }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, Vector2::new(x, y))
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, Vector2::new(x, y))
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, Vector2::new(x, y))
    }

    pub fn click(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Click, Vector2::new(x, y))
    }

    /// Classify a DOM event by its `type` string.
    pub fn from_dom(dom_type: &str, x: f64, y: f64) -> Result<Self, InputError> {
        Ok(Self::new(dom_type.parse()?, Vector2::new(x, y)))
    }
}

/// Map a client-space point into canvas space for the given zoom scale
/// and canvas origin.
pub fn client_to_canvas(client: Vector2, origin: Vector2, scale: f64) -> Vector2 {
    if scale <= 0.0 || !scale.is_finite() {
        return client - origin;
    }
    (client - origin) * (1.0 / scale)
}
