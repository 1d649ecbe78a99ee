pub mod element;
pub mod geometry;
pub mod graph;
pub mod id;
pub mod model;
pub mod state;

pub use element::{Block, Element, ElementNumber, Locale, QUICK_PICK, lookup_element};
pub use geometry::{Vector2, angle};
pub use graph::{MoleculeGraph, build_graph};
pub use id::{AtomId, BondId, ItemId, ItemKind};
pub use model::*;
pub use state::{EditorState, ToolMode};
