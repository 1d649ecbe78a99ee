pub mod config;
pub mod controller;
pub mod controls;
pub mod debounce;
pub mod history;
pub mod input;
pub mod picker;
pub mod sync;

pub use config::{ConfigError, EditorConfig, HostConfiguration};
pub use controller::MoleculeEditor;
pub use controls::{Zoom, atom_handle_cursor, bond_handle_cursor, canvas_cursor};
pub use debounce::Debouncer;
pub use history::History;
pub use input::{InputError, PointerEvent, PointerEventKind};
pub use picker::{ElementPicker, PickError, PickRequest};
pub use sync::{HostChannel, StateSync, SubmitError, parse_snapshot, serialize_snapshot};
