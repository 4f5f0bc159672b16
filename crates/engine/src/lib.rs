//! Editor engine: drag sessions, drop commits and the editor facade.
//!
//! Everything here is synchronous and I/O free; the terminal front end feeds
//! pointer events and actions in and reads snapshots out.

pub mod config;
pub mod drag;
pub mod editor;
pub mod place;

pub use grid_sandbox_core as core;
pub use grid_sandbox_types as types;

pub use config::EditorConfig;
pub use drag::{DragController, DragOutcome, DragSession, DragSource, DragView};
pub use editor::{Editor, PaletteSlot};
pub use place::{apply_place, PlaceError};
