//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::EditorAction`] and left-button
//! mouse events into pixel-space [`crate::types::PointerEvent`]s.

pub mod map;

pub use grid_sandbox_types as types;

pub use map::{cell_center, handle_key_event, mouse_to_pointer, should_quit};
