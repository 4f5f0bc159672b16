//! Core editor logic module - pure, deterministic, and testable
//!
//! This module contains the pattern math, the pointer-to-grid mapping, the
//! placement rule and the grid state store. It has **zero dependencies** on
//! UI or I/O, making it:
//!
//! - **Deterministic**: the same event sequence always yields the same grid
//! - **Testable**: every rule is a plain function or a method on plain data
//! - **Portable**: can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`pattern`]: polyomino shapes, clockwise rotation, trimming
//! - [`geometry`]: pixel geometry of a drawn grid and the pointer-to-anchor mapping
//! - [`placement`]: the bounds-only placement rule (overlap is allowed)
//! - [`grid`]: pieces, walls and marks of one grid, with a change log
//! - [`palette`]: the piece templates offered for dragging, builtin or JSON
//! - [`snapshot`]: read-only view of a grid for renderers, with a fingerprint
//!
//! # Example
//!
//! ```
//! use grid_sandbox_core::{map_pointer_to_anchor, validate, GridGeometry, GridState, Pattern};
//! use grid_sandbox_core::types::{PixelPos, Rgb};
//!
//! let mut grid = GridState::new(5);
//! let square = Pattern::filled(2, 2);
//!
//! // Pointer dropped near the bottom-right corner of the grid.
//! let geometry = GridGeometry::new(PixelPos::new(0.0, 0.0), 33.0, 8.0, 5);
//! let pointer = PixelPos::new(8.0 + 4.4 * 33.0, 8.0 + 4.4 * 33.0);
//! let anchor = map_pointer_to_anchor(&geometry, pointer, 2, 2, None);
//! assert_eq!((anchor.row, anchor.col), (3, 3));
//!
//! assert!(validate(&square, anchor, grid.size()));
//! let id = grid.place_or_move(None, "O", square, Rgb::new(245, 190, 2), anchor);
//! assert_eq!(grid.occupant(4, 4).map(|p| p.id()), Some(id));
//! ```

pub mod geometry;
pub mod grid;
pub mod palette;
pub mod pattern;
pub mod placement;
pub mod snapshot;

pub use grid_sandbox_types as types;

// Re-export commonly used types for convenience
pub use geometry::{
    block_index, clamp_anchor, drag_image_origin, map_pointer_to_anchor, raw_anchor, Anchor,
    EditTarget, GridGeometry, PixelRect,
};
pub use grid::{GridChange, GridState, Piece, RotationPolicy};
pub use palette::{Palette, PaletteError, PieceTemplate, COLOR_PALETTE};
pub use pattern::{Pattern, PatternError};
pub use placement::{fits, validate};
pub use snapshot::{GridSnapshot, PieceSnapshot};
