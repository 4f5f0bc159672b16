//! Terminal "editor renderer" module.
//!
//! This is a small rendering layer for the grid editor. It avoids widget and
//! layout libraries and instead renders into a simple framebuffer that can be
//! flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` and `engine` deterministic and testable
//! - Own the terminal layout, so hit testing and drawing share one geometry
//! - Keep grid cells square in pixel space (6 columns x 3 rows per cell)

pub mod editor_view;
pub mod fb;
pub mod render_throttle;
pub mod renderer;

pub use grid_sandbox_core as core;
pub use grid_sandbox_engine as engine;
pub use grid_sandbox_types as types;

pub use editor_view::{EditorView, Layout, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
