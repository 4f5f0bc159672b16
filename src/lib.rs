//! Grid Sandbox (workspace facade crate).
//!
//! Re-exports the workspace crates under stable names:
//! `grid_sandbox::{core,engine,input,term,types}`. The implementation lives in
//! dedicated crates under `crates/`.

pub use grid_sandbox_core as core;
pub use grid_sandbox_engine as engine;
pub use grid_sandbox_input as input;
pub use grid_sandbox_term as term;
pub use grid_sandbox_types as types;
