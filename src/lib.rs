//! TUI 2048 (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_2048::{core,engine,input,term,types}`
//! and hosts the pieces that only the binary needs: the headless driver and
//! logging setup.

pub use tui_2048_core as core;
pub use tui_2048_engine as engine;
pub use tui_2048_input as input;
pub use tui_2048_term as term;
pub use tui_2048_types as types;

pub mod headless;
pub mod logger;
