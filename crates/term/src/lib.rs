//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the board is drawn into a plain
//! framebuffer which is then diffed and flushed to the terminal. No widget
//! toolkit is involved.

pub mod fb;
pub mod frontend;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_engine as engine;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use frontend::{TermFrontend, TerminalSize, ViewportSource};
pub use game_view::{tile_color, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
