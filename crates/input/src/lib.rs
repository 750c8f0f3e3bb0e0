//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Moves are
//! not buffered: input that arrives while a move animates is dropped with
//! [`discard_pending`].

pub mod map;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};

use std::io;
use std::time::Duration;

use crossterm::event;

/// Drain every event already queued by the terminal. Returns how many were
/// dropped.
pub fn discard_pending() -> io::Result<usize> {
    let mut dropped = 0;
    while event::poll(Duration::ZERO)? {
        event::read()?;
        dropped += 1;
    }
    Ok(dropped)
}
