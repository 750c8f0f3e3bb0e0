//! Engine module - paced, rendered rounds on top of the pure core.
//!
//! The core resolves moves frame by frame but knows nothing about time or
//! output. This crate supplies the two collaborators as traits and a
//! controller that threads them through a round:
//!
//! - [`FrameClock`]: blocks until the next frame at a target rate
//! - [`Renderer`]: draws one [`GameSnapshot`](tui_2048_core::GameSnapshot)
//! - [`RoundController`]: clock tick → resolver frame → render, until the
//!   move settles; then the end-of-round rules (lose or spawn)
//!
//! Everything runs on the caller's thread. A move, once started, runs to its
//! settle before the controller returns.

pub mod clock;
pub mod round;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use clock::{FixedRateClock, FrameClock};
pub use round::{Renderer, RoundController};
