//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the grid, the sliding/merging rules and the round
//! lifecycle. It has **zero dependencies** on terminals, clocks or I/O, which
//! makes it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is exercised without a renderer
//! - **Allocation-free**: Tiles live in fixed-capacity arrays
//!
//! # Module Structure
//!
//! - [`grid`]: 4x4 cell-key → tile mapping
//! - [`tile`]: tile value, claimed cell and sliding pixel position
//! - [`direction`]: per-direction policy table (order, step, edge, neighbour, rounding)
//! - [`resolver`]: frame-by-frame move state machine (`Animating` → `Settled`)
//! - [`spawn`]: random placement of new tiles
//! - [`rng`]: seedable LCG
//! - [`game_state`]: round rules (settle, lose on a full board, spawn)
//! - [`snapshot`]: read-only view handed to renderers
//!
//! # Move Rules
//!
//! - Tiles slide `MOVE_SPEED` units per frame toward the requested edge
//! - The tile nearest the edge is evaluated first each frame
//! - Equal neighbours merge when the mover is within one step of its target
//! - A tile takes part in at most one merge per move (no 2+2+4 → 8)
//! - A move settles on the first frame in which nothing moved
//!
//! # Example
//!
//! ```
//! use tui_2048_core::GameState;
//! use tui_2048_core::types::{Direction, GameConfig};
//!
//! let config = GameConfig { seed: 12345, ..GameConfig::default() };
//! let mut game = GameState::from_layout(config, [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
//!
//! let report = game.play_move(Direction::Left).unwrap();
//! assert_eq!(report.merges, 1);
//! assert_eq!(game.grid().values()[0][0], 4);
//! assert_eq!(game.grid().len(), 2); // merged tile + one spawn
//! ```

pub mod direction;
pub mod game_state;
pub mod grid;
pub mod resolver;
pub mod rng;
pub mod snapshot;
pub mod spawn;
pub mod tile;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use direction::{Axis, DirectionPolicy};
pub use game_state::{GameState, GameStatus, MoveSession, RoundOutcome, RoundReport};
pub use grid::{Grid, Layout};
pub use resolver::{MoveResolver, ResolverState};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, TileSnapshot};
pub use spawn::{PlacementGenerator, SpawnError};
pub use tile::{Rounding, Tile, TileId};
