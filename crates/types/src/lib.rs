//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, making them usable in any context
//! (move resolution, terminal rendering, the headless driver).
//!
//! # Grid Dimensions
//!
//! The playfield is a fixed 4x4 grid:
//!
//! - **Rows**: 4 (indexed 0-3, top to bottom)
//! - **Columns**: 4 (indexed 0-3, left to right)
//! - **Capacity**: 16 tiles
//!
//! # Animation Constants
//!
//! Positions are expressed in abstract pixel units over a virtual window:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `WINDOW_WIDTH` | 800 | Virtual window width |
//! | `WINDOW_HEIGHT` | 800 | Virtual window height |
//! | `MOVE_SPEED` | 40 | Per-frame tile displacement while sliding |
//! | `FPS` | 60 | Target frame rate for idle and animation loops |
//!
//! A cell is `WINDOW_WIDTH / GRID_COLS` wide and `WINDOW_HEIGHT / GRID_ROWS` tall,
//! so a tile needs `200 / 40 = 5` frames to cross one cell.
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{CellKey, Direction, GameAction, GRID_CAPACITY};
//!
//! // Parse a direction (case-insensitive)
//! let dir = Direction::from_str("Left").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert_eq!(dir.opposite(), Direction::Right);
//!
//! // Composite cell key
//! let key = CellKey::new(1, 3);
//! assert_eq!(key.index(), 7);
//!
//! assert_eq!(GameAction::Move(Direction::Up).as_str(), "up");
//! assert_eq!(GRID_CAPACITY, 16);
//! ```

pub mod config;

pub use config::{ConfigError, GameConfig};

/// Grid height in cells (4 rows)
pub const GRID_ROWS: u8 = 4;

/// Grid width in cells (4 columns)
pub const GRID_COLS: u8 = 4;

/// Maximum number of live tiles
pub const GRID_CAPACITY: usize = (GRID_ROWS as usize) * (GRID_COLS as usize);

/// Virtual window width in pixel units
pub const WINDOW_WIDTH: i32 = 800;

/// Virtual window height in pixel units
pub const WINDOW_HEIGHT: i32 = 800;

/// Per-frame displacement of a sliding tile
pub const MOVE_SPEED: i32 = 40;

/// Target frame rate
pub const FPS: u32 = 60;

/// Number of tiles placed when a game starts
pub const STARTING_TILES: usize = 2;

/// Spawn value draw: uniform over `1..=SPAWN_DRAW_SIDES`
pub const SPAWN_DRAW_SIDES: u32 = 9;

/// Draws up to this value spawn a 2, higher draws spawn a 4 (8/9 vs 1/9)
pub const SPAWN_TWO_MAX_DRAW: u32 = 8;

/// Discrete grid coordinate.
///
/// Replaces digit-concatenated string keys with a proper two-field key, so
/// `(1, 11)` and `(11, 1)` can never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CellKey {
    pub row: u8,
    pub col: u8,
}

impl CellKey {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// True when the key addresses a cell inside the grid
    pub fn in_bounds(&self) -> bool {
        self.row < GRID_ROWS && self.col < GRID_COLS
    }

    /// Row-major flat index (`row * GRID_COLS + col`)
    #[inline(always)]
    pub fn index(&self) -> usize {
        (self.row as usize) * (GRID_COLS as usize) + (self.col as usize)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= GRID_CAPACITY {
            return None;
        }
        Some(Self {
            row: (index / GRID_COLS as usize) as u8,
            col: (index % GRID_COLS as usize) as u8,
        })
    }

    /// Neighbouring key, or `None` if it would leave the grid
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i16 + d_row as i16;
        let col = self.col as i16 + d_col as i16;
        if row < 0 || col < 0 || row >= GRID_ROWS as i16 || col >= GRID_COLS as i16 {
            return None;
        }
        Some(Self::new(row as u8, col as u8))
    }

    /// Iterate every key of the grid in row-major order
    pub fn all() -> impl Iterator<Item = CellKey> {
        (0..GRID_CAPACITY).filter_map(CellKey::from_index)
    }
}

/// The four slide directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("down"), Some(Direction::Down));
    /// assert_eq!(Direction::from_str("RIGHT"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("north"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Player actions produced by an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Slide every tile toward one edge
    Move(Direction),
    /// Throw the current board away and start over
    Restart,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Move(dir) => dir.as_str(),
            GameAction::Restart => "restart",
        }
    }
}

/// Pixel-space measurements shared by the resolver and renderers.
///
/// Derived from a [`GameConfig`]; see [`GameConfig::geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    pub cell_width: i32,
    pub cell_height: i32,
    /// Per-frame displacement magnitude
    pub step: i32,
}

impl Geometry {
    /// Top-left pixel position of a cell
    pub fn origin_of(&self, key: CellKey) -> (i32, i32) {
        (
            key.col as i32 * self.cell_width,
            key.row as i32 * self.cell_height,
        )
    }

    /// Frames a tile needs to cross the larger cell extent
    pub fn frames_per_cell(&self) -> u32 {
        (self.cell_width.max(self.cell_height) / self.step.max(1)) as u32
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            cell_width: WINDOW_WIDTH / GRID_COLS as i32,
            cell_height: WINDOW_HEIGHT / GRID_ROWS as i32,
            step: MOVE_SPEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants() {
        assert_eq!(GRID_ROWS, 4);
        assert_eq!(GRID_COLS, 4);
        assert_eq!(GRID_CAPACITY, 16);
        assert_eq!(MOVE_SPEED, 40);
        assert_eq!(FPS, 60);
        assert_eq!(WINDOW_WIDTH / GRID_COLS as i32, 200);
        assert_eq!(WINDOW_HEIGHT / GRID_ROWS as i32, 200);
    }

    #[test]
    fn cell_key_index_is_row_major() {
        assert_eq!(CellKey::new(0, 0).index(), 0);
        assert_eq!(CellKey::new(0, 3).index(), 3);
        assert_eq!(CellKey::new(3, 0).index(), 12);
        assert_eq!(CellKey::from_index(13), Some(CellKey::new(3, 1)));
        assert_eq!(CellKey::from_index(16), None);
    }

    #[test]
    fn cell_key_offset_stays_in_bounds() {
        let corner = CellKey::new(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Some(CellKey::new(1, 1)));
        assert_eq!(CellKey::new(3, 3).offset(0, 1), None);
    }

    #[test]
    fn direction_round_trips_through_str() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Direction::from_str("sideways"), None);
    }
}
