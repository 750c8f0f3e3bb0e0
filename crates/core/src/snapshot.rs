//! Snapshot module - read-only view of the board handed to renderers

use arrayvec::ArrayVec;

use crate::tile::{Tile, TileId};
use crate::types::{Geometry, GRID_CAPACITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSnapshot {
    pub id: TileId,
    pub value: u32,
    pub row: u8,
    pub col: u8,
    pub x: i32,
    pub y: i32,
}

impl From<Tile> for TileSnapshot {
    fn from(value: Tile) -> Self {
        Self {
            id: value.id,
            value: value.value,
            row: value.row,
            col: value.col,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub tiles: ArrayVec<TileSnapshot, GRID_CAPACITY>,
    pub geometry: Geometry,
    pub animating: bool,
    pub lost: bool,
    pub moves: u32,
    pub episode_id: u32,
    pub seed: u32,
    pub max_value: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.geometry = Geometry::default();
        self.animating = false;
        self.lost = false;
        self.moves = 0;
        self.episode_id = 0;
        self.seed = 0;
        self.max_value = 0;
    }

    /// Accepts moves (not lost, not mid-animation)
    pub fn playable(&self) -> bool {
        !self.lost && !self.animating
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            tiles: ArrayVec::new(),
            geometry: Geometry::default(),
            animating: false,
            lost: false,
            moves: 0,
            episode_id: 0,
            seed: 0,
            max_value: 0,
        }
    }
}
