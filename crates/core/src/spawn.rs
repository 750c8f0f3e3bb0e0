//! Placement generator - where and what the next tile is
//!
//! Cells are drawn uniformly by rejection sampling (row and column drawn
//! independently, redrawn while occupied). Values are 2 with probability 8/9
//! and 4 with probability 1/9.

use thiserror::Error;

use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::tile::{Tile, TileId};
use crate::types::{CellKey, Geometry, GRID_COLS, GRID_ROWS, SPAWN_DRAW_SIDES, SPAWN_TWO_MAX_DRAW};

/// Rejection draws before falling back to an explicit pick among free cells.
const MAX_REJECTIONS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("no free cell left on the grid")]
    BoardFull,
}

#[derive(Debug, Clone)]
pub struct PlacementGenerator {
    rng: SimpleRng,
}

impl PlacementGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Current RNG state (for restarting with the same stream)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// Pick a uniformly random unoccupied cell.
    pub fn random_cell(&mut self, grid: &Grid) -> Result<CellKey, SpawnError> {
        if grid.is_full() {
            return Err(SpawnError::BoardFull);
        }

        for _ in 0..MAX_REJECTIONS {
            let row = self.rng.next_range(GRID_ROWS as u32) as u8;
            let col = self.rng.next_range(GRID_COLS as u32) as u8;
            let key = CellKey::new(row, col);
            if !grid.is_occupied(key) {
                return Ok(key);
            }
        }

        // Nearly full board: pick among the free cells directly.
        let free = grid.free_cells() as u32;
        let nth = self.rng.next_range(free) as usize;
        CellKey::all()
            .filter(|key| !grid.is_occupied(*key))
            .nth(nth)
            .ok_or(SpawnError::BoardFull)
    }

    /// 2 for draws 1..=8, 4 for a draw of 9
    pub fn random_value(&mut self) -> u32 {
        if self.rng.next_inclusive(1, SPAWN_DRAW_SIDES) <= SPAWN_TWO_MAX_DRAW {
            2
        } else {
            4
        }
    }

    /// Place a new tile on the grid and return a copy of it.
    pub fn place(
        &mut self,
        grid: &mut Grid,
        id: TileId,
        geometry: &Geometry,
    ) -> Result<Tile, SpawnError> {
        let key = self.random_cell(grid)?;
        let value = self.random_value();
        let tile = Tile::new(id, value, key, geometry);
        if !grid.insert(tile) {
            return Err(SpawnError::BoardFull);
        }
        Ok(tile)
    }
}
