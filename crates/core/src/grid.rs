//! Grid module - the 4x4 mapping from cell keys to tiles
//!
//! Tiles live in a fixed-capacity list (insertion order is the iteration
//! order) and a flat row-major index table points each occupied cell at its
//! tile. No allocation on any path.

use arrayvec::ArrayVec;

use crate::tile::Tile;
use crate::types::{CellKey, GRID_CAPACITY, GRID_COLS, GRID_ROWS};

/// Plain-value view of the grid, `0` for empty cells
pub type Layout = [[u32; GRID_COLS as usize]; GRID_ROWS as usize];

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Index into `tiles` per cell, row-major (`row * COLS + col`)
    cells: [Option<u8>; GRID_CAPACITY],
    tiles: ArrayVec<Tile, GRID_CAPACITY>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CAPACITY],
            tiles: ArrayVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() == GRID_CAPACITY
    }

    pub fn free_cells(&self) -> usize {
        GRID_CAPACITY - self.tiles.len()
    }

    /// Tile at `key`, if any (out-of-bounds keys are simply empty)
    pub fn get(&self, key: CellKey) -> Option<&Tile> {
        self.index_of(key).map(|i| &self.tiles[i])
    }

    pub fn is_occupied(&self, key: CellKey) -> bool {
        self.index_of(key).is_some()
    }

    pub(crate) fn index_of(&self, key: CellKey) -> Option<usize> {
        if !key.in_bounds() {
            return None;
        }
        self.cells[key.index()].map(usize::from)
    }

    /// Insert a tile at the cell it claims.
    /// Returns false if that cell is out of bounds or already taken.
    pub fn insert(&mut self, tile: Tile) -> bool {
        let key = tile.key();
        if !key.in_bounds() || self.cells[key.index()].is_some() {
            return false;
        }
        self.cells[key.index()] = Some(self.tiles.len() as u8);
        self.tiles.push(tile);
        true
    }

    pub fn remove(&mut self, key: CellKey) -> Option<Tile> {
        let idx = self.index_of(key)?;
        let tile = self.tiles.remove(idx);
        self.reindex();
        Some(tile)
    }

    pub fn clear(&mut self) {
        self.cells = [None; GRID_CAPACITY];
        self.tiles.clear();
    }

    /// Replace the whole content, keeping the given order.
    ///
    /// Returns how many tiles were rejected because their cell was taken.
    pub fn rebuild(&mut self, tiles: impl IntoIterator<Item = Tile>) -> usize {
        self.clear();
        tiles
            .into_iter()
            .filter(|tile| !self.insert(*tile))
            .count()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn values(&self) -> Layout {
        let mut out = [[0u32; GRID_COLS as usize]; GRID_ROWS as usize];
        for tile in &self.tiles {
            out[tile.row as usize][tile.col as usize] = tile.value;
        }
        out
    }

    pub fn total_value(&self) -> u64 {
        self.tiles.iter().map(|t| t.value as u64).sum()
    }

    pub fn max_value(&self) -> u32 {
        self.tiles.iter().map(|t| t.value).max().unwrap_or(0)
    }

    fn reindex(&mut self) {
        self.cells = [None; GRID_CAPACITY];
        for (i, tile) in self.tiles.iter().enumerate() {
            self.cells[tile.key().index()] = Some(i as u8);
        }
    }
}
