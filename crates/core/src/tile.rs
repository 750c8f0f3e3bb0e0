//! Tile module - a numbered piece with a discrete cell and a sliding position
//!
//! `(row, col)` is the cell the tile claims in the [`Grid`](crate::Grid).
//! `(x, y)` is the top-left pixel position used while animating; the cell is
//! recomputed from it after every step.

use crate::types::{CellKey, Geometry, GRID_COLS, GRID_ROWS};

/// Per-game tile identity
pub type TileId = u32;

/// How a pixel position maps back onto a cell index.
///
/// Moves toward the origin round up and moves toward the far edge round down,
/// so the claimed cell only changes once the tile has fully arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    Ceil,
    Floor,
}

impl Rounding {
    /// Cell index containing `pos` for cells of size `extent`
    #[inline]
    pub fn cell(self, pos: i32, extent: i32) -> i32 {
        match self {
            Rounding::Floor => pos.div_euclid(extent),
            Rounding::Ceil => -((-pos).div_euclid(extent)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub row: u8,
    pub col: u8,
    pub x: i32,
    pub y: i32,
}

impl Tile {
    /// Create a tile resting exactly on the top-left corner of `key`
    pub fn new(id: TileId, value: u32, key: CellKey, geometry: &Geometry) -> Self {
        let (x, y) = geometry.origin_of(key);
        Self {
            id,
            value,
            row: key.row,
            col: key.col,
            x,
            y,
        }
    }

    pub fn key(&self) -> CellKey {
        CellKey::new(self.row, self.col)
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Recompute the claimed cell from the pixel position.
    ///
    /// The result is clamped to the grid.
    pub fn relocate(&mut self, geometry: &Geometry, rounding: Rounding) {
        let row = rounding.cell(self.y, geometry.cell_height);
        let col = rounding.cell(self.x, geometry.cell_width);
        self.row = row.clamp(0, GRID_ROWS as i32 - 1) as u8;
        self.col = col.clamp(0, GRID_COLS as i32 - 1) as u8;
    }

    /// True when the pixel position sits exactly on the claimed cell
    pub fn is_at_rest(&self, geometry: &Geometry) -> bool {
        geometry.origin_of(self.key()) == (self.x, self.y)
    }

    /// `log2(value)`: 1 for a 2, 2 for a 4, ...
    pub fn rank(&self) -> u32 {
        self.value.trailing_zeros()
    }
}
