//! Direction policies - one table row per slide direction
//!
//! Every direction-specific decision the resolver makes (processing order,
//! step vector, edge test, neighbour lookup, merge/advance distances, cell
//! rounding) is derived from three facts: the axis of travel, whether travel
//! heads toward the origin or the far edge, and the cell rounding mode. The
//! resolver itself never matches on [`Direction`].

use crate::tile::{Rounding, Tile};
use crate::types::{CellKey, Direction, Geometry, GRID_COLS, GRID_ROWS};

/// Axis a slide travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Vertical travel: tiles change row
    Row,
    /// Horizontal travel: tiles change column
    Col,
}

/// One row of the direction table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PolicyRow {
    axis: Axis,
    /// -1 toward the origin, +1 toward the far edge
    sign: i8,
    rounding: Rounding,
}

impl PolicyRow {
    const fn of(direction: Direction) -> Self {
        match direction {
            Direction::Left => PolicyRow {
                axis: Axis::Col,
                sign: -1,
                rounding: Rounding::Ceil,
            },
            Direction::Right => PolicyRow {
                axis: Axis::Col,
                sign: 1,
                rounding: Rounding::Floor,
            },
            Direction::Up => PolicyRow {
                axis: Axis::Row,
                sign: -1,
                rounding: Rounding::Ceil,
            },
            Direction::Down => PolicyRow {
                axis: Axis::Row,
                sign: 1,
                rounding: Rounding::Floor,
            },
        }
    }
}

/// Direction table row bound to concrete cell and step sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectionPolicy {
    direction: Direction,
    row: PolicyRow,
    geometry: Geometry,
}

impl DirectionPolicy {
    pub fn new(direction: Direction, geometry: Geometry) -> Self {
        Self {
            direction,
            row: PolicyRow::of(direction),
            geometry,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn axis(&self) -> Axis {
        self.row.axis
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn rounding(&self) -> Rounding {
        self.row.rounding
    }

    /// Tiles nearest the destination edge are processed first: ascending
    /// toward the origin, descending toward the far edge.
    pub fn descending(&self) -> bool {
        self.row.sign > 0
    }

    pub fn sort_key(&self, tile: &Tile) -> u8 {
        match self.row.axis {
            Axis::Row => tile.row,
            Axis::Col => tile.col,
        }
    }

    /// Per-frame `(dx, dy)` displacement
    pub fn step_vector(&self) -> (i32, i32) {
        let d = self.row.sign as i32 * self.geometry.step;
        match self.row.axis {
            Axis::Row => (0, d),
            Axis::Col => (d, 0),
        }
    }

    /// True when the tile already sits in the edge cell it is sliding toward
    pub fn at_boundary(&self, tile: &Tile) -> bool {
        let (index, last) = match self.row.axis {
            Axis::Row => (tile.row, GRID_ROWS - 1),
            Axis::Col => (tile.col, GRID_COLS - 1),
        };
        if self.row.sign < 0 {
            index == 0
        } else {
            index >= last
        }
    }

    /// Cell one step further along the direction of travel
    pub fn neighbor_key(&self, tile: &Tile) -> Option<CellKey> {
        match self.row.axis {
            Axis::Row => tile.key().offset(self.row.sign, 0),
            Axis::Col => tile.key().offset(0, self.row.sign),
        }
    }

    /// Merge predicate: still more than one step away from an equal neighbour.
    pub fn approaching(&self, tile: &Tile, neighbor: &Tile) -> bool {
        self.gap(tile, neighbor) > self.geometry.step
    }

    /// Advance predicate: room for one full step before touching a blocking
    /// neighbour. A tile trailing a moving neighbour stays flush behind it.
    pub fn has_room(&self, tile: &Tile, neighbor: &Tile) -> bool {
        self.gap(tile, neighbor) >= self.extent() + self.geometry.step
    }

    /// Signed distance from `neighbor` back to `tile` along the travel axis
    fn gap(&self, tile: &Tile, neighbor: &Tile) -> i32 {
        let (from, to) = match self.row.axis {
            Axis::Row => (tile.y, neighbor.y),
            Axis::Col => (tile.x, neighbor.x),
        };
        (to - from) * self.row.sign as i32
    }

    fn extent(&self) -> i32 {
        match self.row.axis {
            Axis::Row => self.geometry.cell_height,
            Axis::Col => self.geometry.cell_width,
        }
    }
}
