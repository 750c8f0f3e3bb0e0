//! Move resolver - frame-by-frame slide, collide and merge state machine
//!
//! A resolver lives for one move session. Each call to [`MoveResolver::step`]
//! simulates one animation frame:
//!
//! 1. order live tiles so the one nearest the destination edge goes first
//! 2. advance, block or merge each tile against the grid as it stood at the
//!    start of the frame
//! 3. rebuild the grid from the surviving tiles
//!
//! The resolver settles on the first frame in which nothing moved or merged.
//! A tile takes part in at most one merge per session. A frame that would put
//! two tiles on one cell is rolled back and the resolver settles there, so no
//! tile is ever dropped.

use std::cmp::Reverse;

use arrayvec::ArrayVec;

use crate::direction::DirectionPolicy;
use crate::grid::Grid;
use crate::tile::{Tile, TileId};
use crate::types::{Direction, Geometry, GRID_CAPACITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverState {
    Animating,
    Settled,
}

#[derive(Debug, Clone)]
pub struct MoveResolver {
    policy: DirectionPolicy,
    state: ResolverState,
    /// Survivors of merges so far this session
    merged: ArrayVec<TileId, GRID_CAPACITY>,
    frames: u32,
    /// Frames rolled back because two tiles claimed one cell
    collisions: u32,
}

impl MoveResolver {
    pub fn new(direction: Direction, geometry: Geometry) -> Self {
        Self {
            policy: DirectionPolicy::new(direction, geometry),
            state: ResolverState::Animating,
            merged: ArrayVec::new(),
            frames: 0,
            collisions: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.policy.direction()
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn is_settled(&self) -> bool {
        self.state == ResolverState::Settled
    }

    /// Frames simulated so far, including the final no-progress frame
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn merges(&self) -> u32 {
        self.merged.len() as u32
    }

    /// Frames discarded because they would have stacked two tiles.
    /// Always zero for a well-formed grid.
    pub fn collisions(&self) -> u32 {
        self.collisions
    }

    /// Ids of tiles that absorbed a neighbour this session
    pub fn merged_ids(&self) -> &[TileId] {
        &self.merged
    }

    fn has_merged(&self, id: TileId) -> bool {
        self.merged.contains(&id)
    }

    /// Simulate one frame.
    pub fn step(&mut self, grid: &mut Grid) -> ResolverState {
        if self.is_settled() {
            return self.state;
        }
        self.frames += 1;

        let start = grid.clone();
        let merged_before = self.merged.len();
        let policy = self.policy;
        let mut order: ArrayVec<usize, GRID_CAPACITY> = (0..grid.len()).collect();
        {
            let tiles = grid.tiles();
            if policy.descending() {
                order.sort_by_key(|&i| Reverse(policy.sort_key(&tiles[i])));
            } else {
                order.sort_by_key(|&i| policy.sort_key(&tiles[i]));
            }
        }

        let mut consumed = [false; GRID_CAPACITY];
        let mut progressed = false;

        for &i in order.iter() {
            let mut tile = grid.tiles()[i];
            if policy.at_boundary(&tile) {
                continue;
            }

            // Lookups use the cell keys from the start of the frame; a tile
            // absorbed earlier in this frame has already vacated its cell.
            let neighbor = policy
                .neighbor_key(&tile)
                .and_then(|key| grid.index_of(key))
                .filter(|&n| !consumed[n]);

            let advance = match neighbor {
                None => true,
                Some(n) => {
                    let next = grid.tiles()[n];
                    if next.value == tile.value
                        && !self.has_merged(tile.id)
                        && !self.has_merged(next.id)
                    {
                        if policy.approaching(&tile, &next) {
                            true
                        } else {
                            grid.tiles_mut()[n].value = next.value * 2;
                            consumed[i] = true;
                            self.merged.push(next.id);
                            progressed = true;
                            false
                        }
                    } else {
                        policy.has_room(&tile, &next)
                    }
                }
            };

            if advance {
                let (dx, dy) = policy.step_vector();
                tile.translate(dx, dy);
                tile.relocate(policy.geometry(), policy.rounding());
                grid.tiles_mut()[i] = tile;
                progressed = true;
            }
        }

        let survivors: ArrayVec<Tile, GRID_CAPACITY> = {
            let tiles = grid.tiles();
            order
                .iter()
                .filter(|&&i| !consumed[i])
                .map(|&i| tiles[i])
                .collect()
        };
        if grid.rebuild(survivors) > 0 {
            *grid = start;
            self.merged.truncate(merged_before);
            self.collisions += 1;
            self.state = ResolverState::Settled;
            return self.state;
        }

        if !progressed {
            self.state = ResolverState::Settled;
        }
        self.state
    }

    /// Step until settled without pacing or rendering; returns frames used.
    pub fn run(&mut self, grid: &mut Grid) -> u32 {
        while self.step(grid) == ResolverState::Animating {}
        self.frames
    }
}
