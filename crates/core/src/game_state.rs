//! Game state module - the rules of one round
//!
//! This module ties together the grid, the move resolver and the placement
//! generator. A round is: resolve the slide until it settles, then either
//! declare the game lost (board full) or spawn one new tile.
//!
//! Pacing and rendering are not handled here. Callers either drive a
//! [`MoveSession`] frame by frame (see `tui-2048-engine`) or call
//! [`GameState::play_move`] to resolve a whole round at once.

use crate::grid::{Grid, Layout};
use crate::resolver::{MoveResolver, ResolverState};
use crate::snapshot::{GameSnapshot, TileSnapshot};
use crate::spawn::{PlacementGenerator, SpawnError};
use crate::tile::{Tile, TileId};
use crate::types::{CellKey, Direction, GameConfig, Geometry, STARTING_TILES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Lost,
}

/// Terminal condition of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    Continue,
    Lost,
}

impl RoundOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundOutcome::Continue => "continue",
            RoundOutcome::Lost => "lost",
        }
    }
}

/// What one completed move did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub direction: Direction,
    pub outcome: RoundOutcome,
    /// Any tile moved or merged
    pub changed: bool,
    pub frames: u32,
    pub merges: u32,
    pub spawned: Option<Tile>,
}

/// An in-flight move: the resolver plus the layout it started from.
#[derive(Debug, Clone)]
pub struct MoveSession {
    resolver: MoveResolver,
    before: Layout,
}

impl MoveSession {
    pub fn direction(&self) -> Direction {
        self.resolver.direction()
    }

    pub fn is_settled(&self) -> bool {
        self.resolver.is_settled()
    }

    pub fn frames(&self) -> u32 {
        self.resolver.frames()
    }

    pub fn resolver(&self) -> &MoveResolver {
        &self.resolver
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    geometry: Geometry,
    grid: Grid,
    placer: PlacementGenerator,
    status: GameStatus,
    next_id: TileId,
    /// Completed moves this episode
    moves: u32,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    in_move: bool,
    started: bool,
}

impl GameState {
    /// Create an empty, unstarted game. `config` is expected to be validated.
    pub fn new(config: GameConfig) -> Self {
        let placer = PlacementGenerator::new(config.effective_seed());
        Self::with_placer(config, placer)
    }

    fn with_placer(config: GameConfig, placer: PlacementGenerator) -> Self {
        Self {
            geometry: config.geometry(),
            config,
            grid: Grid::new(),
            placer,
            status: GameStatus::Playing,
            next_id: 1,
            moves: 0,
            episode_id: 0,
            in_move: false,
            started: false,
        }
    }

    /// Start from a fixed layout (values, `0` for empty) instead of random tiles.
    pub fn from_layout(config: GameConfig, layout: Layout) -> Self {
        let mut state = Self::new(config);
        for key in CellKey::all() {
            let value = layout[key.row as usize][key.col as usize];
            if value != 0 {
                let tile = Tile::new(state.take_id(), value, key, &state.geometry);
                state.grid.insert(tile);
            }
        }
        state.started = true;
        state
    }

    /// Place the starting tiles
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        for _ in 0..STARTING_TILES {
            if self.spawn_tile().is_err() {
                break;
            }
        }
    }

    /// Fresh board; the RNG stream continues where it left off.
    pub fn restart(&mut self) {
        let next_episode = self.episode_id.wrapping_add(1);
        let placer = PlacementGenerator::new(self.placer.seed());
        *self = Self::with_placer(self.config.clone(), placer);
        self.episode_id = next_episode;
        self.start();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_lost(&self) -> bool {
        self.status == GameStatus::Lost
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.placer.seed()
    }

    /// Open a move session, or `None` once the game is lost.
    pub fn begin_move(&mut self, direction: Direction) -> Option<MoveSession> {
        if self.is_lost() {
            return None;
        }
        self.in_move = true;
        Some(MoveSession {
            resolver: MoveResolver::new(direction, self.geometry),
            before: self.grid.values(),
        })
    }

    /// Simulate one animation frame of `session`.
    pub fn advance(&mut self, session: &mut MoveSession) -> ResolverState {
        session.resolver.step(&mut self.grid)
    }

    /// Close a session: settle it if needed, then apply the end-of-round rules.
    pub fn finish_move(&mut self, mut session: MoveSession) -> RoundReport {
        while self.advance(&mut session) == ResolverState::Animating {}
        self.in_move = false;
        self.moves = self.moves.wrapping_add(1);

        let changed = self.grid.values() != session.before;
        let mut spawned = None;
        let outcome = if self.grid.is_full() {
            self.status = GameStatus::Lost;
            RoundOutcome::Lost
        } else {
            if changed || self.config.spawn_on_unchanged {
                spawned = self.spawn_tile().ok();
            }
            RoundOutcome::Continue
        };

        RoundReport {
            direction: session.direction(),
            outcome,
            changed,
            frames: session.resolver.frames(),
            merges: session.resolver.merges(),
            spawned,
        }
    }

    /// Resolve a whole round without pacing or rendering.
    pub fn play_move(&mut self, direction: Direction) -> Option<RoundReport> {
        let session = self.begin_move(direction)?;
        Some(self.finish_move(session))
    }

    fn spawn_tile(&mut self) -> Result<Tile, SpawnError> {
        let id = self.next_id;
        let tile = self.placer.place(&mut self.grid, id, &self.geometry)?;
        self.next_id = self.next_id.wrapping_add(1);
        Ok(tile)
    }

    fn take_id(&mut self) -> TileId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.tiles.clear();
        out.tiles
            .extend(self.grid.iter().copied().map(TileSnapshot::from));
        out.geometry = self.geometry;
        out.animating = self.in_move;
        out.lost = self.is_lost();
        out.moves = self.moves;
        out.episode_id = self.episode_id;
        out.seed = self.placer.seed();
        out.max_value = self.grid.max_value();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig {
            seed: 1,
            ..GameConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u32) -> GameConfig {
        GameConfig {
            seed,
            ..GameConfig::default()
        }
    }

    fn checkerboard() -> Layout {
        [
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]
    }

    #[test]
    fn test_start_places_two_tiles() {
        let mut state = GameState::new(seeded(12345));
        assert!(!state.started());
        assert!(state.grid().is_empty());

        state.start();
        assert!(state.started());
        assert_eq!(state.grid().len(), 2);
        assert!(state.grid().iter().all(|t| t.value == 2 || t.value == 4));

        // Starting twice does nothing.
        state.start();
        assert_eq!(state.grid().len(), 2);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = GameState::new(seeded(77));
        let mut b = GameState::new(seeded(77));
        a.start();
        b.start();
        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            a.play_move(dir);
            b.play_move(dir);
        }
        assert_eq!(a.grid().values(), b.grid().values());
    }

    #[test]
    fn test_merge_spawns_one_tile() {
        let mut state = GameState::from_layout(
            seeded(9),
            [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]],
        );
        let report = state.play_move(Direction::Left).unwrap();

        assert_eq!(report.outcome, RoundOutcome::Continue);
        assert!(report.changed);
        assert_eq!(report.merges, 1);
        let spawned = report.spawned.unwrap();
        assert_ne!(spawned.key(), CellKey::new(0, 0));
        assert_eq!(state.grid().len(), 2);
        assert_eq!(state.grid().get(CellKey::new(0, 0)).map(|t| t.value), Some(4));
        assert_eq!(state.moves(), 1);
    }

    #[test]
    fn test_unchanged_move_does_not_spawn() {
        let mut state = GameState::from_layout(
            seeded(9),
            [[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]],
        );
        let report = state.play_move(Direction::Left).unwrap();
        assert!(!report.changed);
        assert_eq!(report.spawned, None);
        assert_eq!(report.outcome, RoundOutcome::Continue);
        assert_eq!(state.grid().len(), 2);
    }

    #[test]
    fn test_unchanged_move_spawns_when_configured() {
        let config = GameConfig {
            spawn_on_unchanged: true,
            ..seeded(9)
        };
        let mut state = GameState::from_layout(config, [[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let report = state.play_move(Direction::Left).unwrap();
        assert!(!report.changed);
        assert!(report.spawned.is_some());
        assert_eq!(state.grid().len(), 3);
    }

    #[test]
    fn test_full_board_without_merges_is_lost() {
        let mut state = GameState::from_layout(seeded(3), checkerboard());
        let report = state.play_move(Direction::Left).unwrap();

        assert_eq!(report.outcome, RoundOutcome::Lost);
        assert!(!report.changed);
        assert_eq!(report.spawned, None);
        assert!(state.is_lost());

        // No further moves once lost.
        assert!(state.play_move(Direction::Right).is_none());
        assert!(state.begin_move(Direction::Up).is_none());
    }

    #[test]
    fn test_restart_clears_loss() {
        let mut state = GameState::from_layout(seeded(3), checkerboard());
        state.play_move(Direction::Left);
        assert!(state.is_lost());

        state.restart();
        assert!(!state.is_lost());
        assert_eq!(state.episode_id(), 1);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.grid().len(), 2);
    }

    #[test]
    fn test_session_steps_frame_by_frame() {
        let mut state = GameState::from_layout(
            seeded(1),
            [[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]],
        );
        let mut session = state.begin_move(Direction::Left).unwrap();
        assert!(state.snapshot().animating);

        assert_eq!(state.advance(&mut session), ResolverState::Animating);
        let tile = state.grid().tiles()[0];
        assert_eq!((tile.x, tile.col), (560, 3));

        let report = state.finish_move(session);
        assert_eq!(report.frames, 16);
        assert!(!state.snapshot().animating);
    }

    #[test]
    fn test_snapshot_reflects_grid() {
        let state = GameState::from_layout(
            seeded(1),
            [[2, 0, 0, 0], [0, 8, 0, 0], [0; 4], [0; 4]],
        );
        let snap = state.snapshot();
        assert_eq!(snap.tiles.len(), 2);
        assert_eq!(snap.max_value, 8);
        assert!(snap.playable());
        assert!(snap.tiles.iter().any(|t| t.value == 8 && t.x == 200 && t.y == 200));
    }
}
