//! Round controller: drives one move from request to settle, one paced and
//! rendered frame at a time.

use anyhow::Result;
use log::{debug, info, trace};

use crate::clock::FrameClock;
use crate::core::{GameSnapshot, GameState, ResolverState, RoundOutcome, RoundReport};
use crate::types::Direction;

/// Draws the board. Called once per animation frame and once per idle frame.
pub trait Renderer {
    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        (**self).draw(snapshot)
    }
}

/// Explicit render/clock context for playing rounds.
pub struct RoundController<C, R> {
    clock: C,
    renderer: R,
    fps: u32,
    /// Reused across frames so drawing does not allocate
    snapshot: GameSnapshot,
}

impl<C: FrameClock, R: Renderer> RoundController<C, R> {
    pub fn new(clock: C, renderer: R, fps: u32) -> Self {
        Self {
            clock,
            renderer,
            fps,
            snapshot: GameSnapshot::default(),
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// One frame of the idle loop: wait for the tick, then draw.
    pub fn idle_frame(&mut self, game: &GameState) -> Result<()> {
        self.clock.tick(self.fps);
        self.render(game)
    }

    /// Play one full round.
    ///
    /// Returns `Ok(None)` when the game is already lost and the move is
    /// ignored. Renderer failures abort the animation; the grid is left at
    /// the last simulated frame.
    pub fn play_round(
        &mut self,
        game: &mut GameState,
        direction: Direction,
    ) -> Result<Option<RoundReport>> {
        let Some(mut session) = game.begin_move(direction) else {
            debug!("ignoring {} move: game is over", direction.as_str());
            return Ok(None);
        };

        loop {
            self.clock.tick(self.fps);
            let state = game.advance(&mut session);
            self.render(game)?;
            if state == ResolverState::Settled {
                break;
            }
        }

        let report = game.finish_move(session);
        debug!(
            "move {} {}: frames={} merges={} changed={}",
            game.moves(),
            direction.as_str(),
            report.frames,
            report.merges,
            report.changed
        );
        if let Some(tile) = report.spawned {
            trace!("spawned {} at ({}, {})", tile.value, tile.row, tile.col);
        }
        if report.outcome == RoundOutcome::Lost {
            info!(
                "game over after {} moves, best tile {}",
                game.moves(),
                game.grid().max_value()
            );
        }

        Ok(Some(report))
    }

    fn render(&mut self, game: &GameState) -> Result<()> {
        game.snapshot_into(&mut self.snapshot);
        self.renderer.draw(&self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameConfig;
    use std::time::Duration;

    #[derive(Default)]
    struct CountingClock {
        ticks: u32,
    }

    impl FrameClock for CountingClock {
        fn tick(&mut self, _fps: u32) -> Duration {
            self.ticks += 1;
            Duration::ZERO
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<GameSnapshot>,
    }

    impl Renderer for RecordingRenderer {
        fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
            self.frames.push(snapshot.clone());
            Ok(())
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn draw(&mut self, _snapshot: &GameSnapshot) -> Result<()> {
            anyhow::bail!("terminal went away")
        }
    }

    fn config() -> GameConfig {
        GameConfig {
            seed: 5,
            ..GameConfig::default()
        }
    }

    #[test]
    fn one_tick_and_one_draw_per_frame() {
        let mut game = GameState::from_layout(config(), [[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);
        let mut controller =
            RoundController::new(CountingClock::default(), RecordingRenderer::default(), 60);

        let report = controller
            .play_round(&mut game, Direction::Left)
            .unwrap()
            .unwrap();

        assert_eq!(report.frames, 16);
        assert_eq!(controller.clock.ticks, 16);
        assert_eq!(controller.renderer().frames.len(), 16);
        assert!(controller.renderer().frames.iter().all(|f| f.animating));

        // Rendered x positions walk toward the left edge one step at a time.
        let xs: Vec<i32> = controller
            .renderer()
            .frames
            .iter()
            .map(|f| f.tiles[0].x)
            .collect();
        assert_eq!(xs[0], 560);
        assert_eq!(xs[14], 0);
        assert_eq!(xs[15], 0);
    }

    #[test]
    fn idle_frame_renders_once() {
        let game = GameState::from_layout(config(), [[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut controller =
            RoundController::new(CountingClock::default(), RecordingRenderer::default(), 60);
        controller.idle_frame(&game).unwrap();
        assert_eq!(controller.clock.ticks, 1);
        assert_eq!(controller.renderer().frames.len(), 1);
        assert!(!controller.renderer().frames[0].animating);
    }

    #[test]
    fn lost_game_ignores_moves() {
        let mut game = GameState::from_layout(
            config(),
            [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
        );
        let mut controller =
            RoundController::new(CountingClock::default(), RecordingRenderer::default(), 60);

        let report = controller
            .play_round(&mut game, Direction::Left)
            .unwrap()
            .unwrap();
        assert_eq!(report.outcome, RoundOutcome::Lost);

        let ticks = controller.clock.ticks;
        assert!(controller
            .play_round(&mut game, Direction::Up)
            .unwrap()
            .is_none());
        assert_eq!(controller.clock.ticks, ticks);
    }

    #[test]
    fn renderer_errors_propagate() {
        let mut game = GameState::from_layout(config(), [[0, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut controller = RoundController::new(CountingClock::default(), FailingRenderer, 60);
        assert!(controller.play_round(&mut game, Direction::Left).is_err());
    }

    #[test]
    fn borrowed_collaborators() {
        let mut clock = CountingClock::default();
        let mut renderer = RecordingRenderer::default();
        let mut game = GameState::from_layout(config(), [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        {
            let mut controller = RoundController::new(&mut clock, &mut renderer, 60);
            controller.play_round(&mut game, Direction::Left).unwrap();
        }
        assert_eq!(clock.ticks as usize, renderer.frames.len());
        assert!(clock.ticks > 0);
    }
}
