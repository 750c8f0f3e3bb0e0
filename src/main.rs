//! Terminal 2048 runner (default binary).
//!
//! `tui-2048` plays in the terminal; `tui-2048 headless` reads moves from
//! stdin and prints JSON lines (see [`tui_2048::headless`]).

use std::io;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::event::{self, Event};
use log::{info, trace};

use tui_2048::core::GameState;
use tui_2048::engine::{FixedRateClock, RoundController};
use tui_2048::headless::{self, parse_headless_args};
use tui_2048::input::{discard_pending, handle_key_event, should_quit};
use tui_2048::term::TermFrontend;
use tui_2048::types::{GameAction, GameConfig};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    config.validate()?;
    tui_2048::logger::init(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(options) = parse_headless_args(&args)? {
        let mut game = GameState::new(options.apply(config));
        let stdin = io::stdin();
        let summary = headless::run(&mut game, stdin.lock(), io::stdout().lock())?;
        info!(
            "headless run done: moves={} errors={} lost={}",
            summary.moves, summary.errors, summary.lost
        );
        return Ok(());
    }
    if let Some(arg) = args.first() {
        bail!("unknown argument: {arg} (expected `headless` or nothing)");
    }

    let mut frontend = TermFrontend::new();
    frontend.terminal().enter()?;

    let result = run(&mut frontend, config);

    // Always try to restore terminal state.
    let _ = frontend.terminal().exit();
    result
}

fn run(frontend: &mut TermFrontend, config: GameConfig) -> Result<()> {
    let fps = config.fps;
    let mut game = GameState::new(config);
    game.start();
    info!("new game, rng state {}", game.seed());

    let mut rounds = RoundController::new(FixedRateClock::new(), frontend, fps);

    loop {
        rounds.idle_frame(&game)?;

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(GameAction::Move(direction)) => {
                            rounds.play_round(&mut game, direction)?;
                            // Keys pressed during the animation are not queued.
                            let dropped = discard_pending()?;
                            if dropped > 0 {
                                trace!("dropped {dropped} events during animation");
                            }
                            break;
                        }
                        Some(GameAction::Restart) => {
                            game.restart();
                            info!("restart: episode {}", game.episode_id());
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => rounds.renderer_mut().invalidate(),
                _ => {}
            }
        }
    }
}
