//! Headless driver: plays moves read line by line and reports each round as
//! one JSON object per line.
//!
//! ```text
//! $ printf 'left\nup\n' | tui-2048 headless --seed 7
//! {"type":"start","seed":7,"board":[[0,0,2,0],...]}
//! {"type":"move","move":1,"direction":"left","outcome":"continue",...}
//! ```

use std::io::{BufRead, Write};

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::Serialize;

use crate::core::{GameState, Layout, RoundReport, Tile};
use crate::types::{Direction, GameConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessOptions {
    pub seed: Option<u32>,
    pub spawn_on_noop: bool,
}

impl HeadlessOptions {
    /// Apply command-line overrides on top of the environment config.
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.spawn_on_noop {
            config.spawn_on_unchanged = true;
        }
        config
    }
}

/// `Ok(None)` when `args` is not a `headless` invocation.
pub fn parse_headless_args(args: &[String]) -> Result<Option<HeadlessOptions>> {
    if args.first().map(String::as_str) != Some("headless") {
        return Ok(None);
    }

    let mut options = HeadlessOptions::default();
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("headless: missing value for --seed"))?;
                let seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("headless: invalid --seed value: {}", v))?;
                options.seed = Some(seed);
            }
            "--spawn-on-noop" => options.spawn_on_noop = true,
            other => {
                return Err(anyhow!("headless: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Some(options))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpawnRecord {
    pub row: u8,
    pub col: u8,
    pub value: u32,
}

impl From<Tile> for SpawnRecord {
    fn from(tile: Tile) -> Self {
        Self {
            row: tile.row,
            col: tile.col,
            value: tile.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record<'a> {
    Start {
        seed: u32,
        board: Layout,
    },
    Move {
        #[serde(rename = "move")]
        number: u32,
        direction: &'static str,
        outcome: &'static str,
        changed: bool,
        frames: u32,
        merges: u32,
        spawned: Option<SpawnRecord>,
        board: Layout,
    },
    Error {
        line: usize,
        input: &'a str,
        message: String,
    },
}

impl<'a> Record<'a> {
    fn from_report(number: u32, report: &RoundReport, board: Layout) -> Self {
        Record::Move {
            number,
            direction: report.direction.as_str(),
            outcome: report.outcome.as_str(),
            changed: report.changed,
            frames: report.frames,
            merges: report.merges,
            spawned: report.spawned.map(SpawnRecord::from),
            board,
        }
    }
}

/// Totals for one headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadlessSummary {
    pub moves: u32,
    pub errors: u32,
    pub lost: bool,
}

fn emit<W: Write>(out: &mut W, record: &Record<'_>) -> Result<()> {
    serde_json::to_writer(&mut *out, record).context("encoding record")?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Play every direction read from `input`, writing records to `out`.
///
/// `game` is started if it has not been already; the start record carries
/// the RNG state before the starting tiles were drawn. Reading stops after
/// the move that loses the game.
pub fn run<R: BufRead, W: Write>(game: &mut GameState, input: R, mut out: W) -> Result<HeadlessSummary> {
    let seed = game.seed();
    game.start();
    emit(
        &mut out,
        &Record::Start {
            seed,
            board: game.grid().values(),
        },
    )?;

    let mut summary = HeadlessSummary::default();
    for (index, line) in input.lines().enumerate() {
        let line = line.context("reading moves")?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }

        let Some(direction) = Direction::from_str(&word.to_ascii_lowercase()) else {
            debug!("line {}: not a direction: {:?}", index + 1, word);
            summary.errors += 1;
            emit(
                &mut out,
                &Record::Error {
                    line: index + 1,
                    input: word,
                    message: format!("unknown direction {word:?}"),
                },
            )?;
            continue;
        };

        let Some(report) = game.play_move(direction) else {
            break;
        };
        summary.moves += 1;
        emit(
            &mut out,
            &Record::from_report(game.moves(), &report, game.grid().values()),
        )?;

        if game.is_lost() {
            summary.lost = true;
            info!("headless game lost after {} moves", summary.moves);
            break;
        }
    }

    out.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn not_headless() {
        assert_eq!(parse_headless_args(&[]).unwrap(), None);
        assert_eq!(parse_headless_args(&args(&["play"])).unwrap(), None);
    }

    #[test]
    fn parses_flags() {
        let opts = parse_headless_args(&args(&["headless", "--seed", "42", "--spawn-on-noop"]))
            .unwrap()
            .unwrap();
        assert_eq!(opts.seed, Some(42));
        assert!(opts.spawn_on_noop);

        let config = opts.apply(GameConfig::default());
        assert_eq!(config.seed, 42);
        assert!(config.spawn_on_unchanged);
    }

    #[test]
    fn rejects_bad_flags() {
        assert!(parse_headless_args(&args(&["headless", "--seed"])).is_err());
        assert!(parse_headless_args(&args(&["headless", "--seed", "x"])).is_err());
        assert!(parse_headless_args(&args(&["headless", "--fast"])).is_err());
    }
}
