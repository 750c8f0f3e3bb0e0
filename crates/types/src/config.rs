//! Runtime configuration read from `TWENTY48_*` environment variables.

use std::env;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::{Geometry, FPS, GRID_COLS, GRID_ROWS, MOVE_SPEED, WINDOW_HEIGHT, WINDOW_WIDTH};

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("frame rate must be positive")]
    ZeroFps,
    #[error("move speed must be positive, got {0}")]
    NonPositiveSpeed(i32),
    #[error("window {width}x{height} does not split into non-empty grid cells")]
    WindowTooSmall { width: i32, height: i32 },
    #[error("cell extent {extent} is not a multiple of move speed {step}")]
    StepMisaligned { extent: i32, step: i32 },
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// RNG seed for tile placement (0 = derive from the clock)
    pub seed: u32,
    pub fps: u32,
    pub move_speed: i32,
    pub window_width: i32,
    pub window_height: i32,
    /// Spawn a tile even when a move leaves the grid untouched
    pub spawn_on_unchanged: bool,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            fps: FPS,
            move_speed: MOVE_SPEED,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            spawn_on_unchanged: false,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Missing or unparseable values fall back to their defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = parse_var(&lookup, "TWENTY48_SEED").unwrap_or(defaults.seed);
        let fps = parse_var(&lookup, "TWENTY48_FPS").unwrap_or(defaults.fps);
        let move_speed = parse_var(&lookup, "TWENTY48_MOVE_SPEED").unwrap_or(defaults.move_speed);
        let window_width =
            parse_var(&lookup, "TWENTY48_WINDOW_WIDTH").unwrap_or(defaults.window_width);
        let window_height =
            parse_var(&lookup, "TWENTY48_WINDOW_HEIGHT").unwrap_or(defaults.window_height);

        let spawn_on_unchanged = lookup("TWENTY48_SPAWN_ON_NOOP")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(defaults.spawn_on_unchanged);

        let log_path = lookup("TWENTY48_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            fps,
            move_speed,
            window_width,
            window_height,
            spawn_on_unchanged,
            log_path,
        }
    }

    /// Check that tiles come to rest exactly on cell boundaries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.move_speed <= 0 {
            return Err(ConfigError::NonPositiveSpeed(self.move_speed));
        }

        let geometry = self.geometry();
        if geometry.cell_width <= 0 || geometry.cell_height <= 0 {
            return Err(ConfigError::WindowTooSmall {
                width: self.window_width,
                height: self.window_height,
            });
        }
        for extent in [geometry.cell_width, geometry.cell_height] {
            if extent % self.move_speed != 0 {
                return Err(ConfigError::StepMisaligned {
                    extent,
                    step: self.move_speed,
                });
            }
        }
        Ok(())
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            cell_width: self.window_width / GRID_COLS as i32,
            cell_height: self.window_height / GRID_ROWS as i32,
            step: self.move_speed,
        }
    }

    /// Seed to hand to the placement RNG (resolves 0 to a clock-derived value)
    pub fn effective_seed(&self) -> u32 {
        if self.seed != 0 {
            return self.seed;
        }
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(1)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}
