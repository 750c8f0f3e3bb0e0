//! Logging setup.
//!
//! Stdout belongs to the terminal UI, so records go to `TWENTY48_LOG_PATH`
//! when it is set and to stderr otherwise. The filter is read from
//! `TWENTY48_LOG` (env_logger syntax, default `warn`).

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

use crate::types::GameConfig;

pub const FILTER_VAR: &str = "TWENTY48_LOG";

pub fn init(config: &GameConfig) -> Result<()> {
    let mut builder = Builder::from_env(Env::new().filter_or(FILTER_VAR, "warn"));
    builder.format_timestamp_millis();

    if let Some(path) = &config.log_path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {path}"))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .context("installing logger")?;
    Ok(())
}
