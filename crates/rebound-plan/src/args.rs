use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;

use rebound_model::{DelayMs, ExponentialOptions, Step};
use rebound_observe::{LogConfig, LogFormat, LogLevel};

pub const DEFAULT_INITIAL_MS: DelayMs = 100;
pub const DEFAULT_MAX_MS: DelayMs = 10_000;
pub const DEFAULT_STEPS: Step = 10;

fn parse_steps(s: &str) -> Result<Step, String> {
    let value: Step = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if value == 0 {
        return Err("steps must be at least 1".to_string());
    }
    Ok(value)
}

/// Print the delays an exponential backoff would hand to a retry loop.
#[derive(Parser, Debug)]
#[command(name = "rebound-plan", version)]
pub struct Cli {
    /// JSON file with `initial`, `random` and `max` fields
    #[arg(long, conflicts_with_all = ["initial", "random", "max"])]
    pub config: Option<PathBuf>,

    /// Base delay in milliseconds
    #[arg(long, default_value_t = DEFAULT_INITIAL_MS)]
    pub initial: DelayMs,

    /// Jitter bound, in steps subtracted from the exponent
    #[arg(long, default_value_t = 0.0)]
    pub random: f64,

    /// Delay ceiling in milliseconds
    #[arg(long, default_value_t = DEFAULT_MAX_MS)]
    pub max: DelayMs,

    /// Number of attempts to plan
    #[arg(long, default_value_t = DEFAULT_STEPS, value_parser = parse_steps)]
    pub steps: Step,

    /// Seed the jitter source for a reproducible plan
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Log filter expression
    #[arg(long, env = "REBOUND_LOG", default_value = "warn")]
    pub log_level: LogLevel,

    /// Log output: text, json or journald
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,
}

impl Cli {
    /// Backoff options from `--config`, or from the individual flags.
    pub fn options(&self) -> anyhow::Result<ExponentialOptions> {
        let Some(path) = &self.config else {
            return Ok(ExponentialOptions::new(self.initial, self.random, self.max));
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            format: self.log_format,
            level: self.log_level.clone(),
            with_targets: false,
            ..Default::default()
        }
    }
}
