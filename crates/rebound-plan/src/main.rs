use anyhow::Context;
use clap::Parser;
use tracing::info;

use rebound_core::prelude::*;
use rebound_observe::init_logging;

mod args;
use args::Cli;

mod plan;
use plan::{build_plan, render_text, total_wait_ms};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1) logger
    init_logging(&cli.log_config())?;

    // 2) strategy
    let options = cli.options()?;
    let backoff = ExponentialBackoff::try_new(options).context("refusing to plan")?;
    info!(
        initial = options.initial,
        random = options.random,
        max = options.max,
        steps = cli.steps,
        seed = ?cli.seed,
        "planning backoff schedule"
    );

    // 3) plan
    let plan = match cli.seed {
        Some(seed) => build_plan(backoff.with_jitter(SeededJitter::new(seed)), cli.steps),
        None => build_plan(backoff, cli.steps),
    };
    info!(total_wait_ms = total_wait_ms(&plan), "plan ready");

    // 4) output
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_text(&plan));
    }
    Ok(())
}
