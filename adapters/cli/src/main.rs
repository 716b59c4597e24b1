#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line host that drives the Maze Forager planner.
//!
//! The binary simulates a small scripted environment: it hands the planner
//! one observation per tick, applies the returned move, walks the hazards
//! with a seeded random walk, and stops when the board is cleared, the
//! agent is caught, or the tick cap is reached.

mod host;
mod scenario;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use maze_forager_core::{Agent, PlannerConfig};
use maze_forager_planner::Planner;
use maze_forager_rendering::render_value_grid;

use crate::host::{Host, TickOutcome};
use crate::scenario::Scenario;

/// Command-line arguments accepted by the demo host.
#[derive(Debug, Parser)]
#[command(name = "maze-forager", about = "Grid-world value-iteration forager")]
struct Args {
    /// Built-in scenario name (`training`, `crossing`) or a transfer string.
    #[arg(long, default_value = "crossing")]
    scenario: String,
    /// Seed for the hazard random walks.
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Maximum number of decision ticks before the session is cut short.
    #[arg(long, default_value_t = 200)]
    ticks: u32,
    /// Print the converged value grid after every tick.
    #[arg(long)]
    show_values: bool,
    /// Override the configured sweep count.
    #[arg(long)]
    sweeps: Option<u32>,
    /// Print the scenario's transfer string and exit.
    #[arg(long)]
    export: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let scenario = resolve_scenario(&args.scenario)?;

    if args.export {
        println!("{}", scenario.encode());
        return Ok(());
    }

    let mut config = PlannerConfig::default();
    if let Some(sweeps) = args.sweeps {
        config.sweep_count = sweeps;
    }

    let mut planner = Planner::new(config);
    planner
        .on_session_start(&scenario.layout())
        .context("session start failed")?;
    let mut host = Host::new(&scenario, args.seed).context("host setup failed")?;

    let mut outcome = TickOutcome::Continue;
    let mut tick = 0;
    while tick < args.ticks && outcome == TickOutcome::Continue {
        let observation = host.observation();
        let plan = planner.plan(&observation);

        if args.show_values {
            println!("{}", render_value_grid(&plan.values));
        }
        println!(
            "tick {tick}: agent at ({}, {}) plays {:?}",
            observation.agent.x(),
            observation.agent.y(),
            plan.decision
        );

        outcome = host.apply(plan.decision);
        tick += 1;
    }

    planner.on_session_end();

    match outcome {
        TickOutcome::Cleared => println!("board cleared in {tick} ticks"),
        TickOutcome::Caught => println!("caught by a hazard after {tick} ticks"),
        TickOutcome::Continue => println!(
            "tick cap reached with {} collectibles left",
            host.collectibles_remaining()
        ),
    }

    Ok(())
}

fn resolve_scenario(input: &str) -> Result<Scenario> {
    if let Some(scenario) = scenario::builtin(input) {
        return Ok(scenario);
    }

    if input.starts_with(scenario::TRANSFER_HEADER) {
        return Scenario::decode(input)
            .map_err(|error| anyhow!("invalid transfer string: {error}"));
    }

    Err(anyhow!(
        "unknown scenario `{input}`; expected a built-in name or a transfer string"
    ))
}
