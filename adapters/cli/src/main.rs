#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the wayfinder simulation headlessly.

mod report;
mod settings;

use std::{path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use wayfinder_core::{Event, Position, SimulationConfig};
use wayfinder_system_simulation::Simulation;

use report::Summary;

/// Runs the agent toward a goal for a fixed number of ticks.
#[derive(Debug, Parser)]
#[command(name = "wayfinder", version, long_about = None)]
struct Cli {
    /// Versioned TOML settings file with a `[simulation]` table
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Text map of `.`, `#` and `^` cells used instead of generated terrain
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,
    /// Number of grid rows
    #[arg(long)]
    rows: Option<u32>,
    /// Number of grid columns
    #[arg(long)]
    cols: Option<u32>,
    /// Seed for terrain generation
    #[arg(long)]
    seed: Option<u64>,
    /// Belief weight applied on a terrain match
    #[arg(long)]
    p_hit: Option<f64>,
    /// Belief weight applied on a terrain mismatch
    #[arg(long)]
    p_miss: Option<f64>,
    /// Diffusion strength in [0, 1]
    #[arg(long)]
    blur: Option<f64>,
    /// Goal cell as x,y
    #[arg(long, value_name = "X,Y")]
    goal: Option<GoalArg>,
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 100)]
    ticks: u64,
}

impl Cli {
    /// Settings file contents with command-line overrides applied on top.
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => settings::load(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(p_hit) = self.p_hit {
            config.p_hit = p_hit;
        }
        if let Some(p_miss) = self.p_miss {
            config.p_miss = p_miss;
        }
        if let Some(blur) = self.blur {
            config.blur = blur;
        }

        Ok(config)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct GoalArg(Position);

impl FromStr for GoalArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| "goal must be formatted as x,y".to_owned())?;
        let x = x
            .trim()
            .parse::<u32>()
            .map_err(|_| "x must be a non-negative integer".to_owned())?;
        let y = y
            .trim()
            .parse::<u32>()
            .map_err(|_| "y must be a non-negative integer".to_owned())?;
        Ok(Self(Position::new(x, y)))
    }
}

/// Entry point for the wayfinder command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let mut simulation = match &cli.map {
        Some(path) => {
            let terrain = settings::load_map(path)?;
            Simulation::with_terrain(config, terrain, None)
        }
        None => Simulation::new(config),
    }
    .context("failed to build simulation")?;

    let mut events = Vec::new();
    if let Some(GoalArg(goal)) = cli.goal {
        simulation.set_goal(Some(goal), &mut events);
    }

    let mut goal_reached = false;
    for _ in 0..cli.ticks {
        events.clear();
        simulation.step(&mut events);
        for event in &events {
            match event {
                Event::GoalReached { .. } => goal_reached = true,
                Event::BeliefReset => warn!(tick = simulation.tick(), "belief reset to uniform"),
                _ => {}
            }
        }
    }

    info!(
        ticks = simulation.tick(),
        goal_reached, "simulation finished"
    );
    println!("{}", Summary::capture(&simulation, goal_reached));
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
