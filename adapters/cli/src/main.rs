#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Nature Lovers simulation headlessly.

mod render;
mod scenario;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use nature_lovers_core::{Command, Direction, Event, WELCOME_BANNER};
use nature_lovers_world::{self as world, query};
use tracing::info;
use tracing_subscriber::EnvFilter;

use scenario::Scenario;

/// Command-line arguments accepted by the simulation runner.
#[derive(Debug, Parser)]
#[command(name = "nature-lovers", about = "Runs the grid pollution simulation")]
struct CliArgs {
    /// TOML scenario with a `[simulation]` table and an optional `[layout]`.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Overrides the seed from the scenario.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 100)]
    ticks: u64,
    /// Agent intents, one per tick: U, D, L, R, or `.` to stand still.
    #[arg(long, default_value = "")]
    intents: String,
    /// Prints the final field as text.
    #[arg(long)]
    render: bool,
    /// Prints the final snapshot as JSON.
    #[arg(long, conflicts_with = "render")]
    json: bool,
}

/// Entry point for the Nature Lovers command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    info!("{WELCOME_BANNER}");

    let mut scenario = match &args.config {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    if let Some(seed) = args.seed {
        scenario.simulation.seed = seed;
    }
    let intents = parse_intents(&args.intents)?;

    let mut world = scenario.build().context("failed to initialize the world")?;
    let mut events = Vec::new();
    let mut strikes = 0usize;
    let mut meals = 0usize;
    for tick in 0..args.ticks {
        let intent = usize::try_from(tick)
            .ok()
            .and_then(|index| intents.get(index).copied())
            .flatten();
        if let Some(direction) = intent {
            world::apply(
                &mut world,
                Command::SubmitAgentIntent { direction },
                &mut events,
            );
        }
        world::apply(&mut world, Command::Tick, &mut events);

        for event in events.drain(..) {
            match event {
                Event::AgentStruck { .. } => strikes += 1,
                Event::ResourceConsumed { .. } => meals += 1,
                _ => {}
            }
        }
    }

    let agent = query::agent(&world);
    info!(
        ticks = query::tick_index(&world),
        strikes,
        meals,
        vitality = agent.vitality,
        "simulation finished"
    );

    let snapshot = query::snapshot(&world);
    if args.json {
        let json =
            serde_json::to_string_pretty(&snapshot).context("failed to serialize the snapshot")?;
        println!("{json}");
    } else if args.render {
        print!("{}", render::render(&snapshot));
    } else {
        println!(
            "tick {} vitality {} consumed {} companions {}",
            query::tick_index(&world),
            agent.vitality,
            agent.consumed,
            agent.companions.len()
        );
    }

    Ok(())
}

fn parse_intents(script: &str) -> Result<Vec<Option<Direction>>> {
    script
        .chars()
        .filter(|symbol| !symbol.is_whitespace())
        .map(|symbol| {
            Ok(match symbol.to_ascii_uppercase() {
                'U' => Some(Direction::Up),
                'D' => Some(Direction::Down),
                'L' => Some(Direction::Left),
                'R' => Some(Direction::Right),
                '.' => None,
                other => bail!("unknown intent symbol {other:?}; expected U, D, L, R or ."),
            })
        })
        .collect()
}
