//! CLI frontend for the Biotope plant-metabolism simulator.

mod commands;
mod panel;

use std::path::PathBuf;
use std::process;

use bt_simulation::StepCount;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::SpawnSpec;

#[derive(Parser)]
#[command(
    name = "biotope",
    about = "Biotope — a closed-ecosystem plant metabolism simulator",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a template file, then list its templates
    Templates {
        /// JSON file with an array of plant templates (default: the sample
        /// shipped with the repository, relative to the working directory)
        #[arg(short, long, default_value = "data/plants.json")]
        templates: PathBuf,
    },

    /// Spawn plants, run a number of ticks, and print the resulting state
    Simulate {
        /// JSON file with an array of plant templates (default: the sample
        /// shipped with the repository, relative to the working directory)
        #[arg(short, long, default_value = "data/plants.json")]
        templates: PathBuf,

        /// Plant to spawn, as `type` or `type:count` (repeatable)
        #[arg(short, long = "spawn", value_parser = commands::parse_spawn)]
        spawn: Vec<SpawnSpec>,

        /// Number of ticks to run
        #[arg(short = 'n', long, default_value = "10", value_parser = bt_simulation::parse_steps)]
        ticks: StepCount,

        /// JSON file with the starting environment (default: built-in seed)
        #[arg(short, long)]
        environment: Option<PathBuf>,

        /// Print the final state as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Also print the event log
        #[arg(short, long)]
        verbose: bool,
    },

    /// Advance one tick per interval and redraw after each tick
    Watch {
        /// JSON file with an array of plant templates (default: the sample
        /// shipped with the repository, relative to the working directory)
        #[arg(short, long, default_value = "data/plants.json")]
        templates: PathBuf,

        /// Plant to spawn, as `type` or `type:count` (repeatable)
        #[arg(short, long = "spawn", value_parser = commands::parse_spawn)]
        spawn: Vec<SpawnSpec>,

        /// Stop after this many ticks (default: run until interrupted)
        #[arg(short = 'n', long, value_parser = bt_simulation::parse_steps)]
        ticks: Option<StepCount>,

        /// JSON file with the starting environment (default: built-in seed)
        #[arg(short, long)]
        environment: Option<PathBuf>,

        /// Milliseconds between ticks
        #[arg(short, long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
        interval_ms: u64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Templates { templates } => commands::templates::run(&templates),
        Commands::Simulate {
            templates,
            spawn,
            ticks,
            environment,
            json,
            verbose,
        } => commands::simulate::run(
            &templates,
            &spawn,
            ticks,
            environment.as_deref(),
            json,
            verbose,
        ),
        Commands::Watch {
            templates,
            spawn,
            ticks,
            environment,
            interval_ms,
        } => commands::watch::run(
            &templates,
            &spawn,
            ticks,
            environment.as_deref(),
            interval_ms,
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
