//! Tessera CLI: simulation, benchmarking, and debugging.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(version, about = "Tessera: XPBD soft-body simulation with GJK/EPA collisions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single scenario and print a summary.
    Simulate {
        /// Scenario to run (falling_cube, cube_stack, overlapping_cubes).
        #[arg(short, long, default_value = "falling_cube")]
        scenario: String,

        /// Solver config (TOML). Replaces the scenario's own config.
        #[arg(short, long)]
        config: Option<String>,

        /// Number of steps. Defaults to the scenario's length.
        #[arg(long)]
        steps: Option<u32>,

        /// Write the final state as a binary snapshot.
        #[arg(long)]
        snapshot: Option<String>,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (falling_cube, cube_stack, overlapping_cubes, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a solver config (.toml) or body description (.json).
    Validate {
        /// Path to config or body file.
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            scenario,
            config,
            steps,
            snapshot,
        } => commands::simulate(&scenario, config.as_deref(), steps, snapshot.as_deref()),
        Commands::Benchmark { scenario, output } => commands::benchmark(&scenario, output.as_deref()),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
