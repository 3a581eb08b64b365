//! GeoTrack CLI - Command-line interface
//!
//! This binary provides a command-line interface to the GeoTrack library:
//! replaying recorded tracks against a geofence, one-off distance and
//! containment checks, circle rasterization and config management.

mod commands;
mod error;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use geotrack::logging::{self, LogOptions};

use commands::config::ConfigCommands;
use commands::distance::DistanceArgs;
use commands::inside::InsideArgs;
use commands::polygon::PolygonArgs;
use commands::replay::ReplayArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "geotrack")]
#[command(version, about = "Live location tracking with circular geofences", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a recorded track and report geofence enter/exit events
    Replay(ReplayArgs),

    /// Great-circle distance and bearing between two points
    Distance(DistanceArgs),

    /// Check whether a point lies inside the geofence
    Inside(InsideArgs),

    /// Rasterize a circle into polygon vertices
    Polygon(PolygonArgs),

    /// View or modify configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let options = LogOptions {
        verbose: cli.verbose,
        log_file: cli.log_file.clone(),
    };
    let guard = match logging::init(&options) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", CliError::from(e));
            process::exit(1);
        }
    };

    let result = run(cli.command);

    // Flush the log file before exiting
    drop(guard);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Distance(args) => commands::distance::run(args),
        Commands::Inside(args) => commands::inside::run(args),
        Commands::Polygon(args) => commands::polygon::run(args),
        Commands::Config { command } => commands::config::run(command),
    }
}
