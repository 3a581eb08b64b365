//! Replay command - run a recorded track through a tracking session.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use geotrack::config::ConfigFile;
use geotrack::coord::CircleRegion;
use geotrack::provider::{load_track, ReplayProvider, WatchOptions};
use geotrack::session::{TrackingEvent, TrackingSession};
use geotrack::surface::GeoJsonSurface;
use geotrack::track::TrackSnapshot;
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};

use super::common::{load_config, write_output, FenceArgs};
use crate::error::CliError;

/// Arguments for the replay command.
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Track file (.csv with latitude/longitude columns, or .json)
    pub track: PathBuf,

    #[command(flatten)]
    pub fence: FenceArgs,

    /// Minimum movement in meters before a fix is delivered
    #[arg(long)]
    pub distance_filter_m: Option<f64>,

    /// Delay between replayed fixes in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub interval_ms: u64,

    /// Write the final map scene as GeoJSON to this file
    #[arg(long, value_name = "FILE")]
    pub geojson: Option<PathBuf>,
}

/// Run the replay command.
pub fn run(args: ReplayArgs) -> Result<(), CliError> {
    let config = load_config()?;
    let region = args.fence.resolve(&config)?;
    let options = resolve_options(args.distance_filter_m, &config)?;

    let fixes = load_track(&args.track)?;
    info!(path = %args.track.display(), fixes = fixes.len(), "Loaded track");

    let runtime = tokio::runtime::Runtime::new().map_err(|e| CliError::Runtime(e.to_string()))?;
    runtime.block_on(replay(args, config, region, options, fixes))
}

/// Resolve watch options: CLI > config.
fn resolve_options(
    distance_filter_m: Option<f64>,
    config: &ConfigFile,
) -> Result<WatchOptions, CliError> {
    let options = config.watch_options();
    match distance_filter_m {
        Some(meters) if !meters.is_finite() || meters < 0.0 => Err(CliError::Config(format!(
            "distance filter must not be negative, got {}",
            meters
        ))),
        Some(meters) => Ok(options.with_distance_filter_m(meters)),
        None => Ok(options),
    }
}

async fn replay(
    args: ReplayArgs,
    config: ConfigFile,
    region: CircleRegion,
    options: WatchOptions,
    fixes: Vec<geotrack::coord::Coordinate>,
) -> Result<(), CliError> {
    let total = fixes.len();
    let provider = Arc::new(ReplayProvider::with_interval(
        fixes,
        Duration::from_millis(args.interval_ms),
    ));
    let surface = Arc::new(GeoJsonSurface::new());
    let session = TrackingSession::builder(provider, region)
        .options(options.clone())
        .surface(surface.clone())
        .destination(config.destination())
        .polygon_points(config.render.polygon_points)
        .build();
    session.render_overlay()?;

    let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel();
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    println!("GeoTrack Replay v{}", geotrack::VERSION);
    println!("==================");
    println!();
    println!("Track:    {} ({} fixes)", args.track.display(), total);
    println!("Fence:    {}", region);
    println!("Filter:   {} m", options.distance_filter_m);
    println!("Interval: {} ms", args.interval_ms);
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let mut events = session.subscribe();
    session.start()?;

    let outcome = loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(TrackingEvent::StreamEnded) => {
                    println!("Track finished.");
                    break Ok(());
                }
                Ok(TrackingEvent::Error(error)) => break Err(CliError::Provider(error)),
                Ok(event) => println!("  {}", event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break Ok(()),
            },
            _ = shutdown_rx.recv() => {
                println!();
                println!("Received shutdown signal, stopping...");
                break Ok(());
            }
        }
    };

    print_summary(&session.snapshot());

    if let Some(path) = &args.geojson {
        let text = surface.to_string_pretty().map_err(|e| CliError::Output {
            path: path.clone(),
            message: e.to_string(),
        })?;
        write_output(path, &text)?;
        println!("Scene written to {}", path.display());
    }

    session.stop();
    outcome
}

fn print_summary(snapshot: &TrackSnapshot) {
    println!();
    println!("Session Summary");
    println!("───────────────");
    println!("  Fixes recorded: {}", snapshot.path.len());
    println!("  Distance:       {:.1} m", snapshot.length_m);
    match snapshot.position {
        Some(position) => println!("  Last position:  {}", position),
        None => println!("  Last position:  (none)"),
    }
    if let Some(heading) = snapshot.heading_deg {
        println!("  Heading:        {:.0}°", heading);
    }
    println!(
        "  Status:         {}",
        if snapshot.inside { "inside" } else { "outside" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_options_uses_config() {
        let mut config = ConfigFile::default();
        config.watch.distance_filter_m = 25.0;
        let options = resolve_options(None, &config).unwrap();
        assert_eq!(options.distance_filter_m, 25.0);
    }

    #[test]
    fn test_resolve_options_cli_overrides() {
        let config = ConfigFile::default();
        let options = resolve_options(Some(0.0), &config).unwrap();
        assert_eq!(options.distance_filter_m, 0.0);
    }

    #[test]
    fn test_resolve_options_rejects_negative() {
        let config = ConfigFile::default();
        assert!(matches!(
            resolve_options(Some(-1.0), &config),
            Err(CliError::Config(_))
        ));
    }
}
