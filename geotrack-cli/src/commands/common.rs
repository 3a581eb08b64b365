//! Common types and utilities shared across CLI commands.

use std::fs;
use std::path::Path;

use clap::Args;
use geotrack::config::ConfigFile;
use geotrack::coord::{CircleRegion, Coordinate};

use crate::error::CliError;

/// Geofence overrides. Unset values fall back to the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct FenceArgs {
    /// Fence center latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub center_lat: Option<f64>,

    /// Fence center longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub center_lon: Option<f64>,

    /// Fence radius in meters
    #[arg(long)]
    pub radius_m: Option<f64>,
}

impl FenceArgs {
    /// Resolve the fence center: CLI > config.
    pub fn center(&self, config: &ConfigFile) -> Result<Coordinate, CliError> {
        let lat = self.center_lat.unwrap_or(config.fence.center_lat);
        let lon = self.center_lon.unwrap_or(config.fence.center_lon);
        Ok(Coordinate::checked(lat, lon)?)
    }

    /// Resolve the full region: CLI > config.
    pub fn resolve(&self, config: &ConfigFile) -> Result<CircleRegion, CliError> {
        let center = self.center(config)?;
        let radius_m = self.radius_m.unwrap_or(config.fence.radius_m);
        Ok(CircleRegion::new(center, radius_m)?)
    }
}

/// Load the user's config file, falling back to defaults if absent.
pub fn load_config() -> Result<ConfigFile, CliError> {
    Ok(ConfigFile::load()?)
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<(), CliError> {
    let output_err = |e: std::io::Error| CliError::Output {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(output_err)?;
    }
    fs::write(path, contents).map_err(output_err)
}
