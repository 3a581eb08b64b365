//! Configuration file support.
//!
//! Settings live in an INI file at `<config dir>/geotrack/config.ini`
//! (`~/.config/geotrack/config.ini` on Linux). A missing file means defaults.
//!
//! # Example Configuration
//!
//! ```ini
//! [fence]
//! center_lat = 37.43311575
//! center_lon = -122.24044723
//! radius_m = 3000
//!
//! [watch]
//! high_accuracy = true
//! distance_filter_m = 10
//! maximum_age_ms = 1000
//!
//! [render]
//! polygon_points = 60
//! destination_lat = 37.78825
//! destination_lon = -122.4324
//! destination_radius_km = 1
//! destination_points = 100
//! ```

mod file;
mod keys;

pub use file::{config_file_path, ConfigFile, FenceSettings, RenderSettings, WatchSettings};
pub use keys::ConfigKey;

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, saving or editing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("Config file I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid INI.
    #[error("Failed to parse config file: {0}")]
    Parse(String),

    /// A value could not be parsed or is out of range.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// The key is not a known setting.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// The platform has no config directory.
    #[error("Could not determine the user config directory")]
    NoConfigDir,
}
