//! CLI error type.

use std::fmt;
use std::path::PathBuf;

use geotrack::config::ConfigError;
use geotrack::coord::CoordError;
use geotrack::geometry::GeometryError;
use geotrack::logging::LoggingError;
use geotrack::provider::{ProviderError, TrackFileError};
use geotrack::session::SessionError;

/// Errors surfaced to the user. Every variant exits with status 1.
#[derive(Debug)]
pub enum CliError {
    /// Invalid argument or setting.
    Config(String),

    /// Loading or saving the config file failed.
    ConfigFile(ConfigError),

    /// The track file could not be loaded.
    TrackFile(TrackFileError),

    /// The session could not start.
    Session(SessionError),

    /// The location stream failed mid-replay.
    Provider(ProviderError),

    /// Invalid geometry parameters.
    Geometry(GeometryError),

    /// Invalid coordinate.
    Coordinate(CoordError),

    /// Logging could not be initialised.
    Logging(LoggingError),

    /// Writing an output file failed.
    Output { path: PathBuf, message: String },

    /// Failed to create the Tokio runtime.
    Runtime(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::TrackFile(e) => write!(f, "{}", e),
            CliError::Session(e) => write!(f, "{}", e),
            CliError::Provider(e) => write!(f, "Location stream failed: {}", e),
            CliError::Geometry(e) => write!(f, "{}", e),
            CliError::Coordinate(e) => write!(f, "{}", e),
            CliError::Logging(e) => write!(f, "{}", e),
            CliError::Output { path, message } => {
                write!(f, "Failed to write {}: {}", path.display(), message)
            }
            CliError::Runtime(msg) => write!(f, "Failed to create Tokio runtime: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::TrackFile(e) => Some(e),
            CliError::Session(e) => Some(e),
            CliError::Provider(e) => Some(e),
            CliError::Geometry(e) => Some(e),
            CliError::Coordinate(e) => Some(e),
            CliError::Logging(e) => Some(e),
            CliError::Config(_) | CliError::Output { .. } | CliError::Runtime(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<TrackFileError> for CliError {
    fn from(e: TrackFileError) -> Self {
        CliError::TrackFile(e)
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        CliError::Session(e)
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Provider(e)
    }
}

impl From<GeometryError> for CliError {
    fn from(e: GeometryError) -> Self {
        CliError::Geometry(e)
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::Coordinate(e)
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}
