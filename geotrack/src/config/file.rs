//! INI-backed configuration file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use tracing::{debug, warn};

use super::{ConfigError, ConfigKey};
use crate::coord::{CircleRegion, Coordinate};
use crate::geometry::DEFAULT_POLYGON_POINTS;
use crate::provider::{WatchOptions, DEFAULT_DISTANCE_FILTER_M};
use crate::session::Destination;

/// Default geofence center latitude.
pub const DEFAULT_FENCE_LAT: f64 = 37.43311575;

/// Default geofence center longitude.
pub const DEFAULT_FENCE_LON: f64 = -122.24044723;

/// Default geofence radius in meters.
pub const DEFAULT_FENCE_RADIUS_M: f64 = 3000.0;

/// Default destination marker position.
pub const DEFAULT_DESTINATION: Coordinate = Coordinate::new(37.78825, -122.4324);

/// Default destination ring radius (km).
pub const DEFAULT_DESTINATION_RADIUS_KM: f64 = 1.0;

/// Default destination ring vertex count.
pub const DEFAULT_DESTINATION_POINTS: usize = 100;

/// `[fence]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct FenceSettings {
    pub center_lat: f64,
    pub center_lon: f64,
    pub radius_m: f64,
}

impl Default for FenceSettings {
    fn default() -> Self {
        Self {
            center_lat: DEFAULT_FENCE_LAT,
            center_lon: DEFAULT_FENCE_LON,
            radius_m: DEFAULT_FENCE_RADIUS_M,
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchSettings {
    pub high_accuracy: bool,
    pub distance_filter_m: f64,
    pub maximum_age_ms: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            distance_filter_m: DEFAULT_DISTANCE_FILTER_M,
            maximum_age_ms: 1000,
        }
    }
}

/// `[render]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub polygon_points: usize,
    pub destination_lat: f64,
    pub destination_lon: f64,
    pub destination_radius_km: f64,
    pub destination_points: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            polygon_points: DEFAULT_POLYGON_POINTS,
            destination_lat: DEFAULT_DESTINATION.latitude,
            destination_lon: DEFAULT_DESTINATION.longitude,
            destination_radius_km: DEFAULT_DESTINATION_RADIUS_KM,
            destination_points: DEFAULT_DESTINATION_POINTS,
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub fence: FenceSettings,
    pub watch: WatchSettings,
    pub render: RenderSettings,
}

/// Location of the user's config file.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("geotrack").join("config.ini"))
        .ok_or(ConfigError::NoConfigDir)
}

impl ConfigFile {
    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path()?)
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
            ini::Error::Parse(e) => ConfigError::Parse(e.to_string()),
        })?;
        Self::from_ini(&ini)
    }

    /// Parse INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                key.set(&mut config, value)?;
            }
        }

        for (section, properties) in ini.iter() {
            for (name, _) in properties.iter() {
                let full = format!("{}.{}", section.unwrap_or_default(), name);
                if full.parse::<ConfigKey>().is_err() {
                    warn!(key = %full, "Ignoring unknown config key");
                }
            }
        }

        Ok(config)
    }

    /// Render as INI.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini
    }

    /// Save to the default location, creating the directory if needed.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating parent directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        self.to_ini().write_to_file(path).map_err(io_err)
    }

    /// The configured geofence.
    pub fn region(&self) -> Result<CircleRegion, ConfigError> {
        let center = Coordinate::checked(self.fence.center_lat, self.fence.center_lon).map_err(
            |e| ConfigError::InvalidValue {
                key: "fence",
                value: format!("{}, {}", self.fence.center_lat, self.fence.center_lon),
                reason: e.to_string(),
            },
        )?;
        CircleRegion::new(center, self.fence.radius_m).map_err(|e| ConfigError::InvalidValue {
            key: ConfigKey::FenceRadiusM.name(),
            value: self.fence.radius_m.to_string(),
            reason: e.to_string(),
        })
    }

    /// Options for the location provider.
    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions::default()
            .with_high_accuracy(self.watch.high_accuracy)
            .with_distance_filter_m(self.watch.distance_filter_m)
            .with_maximum_age(Duration::from_millis(self.watch.maximum_age_ms))
    }

    /// The destination overlay.
    pub fn destination(&self) -> Destination {
        Destination {
            position: Coordinate::new(self.render.destination_lat, self.render.destination_lon),
            ring_radius_km: self.render.destination_radius_km,
            ring_points: self.render.destination_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_screen() {
        let config = ConfigFile::default();
        let region = config.region().unwrap();
        assert_eq!(region.center(), Coordinate::new(37.43311575, -122.24044723));
        assert_eq!(region.radius_m(), 3000.0);

        let options = config.watch_options();
        assert!(options.enable_high_accuracy);
        assert_eq!(options.distance_filter_m, 10.0);
        assert_eq!(options.maximum_age, Duration::from_millis(1000));

        let destination = config.destination();
        assert_eq!(destination.position, Coordinate::new(37.78825, -122.4324));
        assert_eq!(destination.ring_points, 100);
    }

    #[test]
    fn test_from_ini_str_partial() {
        let config = ConfigFile::from_ini_str("[fence]\nradius_m = 500\n").unwrap();
        assert_eq!(config.fence.radius_m, 500.0);
        assert_eq!(config.fence.center_lat, DEFAULT_FENCE_LAT);
    }

    #[test]
    fn test_from_ini_str_invalid_value() {
        let result = ConfigFile::from_ini_str("[render]\npolygon_points = 1\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = ConfigFile::from_ini_str("[fence]\ncolour = red\n").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.fence.radius_m = 750.0;
        config.watch.high_accuracy = false;
        config.render.polygon_points = 24;
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ConfigFile::load_from(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(loaded, ConfigFile::default());
    }
}
