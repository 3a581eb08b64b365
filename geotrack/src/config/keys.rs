//! Typed configuration keys for `config get/set/list`.

use std::str::FromStr;

use super::{ConfigError, ConfigFile};
use crate::coord::Coordinate;
use crate::geometry::MIN_POLYGON_POINTS;

/// A single configurable setting, addressed as `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    FenceCenterLat,
    FenceCenterLon,
    FenceRadiusM,
    WatchHighAccuracy,
    WatchDistanceFilterM,
    WatchMaximumAgeMs,
    RenderPolygonPoints,
    RenderDestinationLat,
    RenderDestinationLon,
    RenderDestinationRadiusKm,
    RenderDestinationPoints,
}

const ALL_KEYS: &[ConfigKey] = &[
    ConfigKey::FenceCenterLat,
    ConfigKey::FenceCenterLon,
    ConfigKey::FenceRadiusM,
    ConfigKey::WatchHighAccuracy,
    ConfigKey::WatchDistanceFilterM,
    ConfigKey::WatchMaximumAgeMs,
    ConfigKey::RenderPolygonPoints,
    ConfigKey::RenderDestinationLat,
    ConfigKey::RenderDestinationLon,
    ConfigKey::RenderDestinationRadiusKm,
    ConfigKey::RenderDestinationPoints,
];

impl ConfigKey {
    /// Every key, in display order.
    pub fn all() -> &'static [ConfigKey] {
        ALL_KEYS
    }

    /// Full `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::FenceCenterLat => "fence.center_lat",
            ConfigKey::FenceCenterLon => "fence.center_lon",
            ConfigKey::FenceRadiusM => "fence.radius_m",
            ConfigKey::WatchHighAccuracy => "watch.high_accuracy",
            ConfigKey::WatchDistanceFilterM => "watch.distance_filter_m",
            ConfigKey::WatchMaximumAgeMs => "watch.maximum_age_ms",
            ConfigKey::RenderPolygonPoints => "render.polygon_points",
            ConfigKey::RenderDestinationLat => "render.destination_lat",
            ConfigKey::RenderDestinationLon => "render.destination_lon",
            ConfigKey::RenderDestinationRadiusKm => "render.destination_radius_km",
            ConfigKey::RenderDestinationPoints => "render.destination_points",
        }
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        self.split().0
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        self.split().1
    }

    fn split(&self) -> (&'static str, &'static str) {
        let name = self.name();
        name.split_once('.').unwrap_or((name, ""))
    }

    /// Current value as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::FenceCenterLat => config.fence.center_lat.to_string(),
            ConfigKey::FenceCenterLon => config.fence.center_lon.to_string(),
            ConfigKey::FenceRadiusM => config.fence.radius_m.to_string(),
            ConfigKey::WatchHighAccuracy => config.watch.high_accuracy.to_string(),
            ConfigKey::WatchDistanceFilterM => config.watch.distance_filter_m.to_string(),
            ConfigKey::WatchMaximumAgeMs => config.watch.maximum_age_ms.to_string(),
            ConfigKey::RenderPolygonPoints => config.render.polygon_points.to_string(),
            ConfigKey::RenderDestinationLat => config.render.destination_lat.to_string(),
            ConfigKey::RenderDestinationLon => config.render.destination_lon.to_string(),
            ConfigKey::RenderDestinationRadiusKm => config.render.destination_radius_km.to_string(),
            ConfigKey::RenderDestinationPoints => config.render.destination_points.to_string(),
        }
    }

    /// Parse and validate `value`, then store it.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::FenceCenterLat => config.fence.center_lat = self.latitude(value)?,
            ConfigKey::FenceCenterLon => config.fence.center_lon = self.longitude(value)?,
            ConfigKey::FenceRadiusM => config.fence.radius_m = self.positive(value)?,
            ConfigKey::WatchHighAccuracy => config.watch.high_accuracy = self.boolean(value)?,
            ConfigKey::WatchDistanceFilterM => {
                config.watch.distance_filter_m = self.non_negative(value)?
            }
            ConfigKey::WatchMaximumAgeMs => config.watch.maximum_age_ms = self.parse(value)?,
            ConfigKey::RenderPolygonPoints => config.render.polygon_points = self.points(value)?,
            ConfigKey::RenderDestinationLat => {
                config.render.destination_lat = self.latitude(value)?
            }
            ConfigKey::RenderDestinationLon => {
                config.render.destination_lon = self.longitude(value)?
            }
            ConfigKey::RenderDestinationRadiusKm => {
                config.render.destination_radius_km = self.positive(value)?
            }
            ConfigKey::RenderDestinationPoints => {
                config.render.destination_points = self.points(value)?
            }
        }
        Ok(())
    }

    fn invalid(&self, value: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    fn parse<T: FromStr>(&self, value: &str) -> Result<T, ConfigError> {
        value
            .parse()
            .map_err(|_| self.invalid(value, "not a valid number"))
    }

    fn latitude(&self, value: &str) -> Result<f64, ConfigError> {
        let lat: f64 = self.parse(value)?;
        Coordinate::checked(lat, 0.0)
            .map(|_| lat)
            .map_err(|e| self.invalid(value, e.to_string()))
    }

    fn longitude(&self, value: &str) -> Result<f64, ConfigError> {
        let lon: f64 = self.parse(value)?;
        Coordinate::checked(0.0, lon)
            .map(|_| lon)
            .map_err(|e| self.invalid(value, e.to_string()))
    }

    fn positive(&self, value: &str) -> Result<f64, ConfigError> {
        let v: f64 = self.parse(value)?;
        if v.is_finite() && v > 0.0 {
            Ok(v)
        } else {
            Err(self.invalid(value, "must be greater than zero"))
        }
    }

    fn non_negative(&self, value: &str) -> Result<f64, ConfigError> {
        let v: f64 = self.parse(value)?;
        if v.is_finite() && v >= 0.0 {
            Ok(v)
        } else {
            Err(self.invalid(value, "must not be negative"))
        }
    }

    fn points(&self, value: &str) -> Result<usize, ConfigError> {
        let v: usize = self.parse(value)?;
        if v >= MIN_POLYGON_POINTS {
            Ok(v)
        } else {
            Err(self.invalid(value, format!("must be at least {}", MIN_POLYGON_POINTS)))
        }
    }

    fn boolean(&self, value: &str) -> Result<bool, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(self.invalid(value, "expected true or false")),
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ALL_KEYS
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
