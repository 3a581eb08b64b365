//! Loading recorded tracks for replay.
//!
//! Two formats are accepted:
//!
//! - **CSV**: a header containing `latitude` and `longitude` columns (any
//!   order, extra columns ignored). Blank lines and lines starting with `#`
//!   are skipped.
//! - **JSON**: an array of `{ "latitude": .., "longitude": .. }` objects.
//!
//! Files ending in `.json` are parsed as JSON, everything else as CSV.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::coord::{CoordError, Coordinate};

/// Errors that can occur while loading a track file.
#[derive(Debug, Error)]
pub enum TrackFileError {
    /// The file could not be read.
    #[error("Failed to read track file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV header lacks a required column.
    #[error("Track CSV header is missing the '{0}' column")]
    MissingColumn(&'static str),

    /// The CSV has no header line.
    #[error("Track CSV is empty")]
    Empty,

    /// A CSV row could not be parsed.
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A row parsed but holds an out-of-range coordinate.
    #[error("Line {line}: {source}")]
    InvalidCoordinate {
        line: usize,
        #[source]
        source: CoordError,
    },

    /// JSON decoding failed.
    #[error("Invalid track JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load a track from disk, choosing the format by extension.
pub fn load_track(path: &Path) -> Result<Vec<Coordinate>, TrackFileError> {
    let contents = fs::read_to_string(path).map_err(|source| TrackFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        parse_track_json(&contents)
    } else {
        parse_track_csv(&contents)
    }
}

/// Parse a CSV track.
pub fn parse_track_csv(contents: &str) -> Result<Vec<Coordinate>, TrackFileError> {
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let (_, header) = lines.next().ok_or(TrackFileError::Empty)?;
    let columns: Vec<String> = header
        .split(',')
        .map(|c| c.trim().to_ascii_lowercase())
        .collect();

    let lat_index = column_index(&columns, &["latitude", "lat"])
        .ok_or(TrackFileError::MissingColumn("latitude"))?;
    let lon_index = column_index(&columns, &["longitude", "lon", "lng"])
        .ok_or(TrackFileError::MissingColumn("longitude"))?;

    lines
        .map(|(line, row)| {
            let fields: Vec<&str> = row.split(',').map(str::trim).collect();
            let latitude = parse_field(&fields, lat_index, "latitude", line)?;
            let longitude = parse_field(&fields, lon_index, "longitude", line)?;
            Coordinate::checked(latitude, longitude)
                .map_err(|source| TrackFileError::InvalidCoordinate { line, source })
        })
        .collect()
}

/// Parse a JSON track.
pub fn parse_track_json(contents: &str) -> Result<Vec<Coordinate>, TrackFileError> {
    let coordinates: Vec<Coordinate> = serde_json::from_str(contents)?;
    coordinates
        .into_iter()
        .enumerate()
        .map(|(index, c)| {
            Coordinate::checked(c.latitude, c.longitude).map_err(|source| {
                TrackFileError::InvalidCoordinate {
                    line: index + 1,
                    source,
                }
            })
        })
        .collect()
}

fn column_index(columns: &[String], names: &[&str]) -> Option<usize> {
    columns.iter().position(|c| names.contains(&c.as_str()))
}

fn parse_field(
    fields: &[&str],
    index: usize,
    name: &str,
    line: usize,
) -> Result<f64, TrackFileError> {
    let raw = fields.get(index).ok_or_else(|| TrackFileError::Parse {
        line,
        message: format!("missing {} field", name),
    })?;
    raw.parse::<f64>().map_err(|_| TrackFileError::Parse {
        line,
        message: format!("invalid {} '{}'", name, raw),
    })
}
