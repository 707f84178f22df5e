//! Data and error types for activity export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A single GPS fix from a recorded ride.
///
/// Sequences handed to the matcher are sorted ascending by `timestamp`
/// (route segments are concatenated and time-sorted by the data provider).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Elevation in meters
    pub elevation: f64,
    /// Absolute instant of the fix
    pub timestamp: DateTime<Utc>,
}

/// A single heart-rate measurement.
///
/// The magnitude is a raw sensor reading; truncation to whole beats happens
/// when a sample is attached to a track point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    /// Beats per minute as reported by the sensor
    pub bpm: f64,
    /// Absolute instant of the measurement
    pub timestamp: DateTime<Utc>,
}

/// A location sample paired with an optional co-temporal heart-rate reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchedPoint {
    /// The GPS fix
    pub location: LocationSample,
    /// Heart rate in whole BPM, if a sample fell within tolerance
    pub heart_rate_bpm: Option<u8>,
}

/// Summary of one recorded cycling activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique activity identifier
    pub id: Uuid,
    /// Activity start time
    pub started_at: DateTime<Utc>,
    /// Total distance in meters
    pub distance_meters: f64,
    /// Total duration in seconds
    pub duration_seconds: u32,
    /// Average heart rate over the activity
    pub avg_hr: Option<u8>,
}

impl Activity {
    /// Create a new activity starting now.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            distance_meters: 0.0,
            duration_seconds: 0,
            avg_hr: None,
        }
    }
}

impl Default for Activity {
    fn default() -> Self {
        Self::new()
    }
}

/// A serialized GPX document ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct GpxExport {
    /// Suggested filename (`workout_<local date-time>.gpx`)
    pub filename: String,
    /// The GPX document text
    pub xml: String,
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// XML generation error
    #[error("XML error: {0}")]
    XmlError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
