//! RideGPX - GPX export for recorded outdoor cycling rides
//!
//! Correlates two independently sampled time series from a recorded ride
//! (GPS fixes and heart-rate measurements) and serializes the merged result
//! as a GPX 1.1 track file with Garmin TrackPointExtension heart-rate data.
//!
//! The matcher and serializer are stateless pure functions; callers supply
//! time-sorted sample sequences and persist the returned document text.

pub mod export;

// Re-export commonly used items
pub use export::exporter_gpx::{export_activity, export_gpx, export_gpx_to_file};
pub use export::matcher::match_heart_rate;
pub use export::types::{
    Activity, ExportError, GpxExport, HeartRateSample, LocationSample, MatchedPoint,
};
