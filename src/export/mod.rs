//! Activity export: heart-rate matching and GPX serialization.

pub mod exporter_gpx;
pub mod matcher;
pub mod summary;
pub mod types;

pub use exporter_gpx::{
    export_activity, export_gpx, export_gpx_named, export_gpx_to_file, generate_gpx_filename,
};
pub use matcher::{match_heart_rate, HR_MATCH_TOLERANCE_MS};
pub use summary::average_heart_rate;
pub use types::{Activity, ExportError, GpxExport, HeartRateSample, LocationSample, MatchedPoint};
