//! Display summaries for recorded activities.

use crate::export::types::{Activity, HeartRateSample};

/// Average heart rate over an activity's samples, in whole BPM.
///
/// Returns `None` for an empty slice.
pub fn average_heart_rate(samples: &[HeartRateSample]) -> Option<u8> {
    if samples.is_empty() {
        return None;
    }
    let total: f64 = samples.iter().map(|s| s.bpm).sum();
    Some((total / samples.len() as f64) as u8)
}

impl Activity {
    /// Distance as "12.3 km".
    pub fn formatted_distance(&self) -> String {
        format!("{:.1} km", self.distance_meters / 1000.0)
    }

    /// Duration as "H:MM:SS".
    pub fn formatted_duration(&self) -> String {
        let hours = self.duration_seconds / 3600;
        let minutes = (self.duration_seconds % 3600) / 60;
        let seconds = self.duration_seconds % 60;
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    }
}
