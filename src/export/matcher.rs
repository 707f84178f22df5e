//! Nearest-in-time matching of heart-rate samples to GPS fixes.

use crate::export::types::{HeartRateSample, LocationSample, MatchedPoint};
use chrono::{DateTime, TimeDelta, Utc};

/// Maximum time distance between a fix and a heart-rate sample for the
/// sample to be attached, in milliseconds. Inclusive.
pub const HR_MATCH_TOLERANCE_MS: i64 = 5_000;

fn time_diff(a: DateTime<Utc>, b: DateTime<Utc>) -> TimeDelta {
    (a - b).abs()
}

/// Assign the nearest-in-time heart-rate sample (within tolerance) to every
/// location sample.
///
/// Both inputs must be sorted ascending by timestamp; this is a caller
/// contract and is not re-validated here. Under that contract the nearest
/// sample for successive locations never lies behind the one found for the
/// previous location, so a single forward cursor into `hr_samples` suffices
/// and the whole pass is O(n + m).
///
/// Returns exactly one [`MatchedPoint`] per input location, in input order.
/// A location with no sample within 5 seconds gets `heart_rate_bpm: None`.
pub fn match_heart_rate(
    locations: &[LocationSample],
    hr_samples: &[HeartRateSample],
) -> Vec<MatchedPoint> {
    if locations.is_empty() {
        return Vec::new();
    }

    if hr_samples.is_empty() {
        return locations
            .iter()
            .map(|&location| MatchedPoint {
                location,
                heart_rate_bpm: None,
            })
            .collect();
    }

    let tolerance = TimeDelta::milliseconds(HR_MATCH_TOLERANCE_MS);
    let mut result = Vec::with_capacity(locations.len());
    let mut hr_index = 0;

    for &location in locations {
        // Advance only on strict improvement, so exact ties keep the
        // sample already under the cursor.
        while hr_index < hr_samples.len() - 1 {
            let current_diff = time_diff(hr_samples[hr_index].timestamp, location.timestamp);
            let next_diff = time_diff(hr_samples[hr_index + 1].timestamp, location.timestamp);
            if next_diff < current_diff {
                hr_index += 1;
            } else {
                break;
            }
        }

        let diff = time_diff(hr_samples[hr_index].timestamp, location.timestamp);
        let heart_rate_bpm = if diff <= tolerance {
            Some(hr_samples[hr_index].bpm as u8)
        } else {
            None
        };

        result.push(MatchedPoint {
            location,
            heart_rate_bpm,
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap()
    }

    fn loc_at(offset: TimeDelta) -> LocationSample {
        LocationSample {
            latitude: 37.0,
            longitude: -122.0,
            elevation: 10.0,
            timestamp: base() + offset,
        }
    }

    fn hr_at(bpm: f64, offset: TimeDelta) -> HeartRateSample {
        HeartRateSample {
            bpm,
            timestamp: base() + offset,
        }
    }

    #[test]
    fn test_empty_locations_yield_empty_output() {
        let hr = vec![hr_at(70.0, TimeDelta::seconds(0))];
        assert!(match_heart_rate(&[], &hr).is_empty());
    }

    #[test]
    fn test_empty_heart_rate_yields_all_absent() {
        let locations: Vec<_> = (0..5)
            .map(|i| loc_at(TimeDelta::seconds(i * 10)))
            .collect();
        let matched = match_heart_rate(&locations, &[]);
        assert_eq!(matched.len(), 5);
        assert!(matched.iter().all(|p| p.heart_rate_bpm.is_none()));
    }

    #[test]
    fn test_one_output_per_location_in_order() {
        let locations: Vec<_> = (0..20)
            .map(|i| loc_at(TimeDelta::seconds(i * 7)))
            .collect();
        let hr: Vec<_> = (0..6)
            .map(|i| hr_at(100.0 + i as f64, TimeDelta::seconds(i * 25)))
            .collect();
        let matched = match_heart_rate(&locations, &hr);
        assert_eq!(matched.len(), locations.len());
        for (point, location) in matched.iter().zip(&locations) {
            assert_eq!(point.location, *location);
        }
    }

    #[test]
    fn test_tolerance_boundary_inclusive() {
        let locations = vec![loc_at(TimeDelta::seconds(0))];

        let exactly_5s = vec![hr_at(120.0, TimeDelta::milliseconds(5_000))];
        let matched = match_heart_rate(&locations, &exactly_5s);
        assert_eq!(matched[0].heart_rate_bpm, Some(120));

        let just_over = vec![hr_at(120.0, TimeDelta::microseconds(5_000_001))];
        let matched = match_heart_rate(&locations, &just_over);
        assert_eq!(matched[0].heart_rate_bpm, None);
    }

    #[test]
    fn test_tie_break_keeps_sample_under_cursor() {
        // Samples at t-2s and t+2s are equidistant from the location.
        let locations = vec![loc_at(TimeDelta::seconds(10))];
        let hr = vec![
            hr_at(90.0, TimeDelta::seconds(8)),
            hr_at(150.0, TimeDelta::seconds(12)),
        ];
        let matched = match_heart_rate(&locations, &hr);
        assert_eq!(matched[0].heart_rate_bpm, Some(90));
    }

    #[test]
    fn test_cursor_never_moves_backward() {
        // Second location is closest to the first sample again, but the
        // cursor has already advanced past it.
        let locations = vec![loc_at(TimeDelta::seconds(0)), loc_at(TimeDelta::seconds(1))];
        let hr = vec![
            hr_at(80.0, TimeDelta::seconds(0)),
            hr_at(85.0, TimeDelta::seconds(100)),
        ];
        let matched = match_heart_rate(&locations, &hr);
        assert_eq!(matched[0].heart_rate_bpm, Some(80));
        assert_eq!(matched[1].heart_rate_bpm, Some(80));
    }

    #[test]
    fn test_fractional_bpm_truncates() {
        let locations = vec![loc_at(TimeDelta::seconds(0))];
        let hr = vec![hr_at(142.9, TimeDelta::seconds(1))];
        let matched = match_heart_rate(&locations, &hr);
        assert_eq!(matched[0].heart_rate_bpm, Some(142));
    }

    #[test]
    fn test_two_points_two_samples_example() {
        let locations = vec![
            loc_at(TimeDelta::seconds(0)),
            LocationSample {
                latitude: 37.001,
                longitude: -122.001,
                elevation: 11.0,
                timestamp: base() + TimeDelta::seconds(10),
            },
        ];
        let hr = vec![
            hr_at(72.0, TimeDelta::seconds(1)),
            hr_at(75.0, TimeDelta::seconds(9)),
        ];
        let matched = match_heart_rate(&locations, &hr);
        assert_eq!(matched[0].heart_rate_bpm, Some(72));
        assert_eq!(matched[1].heart_rate_bpm, Some(75));
    }
}
