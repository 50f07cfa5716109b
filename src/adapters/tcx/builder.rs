//! Builds TCX documents from workout records

use super::document::{Activity, Creator, Lap, TrainingCenterDatabase, Trackpoint};
use crate::domain::{TrackPoint, WorkoutRecord};

/// Which document variant to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartRateMode {
    /// Lap averages and per-point heart rate are written
    Include,
    /// No heart-rate element appears anywhere in the document
    Omit,
}

impl HeartRateMode {
    /// The variant a record is written as
    pub fn for_record(record: &WorkoutRecord) -> Self {
        if record.has_heart_rate() {
            Self::Include
        } else {
            Self::Omit
        }
    }
}

/// Assembles [`TrainingCenterDatabase`] trees
///
/// # Examples
///
/// ```
/// use healthtcx::adapters::tcx::{DocumentBuilder, HeartRateMode};
/// use healthtcx::domain::{SportCategory, WorkoutRecord};
/// use chrono::DateTime;
///
/// let record = WorkoutRecord::builder()
///     .sport(SportCategory::Walking)
///     .start_time(DateTime::parse_from_rfc3339("2024-01-16T14:00:00+00:00").unwrap())
///     .end_time(DateTime::parse_from_rfc3339("2024-01-16T14:45:00+00:00").unwrap())
///     .duration_minutes(45.0)
///     .build()
///     .unwrap();
///
/// let document = DocumentBuilder::new("Apple Watch").build_document(&record, &[], HeartRateMode::Omit);
/// assert_eq!(document.activity.lap.total_time_seconds, 2700.0);
/// assert!(document.activity.lap.track.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    creator_name: String,
}

impl DocumentBuilder {
    pub fn new(creator_name: impl Into<String>) -> Self {
        Self {
            creator_name: creator_name.into(),
        }
    }

    /// Builds the document for one workout
    ///
    /// With [`HeartRateMode::Include`] and no heart-rate summary on the record,
    /// no heart-rate elements are produced either.
    pub fn build_document(
        &self,
        record: &WorkoutRecord,
        points: &[TrackPoint],
        mode: HeartRateMode,
    ) -> TrainingCenterDatabase {
        let heart_rate = match mode {
            HeartRateMode::Include => record.heart_rate,
            HeartRateMode::Omit => None,
        };
        // Every point carries the workout-wide average; the archive has no per-point samples
        let point_heart_rate = heart_rate.map(|hr| hr.avg as i64);

        let lap = Lap {
            start_time: record.start_time,
            total_time_seconds: record.duration_minutes * 60.0,
            distance_meters: record.distance_km.map(|km| km * 1000.0),
            calories: record.calories.map(|kcal| kcal as i64),
            average_heart_rate_bpm: heart_rate.map(|hr| hr.avg as i64),
            maximum_heart_rate_bpm: heart_rate.map(|hr| hr.max),
            track: points
                .iter()
                .map(|point| Trackpoint {
                    time: point.timestamp,
                    latitude_degrees: point.latitude,
                    longitude_degrees: point.longitude,
                    altitude_meters: point.elevation_m,
                    heart_rate_bpm: point_heart_rate,
                })
                .collect(),
        };

        TrainingCenterDatabase {
            activity: Activity {
                sport: record.sport,
                id: record.start_time,
                lap,
                creator: Creator {
                    name: self.creator_name.clone(),
                    unit_id: 0,
                    product_id: 0,
                },
            },
        }
    }
}
