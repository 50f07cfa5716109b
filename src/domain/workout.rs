//! Workout domain model
//!
//! A [`WorkoutRecord`] is the normalised form of one qualifying `Workout` entry
//! from the Health archive. Every statistic the archive may omit is an `Option`.

use super::sport::SportCategory;
use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;

/// Heart-rate statistics for a whole workout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartRateSummary {
    /// Average beats per minute
    pub avg: f64,
    /// Minimum beats per minute
    pub min: i64,
    /// Maximum beats per minute
    pub max: i64,
}

/// One normalised workout
///
/// # Examples
///
/// ```
/// use healthtcx::domain::{SportCategory, WorkoutRecordBuilder};
/// use chrono::DateTime;
///
/// let start = DateTime::parse_from_rfc3339("2024-01-15T10:00:00+00:00").unwrap();
/// let end = DateTime::parse_from_rfc3339("2024-01-15T10:30:00+00:00").unwrap();
///
/// let record = WorkoutRecordBuilder::new()
///     .sport(SportCategory::Running)
///     .start_time(start)
///     .end_time(end)
///     .duration_minutes(30.0)
///     .distance_km(5.0)
///     .build()
///     .unwrap();
///
/// assert!(record.heart_rate.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    /// TCX sport category (fallback already applied)
    pub sport: SportCategory,

    /// Start instant, in the offset recorded by the device
    pub start_time: DateTime<FixedOffset>,

    /// End instant, in the offset recorded by the device
    pub end_time: DateTime<FixedOffset>,

    /// Workout duration in minutes
    pub duration_minutes: f64,

    /// Heart-rate statistics, if the archive had any
    pub heart_rate: Option<HeartRateSummary>,

    /// Walking/running distance in kilometres
    pub distance_km: Option<f64>,

    /// Active energy burned in kilocalories
    pub calories: Option<f64>,

    /// Elevation ascended in metres
    pub elevation_gain_m: Option<f64>,

    /// Resolved path of the GPX route file
    pub track_file: Option<PathBuf>,
}

impl WorkoutRecord {
    /// Creates a new builder for constructing a WorkoutRecord
    pub fn builder() -> WorkoutRecordBuilder {
        WorkoutRecordBuilder::default()
    }

    /// Whether the heart-rate variant of the TCX document applies
    pub fn has_heart_rate(&self) -> bool {
        self.heart_rate.is_some()
    }
}

/// Builder for constructing WorkoutRecord instances
#[derive(Debug, Default)]
pub struct WorkoutRecordBuilder {
    sport: Option<SportCategory>,
    start_time: Option<DateTime<FixedOffset>>,
    end_time: Option<DateTime<FixedOffset>>,
    duration_minutes: f64,
    heart_rate: Option<HeartRateSummary>,
    distance_km: Option<f64>,
    calories: Option<f64>,
    elevation_gain_m: Option<f64>,
    track_file: Option<PathBuf>,
}

impl WorkoutRecordBuilder {
    /// Creates a new WorkoutRecordBuilder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sport(mut self, sport: SportCategory) -> Self {
        self.sport = Some(sport);
        self
    }

    pub fn start_time(mut self, start_time: DateTime<FixedOffset>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn end_time(mut self, end_time: DateTime<FixedOffset>) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn duration_minutes(mut self, minutes: f64) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn heart_rate(mut self, heart_rate: HeartRateSummary) -> Self {
        self.heart_rate = Some(heart_rate);
        self
    }

    pub fn distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    pub fn calories(mut self, calories: f64) -> Self {
        self.calories = Some(calories);
        self
    }

    pub fn elevation_gain_m(mut self, elevation_gain_m: f64) -> Self {
        self.elevation_gain_m = Some(elevation_gain_m);
        self
    }

    pub fn track_file(mut self, track_file: impl Into<PathBuf>) -> Self {
        self.track_file = Some(track_file.into());
        self
    }

    /// Builds the WorkoutRecord
    ///
    /// The sport defaults to [`SportCategory::Other`].
    ///
    /// # Errors
    ///
    /// Returns an error if either boundary timestamp is missing
    pub fn build(self) -> Result<WorkoutRecord, String> {
        Ok(WorkoutRecord {
            sport: self.sport.unwrap_or(SportCategory::Other),
            start_time: self.start_time.ok_or("start_time is required")?,
            end_time: self.end_time.ok_or("end_time is required")?,
            duration_minutes: self.duration_minutes,
            heart_rate: self.heart_rate,
            distance_km: self.distance_km,
            calories: self.calories,
            elevation_gain_m: self.elevation_gain_m,
            track_file: self.track_file,
        })
    }
}
