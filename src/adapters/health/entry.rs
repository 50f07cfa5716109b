//! Raw `Workout` entries and their normalisation
//!
//! [`WorkoutEntry`] keeps the attribute text exactly as the archive holds it.
//! Parsing happens in [`WorkoutEntry::normalize`], so a malformed value only
//! costs the one workout it belongs to.

use crate::core::dates::parse_source_date;
use crate::domain::{HealthTcxError, HeartRateSummary, Result, SportCategory, WorkoutRecord};
use std::path::Path;

const HEART_RATE: &str = "HeartRate";
const DISTANCE: &str = "DistanceWalkingRunning";
const ACTIVE_ENERGY: &str = "ActiveEnergyBurned";

/// Metadata key holding the elevation gain, e.g. `"1234 cm"`
pub const ELEVATION_KEY: &str = "HKElevationAscended";

/// One `WorkoutStatistics` child
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticEntry {
    pub stat_type: String,
    pub average: Option<String>,
    pub minimum: Option<String>,
    pub maximum: Option<String>,
    pub sum: Option<String>,
}

/// One `Workout` element as found in the archive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutEntry {
    pub activity_type: String,
    pub source_name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration: Option<String>,
    pub statistics: Vec<StatisticEntry>,
    /// Value of the first elevation metadata entry (`"0 cm"` if it had none)
    pub elevation_ascended: Option<String>,
    /// `path` of the first `FileReference` directly under a `WorkoutRoute`
    pub route_reference: Option<String>,
}

impl WorkoutEntry {
    /// Short description used in logs and failure reports
    pub fn describe(&self) -> String {
        format!(
            "{} at {}",
            if self.activity_type.is_empty() {
                "<no activity type>"
            } else {
                self.activity_type.as_str()
            },
            self.start_date.as_deref().unwrap_or("<no start date>")
        )
    }

    /// Converts the entry into a [`WorkoutRecord`]
    ///
    /// Returns `Ok(None)` when either boundary date is absent or empty; such
    /// entries are dropped without complaint.
    ///
    /// # Errors
    ///
    /// Returns [`HealthTcxError::DateFormat`] or [`HealthTcxError::InvalidField`]
    /// when a present value cannot be parsed.
    pub fn normalize(
        &self,
        routes_root: &Path,
        route_prefix: &str,
    ) -> Result<Option<WorkoutRecord>> {
        let (Some(start), Some(end)) = (non_empty(&self.start_date), non_empty(&self.end_date))
        else {
            return Ok(None);
        };

        let mut builder = WorkoutRecord::builder()
            .sport(SportCategory::from_activity_type(&self.activity_type))
            .start_time(parse_source_date(start)?)
            .end_time(parse_source_date(end)?)
            .duration_minutes(match self.duration.as_deref() {
                Some(value) => decimal("duration", value)?,
                None => 0.0,
            });

        // A later statistic of the same kind replaces an earlier one
        let mut heart_rate = None;
        let mut distance = None;
        let mut calories = None;
        for stat in &self.statistics {
            if stat.stat_type.contains(HEART_RATE) {
                heart_rate = Some(HeartRateSummary {
                    avg: optional_decimal("average", stat.average.as_deref())?,
                    min: optional_integer("minimum", stat.minimum.as_deref())?,
                    max: optional_integer("maximum", stat.maximum.as_deref())?,
                });
            } else if stat.stat_type.contains(DISTANCE) {
                distance = Some(optional_decimal("sum", stat.sum.as_deref())?);
            } else if stat.stat_type.contains(ACTIVE_ENERGY) {
                calories = Some(optional_decimal("sum", stat.sum.as_deref())?);
            }
        }

        if let Some(hr) = heart_rate {
            builder = builder.heart_rate(hr);
        }
        if let Some(km) = distance {
            builder = builder.distance_km(km);
        }
        if let Some(kcal) = calories {
            builder = builder.calories(kcal);
        }

        if let Some(value) = &self.elevation_ascended {
            let centimetres = decimal(ELEVATION_KEY, &value.replace(" cm", ""))?;
            builder = builder.elevation_gain_m(centimetres / 100.0);
        }

        if let Some(track) = self
            .route_reference
            .as_deref()
            .and_then(|path| path.strip_prefix(route_prefix))
        {
            builder = builder.track_file(routes_root.join(track));
        }

        builder.build().map(Some).map_err(HealthTcxError::Other)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn decimal(field: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| HealthTcxError::invalid_field(field, value))
}

fn optional_decimal(field: &str, value: Option<&str>) -> Result<f64> {
    value.map_or(Ok(0.0), |v| decimal(field, v))
}

/// Whole-number statistic; a fractional value is truncated toward zero
fn optional_integer(field: &str, value: Option<&str>) -> Result<i64> {
    match value {
        None => Ok(0),
        Some(v) => match v.trim().parse::<i64>() {
            Ok(n) => Ok(n),
            Err(_) => decimal(field, v).map(|f| f.trunc() as i64),
        },
    }
}
