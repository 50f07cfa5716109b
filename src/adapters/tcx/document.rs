//! Typed TCX document tree
//!
//! Mirrors the subset of the Garmin TrainingCenterDatabase v2 schema the
//! converter emits. Optional children are `None` or empty when the element is
//! left out.

use crate::domain::SportCategory;
use chrono::{DateTime, FixedOffset};

/// TCX default namespace
pub const TCX_NAMESPACE: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2";

/// XML Schema instance namespace
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// `xsi:schemaLocation` value
pub const SCHEMA_LOCATION: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2 http://www.garmin.com/xmlschemas/TrainingCenterDatabasev2.xsd";

/// Root of a single-activity TCX document
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingCenterDatabase {
    pub activity: Activity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub sport: SportCategory,
    pub id: DateTime<FixedOffset>,
    pub lap: Lap,
    pub creator: Creator,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lap {
    pub start_time: DateTime<FixedOffset>,
    pub total_time_seconds: f64,
    pub distance_meters: Option<f64>,
    pub calories: Option<i64>,
    pub average_heart_rate_bpm: Option<i64>,
    pub maximum_heart_rate_bpm: Option<i64>,
    /// `Track` is omitted when there are no points
    pub track: Vec<Trackpoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trackpoint {
    pub time: DateTime<FixedOffset>,
    pub latitude_degrees: f64,
    pub longitude_degrees: f64,
    pub altitude_meters: f64,
    pub heart_rate_bpm: Option<i64>,
}

/// `Creator` element, typed `Device_t`
#[derive(Debug, Clone, PartialEq)]
pub struct Creator {
    pub name: String,
    pub unit_id: u32,
    pub product_id: u32,
}
