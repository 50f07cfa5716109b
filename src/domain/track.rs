//! GPS track point model

use chrono::{DateTime, FixedOffset};

/// One timestamped GPS fix from a workout route
///
/// Points without a timestamp never become a `TrackPoint`; they are dropped
/// while the GPX file is scanned.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,

    /// Elevation in metres, 0 when the GPX point has no `<ele>`
    pub elevation_m: f64,

    /// Time of the fix
    pub timestamp: DateTime<FixedOffset>,

    /// Speed in metres per second, from the point's extensions
    pub speed: Option<f64>,
}

impl TrackPoint {
    /// Creates a point without speed
    pub fn new(
        latitude: f64,
        longitude: f64,
        elevation_m: f64,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            elevation_m,
            timestamp,
            speed: None,
        }
    }

    /// Sets the speed
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
}
