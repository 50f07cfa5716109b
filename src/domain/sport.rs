//! Sport categories and the activity-type lookup table

use serde::{Deserialize, Serialize};
use std::fmt;

/// TCX sport category assigned to a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SportCategory {
    Running,
    Walking,
    Biking,
    Swimming,
    Other,
}

impl SportCategory {
    /// Maps an Apple Health `workoutActivityType` to a sport category
    ///
    /// Exact-match lookup; anything unrecognised (including the empty string)
    /// falls back to [`SportCategory::Other`]. Hiking has no TCX category of its
    /// own and is deliberately mapped to `Other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use healthtcx::domain::SportCategory;
    ///
    /// assert_eq!(
    ///     SportCategory::from_activity_type("HKWorkoutActivityTypeCycling"),
    ///     SportCategory::Biking
    /// );
    /// assert_eq!(SportCategory::from_activity_type("Yoga"), SportCategory::Other);
    /// ```
    pub fn from_activity_type(activity_type: &str) -> Self {
        match activity_type {
            "HKWorkoutActivityTypeRunning" => Self::Running,
            "HKWorkoutActivityTypeWalking" => Self::Walking,
            "HKWorkoutActivityTypeCycling" => Self::Biking,
            "HKWorkoutActivityTypeHiking" => Self::Other,
            "HKWorkoutActivityTypeSwimming" => Self::Swimming,
            _ => Self::Other,
        }
    }

    /// TCX `Sport` attribute text
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Walking => "Walking",
            Self::Biking => "Biking",
            Self::Swimming => "Swimming",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive substring match used by the `--activity` filter
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.as_str()
            .to_lowercase()
            .contains(&filter.to_lowercase())
    }
}

impl fmt::Display for SportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
