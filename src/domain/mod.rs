//! Domain models and types for HealthTCX.
//!
//! The domain layer provides:
//! - **Workout model** ([`WorkoutRecord`], [`HeartRateSummary`])
//! - **Track model** ([`TrackPoint`])
//! - **Sport categories** ([`SportCategory`]) with the activity-type lookup table
//! - **Error types** ([`HealthTcxError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, HealthTcxError>`]:
//!
//! ```rust
//! use healthtcx::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = healthtcx::config::load_config_or_default("healthtcx.toml")?;
//!     assert!(!config.source.device_name.is_empty());
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;
pub mod sport;
pub mod track;
pub mod workout;

// Re-export commonly used types for convenience
pub use errors::HealthTcxError;
pub use result::Result;
pub use sport::SportCategory;
pub use track::TrackPoint;
pub use workout::{HeartRateSummary, WorkoutRecord, WorkoutRecordBuilder};
