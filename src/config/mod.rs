//! Configuration management for HealthTCX.
//!
//! Configuration is optional: every setting has a default that matches the
//! stock converter, and `healthtcx.toml` only needs the keys being changed.
//!
//! # Overview
//!
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `HEALTHTCX_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use healthtcx::config::load_config_or_default;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("healthtcx.toml")?;
//! println!("Converting workouts from: {}", config.source.device_name);
//! println!("Output directory name: {}", config.output.default_dir_name);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`SourceConfig`] - Accepted devices and archive layout
//! - [`OutputConfig`] - Output layout, creator name, dry run
//! - [`LoggingConfig`] - Local JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [source]
//! device_name = "Apple Watch"
//! secondary_name = "${HEALTHTCX_OWNER_NAME}"
//!
//! [output]
//! default_dir_name = "tcx_files"
//! no_heart_rate_dir = "no_heart_rate"
//! creator_name = "Apple Watch"
//!
//! [logging]
//! local_enabled = true
//! local_path = "logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, HealthTcxConfig, LoggingConfig, OutputConfig, SourceConfig};
