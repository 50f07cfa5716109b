//! Core business logic for HealthTCX.
//!
//! # Modules
//!
//! - [`convert`] - Conversion orchestration, output layout and reporting
//! - [`dates`] - Archive, GPX and TCX date handling
//!
//! # Conversion Workflow
//!
//! 1. **Extract**: Scan `export.xml` for workouts recorded by the configured devices
//! 2. **Filter**: Optionally keep one sport
//! 3. **Track**: Read each workout's GPX route, if it has one
//! 4. **Build**: Assemble a TCX document, with or without heart-rate data
//! 5. **Write**: Store it under `<output>/<YYYY>/<MM>/`
//! 6. **Report**: Generate a conversion summary
//!
//! # Example
//!
//! ```rust,no_run
//! use healthtcx::config::load_config_or_default;
//! use healthtcx::core::convert::ConversionCoordinator;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("healthtcx.toml")?;
//! let coordinator = ConversionCoordinator::new(config, "apple_health_export", None);
//!
//! let summary = coordinator.run(Some("running"))?;
//!
//! println!("With heart rate: {}", summary.with_heart_rate);
//! println!("Without heart rate: {}", summary.without_heart_rate);
//! println!("Failed: {}", summary.failed);
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod dates;
