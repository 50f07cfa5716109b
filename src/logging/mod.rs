//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output on stderr
//! - JSON-formatted local file logs with rotation
//!
//! # Example
//!
//! ```no_run
//! use healthtcx::logging::init_logging;
//! use healthtcx::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Conversion started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of a conversion run
///
/// # Example
///
/// ```no_run
/// use healthtcx::log_conversion_start;
/// use std::path::Path;
///
/// log_conversion_start!(Path::new("export/export.xml").display(), Path::new("tcx_files").display());
/// ```
#[macro_export]
macro_rules! log_conversion_start {
    ($archive:expr, $output:expr) => {
        tracing::info!(
            archive = %$archive,
            output_dir = %$output,
            "Starting conversion"
        );
    };
}

/// Log a written (or, in dry-run mode, built) TCX document
///
/// # Example
///
/// ```no_run
/// use healthtcx::log_workout_converted;
///
/// log_workout_converted!("tcx_files/2024/01/2024-01-15_100000_Running.tcx", "Running", true);
/// ```
#[macro_export]
macro_rules! log_workout_converted {
    ($path:expr, $sport:expr, $heart_rate:expr) => {
        tracing::debug!(
            path = %$path,
            sport = %$sport,
            heart_rate = $heart_rate,
            "Workout converted"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use healthtcx::log_error_with_context;
/// use healthtcx::domain::HealthTcxError;
///
/// let error = HealthTcxError::TrackParse("unexpected end of file".to_string());
/// log_error_with_context!(&error, "route_2024-01-15.gpx");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
