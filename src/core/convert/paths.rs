//! Output file layout
//!
//! `<root>/<YYYY>/<MM>/<YYYY-MM-DD_HHMMSS>_<Sport>.<ext>`, using the start
//! time in the offset the device recorded.

use crate::core::dates::format_file_stamp;
use crate::domain::WorkoutRecord;
use chrono::Datelike;
use std::path::{Path, PathBuf};

/// File name for a workout's document
pub fn output_file_name(record: &WorkoutRecord, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        format_file_stamp(&record.start_time),
        record.sport,
        extension
    )
}

/// Full document path under `root`
///
/// # Examples
///
/// ```
/// use healthtcx::core::convert::paths::output_path;
/// use healthtcx::domain::{SportCategory, WorkoutRecord};
/// use chrono::DateTime;
/// use std::path::Path;
///
/// let record = WorkoutRecord::builder()
///     .sport(SportCategory::Running)
///     .start_time(DateTime::parse_from_rfc3339("2024-01-15T10:00:00+00:00").unwrap())
///     .end_time(DateTime::parse_from_rfc3339("2024-01-15T10:30:00+00:00").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     output_path(Path::new("out"), &record, "tcx"),
///     Path::new("out/2024/01/2024-01-15_100000_Running.tcx")
/// );
/// ```
pub fn output_path(root: &Path, record: &WorkoutRecord, extension: &str) -> PathBuf {
    root.join(format!("{:04}", record.start_time.year()))
        .join(format!("{:02}", record.start_time.month()))
        .join(output_file_name(record, extension))
}
