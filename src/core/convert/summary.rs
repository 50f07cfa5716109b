//! Conversion summary and reporting
//!
//! This module defines structures for tracking and reporting conversion results.

use crate::adapters::tcx::HeartRateMode;
use crate::domain::SportCategory;
use std::path::PathBuf;
use std::time::Duration;

/// A workout that was converted (or, in dry-run mode, would have been)
#[derive(Debug, Clone)]
pub struct ConvertedWorkout {
    /// Output file path
    pub path: PathBuf,

    pub sport: SportCategory,

    pub duration_minutes: f64,

    pub distance_km: Option<f64>,

    /// Average heart rate, present for the heart-rate variant
    pub average_heart_rate: Option<f64>,

    pub mode: HeartRateMode,

    /// Number of route points written
    pub track_points: usize,
}

/// Summary of a conversion run
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    /// `Workout` elements in the archive
    pub total_entries: usize,

    /// Entries recorded by a configured device
    pub matched_entries: usize,

    /// Matched entries without a start or end date
    pub incomplete_entries: usize,

    /// Records excluded by the activity filter
    pub filtered_out: usize,

    /// Documents written with heart-rate data
    pub with_heart_rate: usize,

    /// Documents written without heart-rate data
    pub without_heart_rate: usize,

    /// Records that could not be converted
    pub failed: usize,

    /// Root of the heart-rate variant
    pub output_dir: PathBuf,

    /// Root of the variant without heart rate
    pub no_heart_rate_dir: PathBuf,

    /// Documents were built but not written
    pub dry_run: bool,

    /// Duration of the run
    pub duration: Duration,

    /// Converted workouts, in archive order
    pub converted: Vec<ConvertedWorkout>,

    /// Errors encountered during conversion
    pub errors: Vec<ConversionFailure>,
}

impl ConversionSummary {
    /// Create a new empty summary for the given output roots
    pub fn new(output_dir: PathBuf, no_heart_rate_dir: PathBuf) -> Self {
        Self {
            total_entries: 0,
            matched_entries: 0,
            incomplete_entries: 0,
            filtered_out: 0,
            with_heart_rate: 0,
            without_heart_rate: 0,
            failed: 0,
            output_dir,
            no_heart_rate_dir,
            dry_run: false,
            duration: Duration::from_secs(0),
            converted: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a converted workout
    pub fn add_converted(&mut self, workout: ConvertedWorkout) {
        match workout.mode {
            HeartRateMode::Include => self.with_heart_rate += 1,
            HeartRateMode::Omit => self.without_heart_rate += 1,
        }
        self.converted.push(workout);
    }

    /// Record a workout that could not be converted
    pub fn add_failure(&mut self, failure: ConversionFailure) {
        self.failed += 1;
        self.errors.push(failure);
    }

    /// Documents produced
    pub fn total_converted(&self) -> usize {
        self.with_heart_rate + self.without_heart_rate
    }

    /// Records the run attempted to convert
    pub fn total_attempted(&self) -> usize {
        self.total_converted() + self.failed
    }

    /// Check if the conversion was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_attempted() == 0 {
            return 100.0;
        }
        (self.total_converted() as f64 / self.total_attempted() as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_entries = self.total_entries,
            matched = self.matched_entries,
            with_heart_rate = self.with_heart_rate,
            without_heart_rate = self.without_heart_rate,
            failed = self.failed,
            filtered_out = self.filtered_out,
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Conversion completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Conversion completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    kind = ?error.kind,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Conversion error"
                );
            }
        }
    }
}

/// Stage at which a workout failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// A malformed archive value
    Extraction,
    /// The output location could not be prepared
    Output,
    /// The document could not be rendered or written
    Write,
}

/// Conversion failure with context
#[derive(Debug, Clone)]
pub struct ConversionFailure {
    pub kind: FailureKind,

    pub message: String,

    /// Optional context (e.g., workout description, output path)
    pub context: Option<String>,
}

impl ConversionFailure {
    pub fn new(kind: FailureKind, message: String) -> Self {
        Self {
            kind,
            message,
            context: None,
        }
    }

    /// Add context to the failure
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
