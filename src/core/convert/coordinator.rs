//! Conversion coordinator - runs one archive-to-TCX conversion
//!
//! The archive is read once up front. Each selected workout is then converted
//! on its own: a failure is logged, recorded in the summary and the run moves
//! on to the next workout.

use crate::adapters::gpx::parse_track;
use crate::adapters::health::WorkoutExtractor;
use crate::adapters::tcx::{write_document, DocumentBuilder, HeartRateMode};
use crate::config::HealthTcxConfig;
use crate::core::convert::paths::output_path;
use crate::core::convert::summary::{
    ConversionFailure, ConversionSummary, ConvertedWorkout, FailureKind,
};
use crate::domain::{HealthTcxError, Result, WorkoutRecord};
use crate::{log_conversion_start, log_error_with_context, log_workout_converted};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Conversion coordinator
#[derive(Debug)]
pub struct ConversionCoordinator {
    config: HealthTcxConfig,
    extractor: WorkoutExtractor,
    builder: DocumentBuilder,
    output_dir: PathBuf,
}

impl ConversionCoordinator {
    /// Create a coordinator for an unpacked Health export directory
    ///
    /// Without `output_dir` the documents go to
    /// `<export_dir>/<output.default_dir_name>`.
    pub fn new(
        config: HealthTcxConfig,
        export_dir: impl Into<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> Self {
        let export_dir = export_dir.into();
        let output_dir =
            output_dir.unwrap_or_else(|| export_dir.join(&config.output.default_dir_name));
        let extractor = WorkoutExtractor::for_export_dir(config.source.clone(), export_dir);
        let builder = DocumentBuilder::new(config.output.creator_name.clone());

        Self {
            config,
            extractor,
            builder,
            output_dir,
        }
    }

    /// Root of the heart-rate variant
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Root of the variant without heart rate
    pub fn no_heart_rate_dir(&self) -> PathBuf {
        self.output_dir.join(&self.config.output.no_heart_rate_dir)
    }

    /// Execute the conversion
    ///
    /// `sport_filter` keeps only workouts whose sport name contains it,
    /// ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`HealthTcxError::ArchiveParse`] if the archive cannot be read,
    /// or an I/O error if the output roots cannot be created. Problems with
    /// single workouts are reported in the summary instead.
    pub fn run(&self, sport_filter: Option<&str>) -> Result<ConversionSummary> {
        let start_time = Instant::now();
        let dry_run = self.config.output.dry_run;
        let mut summary = ConversionSummary::new(self.output_dir.clone(), self.no_heart_rate_dir());
        summary.dry_run = dry_run;

        let archive_path = self.extractor.archive_path();
        log_conversion_start!(archive_path.display(), self.output_dir.display());

        let extraction = self.extractor.extract(&archive_path)?;
        summary.total_entries = extraction.total_entries;
        summary.matched_entries = extraction.matched_entries;
        summary.incomplete_entries = extraction.incomplete_entries;
        for (workout, error) in extraction.rejected {
            summary.add_failure(
                ConversionFailure::new(FailureKind::Extraction, error.to_string())
                    .with_context(workout),
            );
        }

        if !dry_run {
            for dir in [self.output_dir.clone(), self.no_heart_rate_dir()] {
                fs::create_dir_all(&dir).map_err(|e| {
                    HealthTcxError::Io(format!("Failed to create {}: {}", dir.display(), e))
                })?;
            }
        }

        for record in &extraction.records {
            if let Some(filter) = sport_filter {
                if !record.sport.matches_filter(filter) {
                    summary.filtered_out += 1;
                    continue;
                }
            }

            match self.convert_workout(record) {
                Ok(converted) => summary.add_converted(converted),
                Err(failure) => {
                    log_error_with_context!(
                        &failure.message,
                        failure.context.as_deref().unwrap_or("")
                    );
                    summary.add_failure(failure);
                }
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Converts one workout
    fn convert_workout(
        &self,
        record: &WorkoutRecord,
    ) -> std::result::Result<ConvertedWorkout, ConversionFailure> {
        let mode = HeartRateMode::for_record(record);
        let root = match mode {
            HeartRateMode::Include => self.output_dir.clone(),
            HeartRateMode::Omit => self.no_heart_rate_dir(),
        };
        let path = output_path(&root, record, &self.config.output.extension);
        let context = path.display().to_string();

        let points = parse_track(record.track_file.as_deref());
        let document = self.builder.build_document(record, &points, mode);

        if !self.config.output.dry_run {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    ConversionFailure::new(
                        FailureKind::Output,
                        format!("Failed to create {}: {}", parent.display(), e),
                    )
                    .with_context(context.clone())
                })?;
            }

            write_document(&document, &path).map_err(|e| {
                ConversionFailure::new(FailureKind::Write, e.to_string())
                    .with_context(context.clone())
            })?;
        }

        log_workout_converted!(path.display(), record.sport, mode == HeartRateMode::Include);

        Ok(ConvertedWorkout {
            path,
            sport: record.sport,
            duration_minutes: record.duration_minutes,
            distance_km: record.distance_km,
            average_heart_rate: record.heart_rate.map(|hr| hr.avg),
            mode,
            track_points: points.len(),
        })
    }
}
