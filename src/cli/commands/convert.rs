//! Convert command implementation
//!
//! This module implements the `convert` command, which turns the workouts of
//! an unpacked Apple Health export into TCX files.

use crate::adapters::tcx::HeartRateMode;
use crate::config::load_config_or_default;
use crate::core::convert::{ConversionCoordinator, ConversionSummary};
use crate::domain::HealthTcxError;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Unpacked Health export directory (holds export.xml and workout-routes/)
    pub export_dir: PathBuf,

    /// Output directory (defaults to <EXPORT_DIR>/tcx_files)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only convert workouts whose sport contains this text (case-insensitive)
    #[arg(short, long)]
    pub activity: Option<String>,

    /// Build the documents without writing any files
    #[arg(long)]
    pub dry_run: bool,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            config_path = %config_path,
            export_dir = %self.export_dir.display(),
            "Starting convert command"
        );

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if self.dry_run {
            config.output.dry_run = true;
        }

        if !self.export_dir.is_dir() {
            eprintln!(
                "Export directory not found: {}",
                self.export_dir.display()
            );
            return Ok(3); // Archive error exit code
        }

        if config.output.dry_run {
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        let coordinator =
            ConversionCoordinator::new(config, self.export_dir.clone(), self.output.clone());

        println!("🚀 Converting workouts...");
        println!("  Output: {}", coordinator.output_dir().display());
        if let Some(activity) = &self.activity {
            println!("  Activity filter: {activity}");
        }
        println!();

        let summary = match coordinator.run(self.activity.as_deref()) {
            Ok(s) => s,
            Err(e @ HealthTcxError::ArchiveParse(_)) => {
                tracing::error!(error = %e, "Archive could not be read");
                eprintln!("Failed to read archive: {e}");
                return Ok(3);
            }
            Err(e) => {
                tracing::error!(error = %e, "Conversion failed");
                eprintln!("Conversion failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        print_converted(&summary);
        print_summary(&summary);

        let exit_code = if summary.is_successful() {
            println!("✅ Conversion completed successfully!");
            0
        } else {
            println!("⚠️  Conversion completed with failures");
            1
        };

        Ok(exit_code)
    }
}

fn print_converted(summary: &ConversionSummary) {
    for workout in &summary.converted {
        let verb = if summary.dry_run { "Would write" } else { "Converted" };
        let name = workout
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut line = format!("{verb}: {name} ({:.1} min", workout.duration_minutes);
        if let Some(km) = workout.distance_km {
            line.push_str(&format!(", {km:.2} km"));
        }
        match (workout.mode, workout.average_heart_rate) {
            (HeartRateMode::Include, Some(avg)) => line.push_str(&format!(", avg HR {avg:.0}")),
            _ => line.push_str(", no HR"),
        }
        if workout.track_points > 0 {
            line.push_str(&format!(", {} points", workout.track_points));
        }
        line.push(')');
        println!("  {line}");
    }
    if !summary.converted.is_empty() {
        println!();
    }
}

fn print_summary(summary: &ConversionSummary) {
    println!("📊 Conversion Summary:");
    println!("  Workouts in archive: {}", summary.total_entries);
    println!("  From configured devices: {}", summary.matched_entries);
    if summary.incomplete_entries > 0 {
        println!("  Missing start/end date: {}", summary.incomplete_entries);
    }
    if summary.filtered_out > 0 {
        println!("  Excluded by activity filter: {}", summary.filtered_out);
    }
    println!("  With heart rate: {}", summary.with_heart_rate);
    println!("  Without heart rate: {}", summary.without_heart_rate);
    println!("  Failed: {}", summary.failed);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();
    println!("  Heart-rate files: {}", summary.output_dir.display());
    println!("  Other files: {}", summary.no_heart_rate_dir.display());
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {:?}: {}", error.kind, error.message);
            if let Some(context) = &error.context {
                println!("    Context: {context}");
            }
        }
        println!();
    }
}
