// HealthTCX - Apple Health workouts to TCX converter
// Copyright (c) 2025 HealthTCX Contributors
// Licensed under the MIT License

//! # HealthTCX - Apple Health workouts to TCX
//!
//! HealthTCX converts the workouts in an unpacked Apple Health export into
//! Garmin Training Center XML (TCX) files that training platforms can import.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Extracting** workouts recorded by an Apple Watch from `export.xml`
//! - **Reading** each workout's GPX route from `workout-routes/`
//! - **Building** one TCX document per workout, with or without heart-rate data
//! - **Writing** the documents into a `<year>/<month>/` tree
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Conversion orchestration and date handling
//! - [`adapters`] - File formats (Health archive, GPX, TCX)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use healthtcx::config::HealthTcxConfig;
//! use healthtcx::core::convert::ConversionCoordinator;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let coordinator =
//!         ConversionCoordinator::new(HealthTcxConfig::default(), "apple_health_export", None);
//!
//!     let summary = coordinator.run(None)?;
//!
//!     println!("Converted {} workouts", summary.total_converted());
//!     Ok(())
//! }
//! ```
//!
//! ## Building Documents Directly
//!
//! ```rust,no_run
//! use healthtcx::adapters::gpx::parse_track;
//! use healthtcx::adapters::health::WorkoutExtractor;
//! use healthtcx::adapters::tcx::{render_to_string, DocumentBuilder, HeartRateMode};
//! use healthtcx::config::SourceConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = WorkoutExtractor::for_export_dir(SourceConfig::default(), "apple_health_export");
//! let builder = DocumentBuilder::new("Apple Watch");
//!
//! for record in extractor.extract_all(&extractor.archive_path())? {
//!     let points = parse_track(record.track_file.as_deref());
//!     let document = builder.build_document(&record, &points, HeartRateMode::for_record(&record));
//!     println!("{}", render_to_string(&document)?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! HealthTCX uses the [`domain::HealthTcxError`] type for all errors. Only an
//! unreadable archive or a broken configuration stops a run; problems with a
//! single workout are collected in the [`core::convert::ConversionSummary`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
