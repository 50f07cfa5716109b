//! Conversion orchestration and reporting
//!
//! - [`ConversionCoordinator`] drives one run over an export directory
//! - [`ConversionSummary`] collects counts, converted files and failures
//! - [`paths`] derives output locations

pub mod coordinator;
pub mod paths;
pub mod summary;

pub use coordinator::ConversionCoordinator;
pub use summary::{ConversionFailure, ConversionSummary, ConvertedWorkout, FailureKind};
