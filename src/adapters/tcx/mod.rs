//! TCX (Training Center XML) output
//!
//! [`DocumentBuilder`] turns a workout and its route into a typed
//! [`TrainingCenterDatabase`]; [`writer`] serialises it.

pub mod builder;
pub mod document;
pub mod writer;

pub use builder::{DocumentBuilder, HeartRateMode};
pub use document::{Activity, Creator, Lap, TrainingCenterDatabase, Trackpoint};
pub use writer::{render, render_to_string, write_document};
