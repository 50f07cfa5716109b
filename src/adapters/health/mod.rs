//! Apple Health archive reader

pub mod archive;
pub mod entry;

pub use archive::{read_workout_entries, read_workout_entries_str, Extraction, WorkoutExtractor};
pub use entry::{StatisticEntry, WorkoutEntry};
