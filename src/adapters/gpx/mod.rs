//! GPX workout route reader

pub mod parser;

pub use parser::{parse_track, parse_track_str, read_track_file, GPX_NAMESPACE};
