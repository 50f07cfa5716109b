//! File format adapters
//!
//! - [`health`] - Apple Health `export.xml` reader
//! - [`gpx`] - GPX route reader
//! - [`tcx`] - TCX document builder and writer

pub mod gpx;
pub mod health;
pub mod tcx;

mod xml;
