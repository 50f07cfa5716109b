//! CLI command implementations
//!
//! Every command returns its process exit code:
//! - 0: success
//! - 1: some workouts could not be converted
//! - 2: configuration error
//! - 3: the archive could not be read
//! - 5: fatal error

pub mod convert;
pub mod init;
pub mod validate;
