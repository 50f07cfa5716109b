//! Domain error types
//!
//! This module defines the error hierarchy for HealthTCX. Only two failures are
//! fatal for a conversion run (an unreadable archive and a broken configuration);
//! every other variant is raised for a single record or document and handled at
//! the batch level.

use thiserror::Error;

/// Main HealthTCX error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum HealthTcxError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The top-level archive could not be read or is not well-formed XML
    #[error("Archive parse error: {0}")]
    ArchiveParse(String),

    /// A date or timestamp did not match the expected shape
    #[error("Invalid date '{value}': {reason}")]
    DateFormat {
        /// The offending text
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A numeric attribute or element could not be parsed
    #[error("Invalid value for {field}: '{value}'")]
    InvalidField {
        /// Attribute or element name
        field: String,
        /// The offending text
        value: String,
    },

    /// A GPX track file could not be parsed
    #[error("Track parse error: {0}")]
    TrackParse(String),

    /// A TCX document could not be rendered or written
    #[error("Document write error: {0}")]
    DocumentWrite(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl HealthTcxError {
    /// Creates a `DateFormat` error
    pub fn date_format(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DateFormat {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidField` error
    pub fn invalid_field(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether this error aborts a whole conversion run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ArchiveParse(_) | Self::Configuration(_))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for HealthTcxError {
    fn from(err: std::io::Error) -> Self {
        HealthTcxError::Io(err.to_string())
    }
}

// XML faults surface without a document context; callers that know which
// document failed map them to ArchiveParse, TrackParse or DocumentWrite
impl From<quick_xml::Error> for HealthTcxError {
    fn from(err: quick_xml::Error) -> Self {
        HealthTcxError::Other(format!("XML error: {err}"))
    }
}

impl From<quick_xml::events::attributes::AttrError> for HealthTcxError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        HealthTcxError::Other(format!("XML attribute error: {err}"))
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for HealthTcxError {
    fn from(err: toml::de::Error) -> Self {
        HealthTcxError::Configuration(format!("TOML parse error: {err}"))
    }
}
