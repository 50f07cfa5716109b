//! Result type alias for HealthTCX

use super::errors::HealthTcxError;

/// Result type alias for HealthTCX operations
///
/// # Examples
///
/// ```
/// use healthtcx::domain::result::Result;
/// use healthtcx::domain::errors::HealthTcxError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(HealthTcxError::Other("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, HealthTcxError>;
