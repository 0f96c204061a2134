//! Result type alias for cloudenv
//!
//! This module provides a convenient Result type alias that uses CloudEnvError
//! as the error type.

use super::errors::CloudEnvError;

/// Result type alias for cloudenv operations
///
/// This is a convenience type alias that uses `CloudEnvError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use cloudenv::domain::result::Result;
/// use cloudenv::domain::errors::CloudEnvError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CloudEnvError::Configuration("missing host".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CloudEnvError>;
