//! Result type alias for Setport
//!
//! This module provides a convenient Result type alias that uses SetportError
//! as the error type.

use super::errors::SetportError;

/// Result type alias for Setport operations
///
/// # Examples
///
/// ```
/// use setport::domain::result::Result;
/// use setport::domain::errors::SetportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(SetportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SetportError>;
