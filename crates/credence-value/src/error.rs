//! Error types for value construction

use thiserror::Error;

/// Errors raised by malformed value construction
///
/// Comparison never raises: mismatched variants and incompatible units
/// simply compare as unequal. These errors are reserved for text that
/// cannot be decomposed into the requested value shape at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// Value text could not be decomposed; callers fall back to Text
    #[error("Unparseable value text: {0}")]
    Parse(String),

    /// Version text has no parseable leading integer
    #[error("Invalid version: {0}")]
    InvalidVersion(String),
}
