//! Error types for the Consolidator

use thiserror::Error;

/// Errors that can occur while setting up a consolidation run
///
/// Consolidation itself does not fail on bad data: malformed assertions are
/// skipped with a warning and surfaced in the result.
#[derive(Error, Debug)]
pub enum ConsolidatorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
