//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A label outside the recognised category set.
    #[error("unknown label: {0}")]
    UnknownLabel(String),

    /// A validation error occurred.
    #[error("validation error: {0}")]
    Validation(String),
}
