//! Error types for terminology resolution.

use thiserror::Error;

/// Failures while resolving a display string.
///
/// None of these abort a row; the pipeline degrades to an omitted display
/// and records a warning.
#[derive(Debug, Error)]
pub enum TerminologyError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("terminology request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("terminology server returned {status} for {system}|{code}")]
    Http {
        status: u16,
        system: String,
        code: String,
    },
}

/// Result type for terminology operations.
pub type Result<T> = std::result::Result<T, TerminologyError>;
