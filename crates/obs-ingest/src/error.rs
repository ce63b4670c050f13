//! Error types for TSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Run-fatal errors raised while opening or reading the input file.
///
/// Per-row problems are never reported here; those flow through the row
/// parser as validation errors or warnings.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read or parse the file as delimited text. Covers every
    /// other I/O failure too; the csv error carries the underlying cause.
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A mandatory header column is absent.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// The file has no header row at all.
    #[error("input file is empty: {path}")]
    EmptyFile { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
