//! Error types for decadal file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a decadal file.
///
/// Only opening and reading the file can fail; every content problem is
/// recorded in the anomaly log instead.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
