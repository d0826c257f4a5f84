//! # Import Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while importing source records.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid GeoJSON.
    #[error("invalid GeoJSON: {0}")]
    Parse(#[from] geojson::Error),
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;
