//! Error types for archlens operations.
//!
//! Absence is data, not an error: unknown repositories and unknown nodes
//! produce empty query results, and result caps truncate silently. The
//! only errors the graph engine raises are validation failures on
//! ingestion batches. Configuration and file I/O errors come from the
//! ambient layers (config loading, the CLI).

use std::io;
use thiserror::Error;

/// The error type for archlens operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A batch-level field is missing or empty.
    #[error("Invalid batch: {reason}")]
    InvalidBatch {
        /// What is wrong with the batch
        reason: String,
    },

    /// An edge descriptor is missing a required field or carries an invalid value.
    ///
    /// Reports the first offending descriptor; the whole batch is rejected.
    #[error("Invalid edge descriptor at index {index}: missing or invalid {field}")]
    InvalidDescriptor {
        /// Zero-based position of the descriptor in the batch
        index: usize,
        /// Wire name of the offending field
        field: &'static str,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Returns `true` if the caller sent malformed input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidBatch { .. } | Self::InvalidDescriptor { .. })
    }
}

/// A specialized Result type for archlens operations.
pub type Result<T> = std::result::Result<T, Error>;
