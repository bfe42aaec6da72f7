//! Error types for document sinks.

use thiserror::Error;

/// Errors a sink can report for a single document or on close.
///
/// None of these abort a run: the run loop logs them and skips the
/// affected sink step for the current document.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The document could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing to the output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The downstream client rejected the document.
    #[error("Submit error: {0}")]
    Submit(String),
}
