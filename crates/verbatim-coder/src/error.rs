//! Error types for the coding pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, reading, analysing or writing
#[derive(Error, Debug)]
pub enum CoderError {
    /// A configured transcript path is unset or does not name a file
    #[error("PDF file not found for interview {index}: {path}")]
    MissingDocument {
        /// Interview index
        index: u32,
        /// Configured value, or `<unset>`
        path: String,
    },

    /// An interview index outside the configured corpus was requested
    #[error("Unknown interview {index} (corpus has {count} interviews)")]
    UnknownInterview {
        /// Requested index
        index: u32,
        /// Number of configured interviews
        count: u32,
    },

    /// Text extraction failed
    #[error("Failed to extract text from {}: {message}", path.display())]
    Pdf {
        /// Transcript path
        path: PathBuf,
        /// Underlying failure
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

