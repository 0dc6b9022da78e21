//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API credential in the environment
    #[error("No API key. Set GROQ_API_KEY in the environment or in .env")]
    MissingApiKey,

    /// Pipeline error
    #[error(transparent)]
    Coder(#[from] verbatim_coder::CoderError),

    /// LLM provider error
    #[error(transparent)]
    Llm(#[from] verbatim_llm::LlmError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
