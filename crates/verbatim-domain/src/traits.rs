//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the coding pipeline and its
//! infrastructure. Implementations live in other crates.

use std::path::Path;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (verbatim-llm)
#[allow(async_fn_in_trait)]
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error: std::fmt::Display;

    /// Generate a completion for a single user prompt
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Name of the model answering the prompts
    fn model_name(&self) -> &str;
}

/// Trait for turning a transcript file into plain text
///
/// Implemented by the application layer (verbatim-coder)
pub trait DocumentReader {
    /// Error type for read operations
    type Error;

    /// Extract the full text of the document at `path`
    fn read_text(&self, path: &Path) -> Result<String, Self::Error>;
}
