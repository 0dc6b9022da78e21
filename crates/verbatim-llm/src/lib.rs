//! Verbatim LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `verbatim-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `ChatCompletionProvider`: OpenAI-compatible chat-completion endpoint (Groq by default)
//!
//! # Examples
//!
//! ```
//! use verbatim_llm::MockProvider;
//! use verbatim_domain::traits::LlmProvider;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = MockProvider::new("Thème : Études");
//! let result = provider.generate("any prompt").await.unwrap();
//! assert_eq!(result, "Thème : Études");
//! # }
//! ```

#![warn(missing_docs)]

pub mod openai;

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use verbatim_domain::traits::LlmProvider;

pub use openai::ChatCompletionProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Credential rejected by the endpoint
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

impl MockReply {
    fn into_result(self) -> Result<String, LlmError> {
        match self {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(message) => Err(LlmError::Other(message)),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    by_prompt: HashMap<String, MockReply>,
    queue: VecDeque<MockReply>,
    prompts: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Replies are resolved in this order: a reply registered for the exact
/// prompt, then the next queued reply, then the default response. Every
/// prompt received is recorded.
///
/// # Examples
///
/// ```
/// use verbatim_llm::MockProvider;
/// use verbatim_domain::traits::LlmProvider;
///
/// # #[tokio::main]
/// # async fn main() {
/// let provider = MockProvider::default();
/// provider.push_response("first");
/// provider.push_error("Rate limit reached for model");
///
/// assert_eq!(provider.generate("a").await.unwrap(), "first");
/// assert!(provider.generate("b").await.is_err());
/// assert_eq!(provider.generate("c").await.unwrap(), "Default mock response");
/// assert_eq!(provider.call_count(), 3);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    model: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            model: "mock".to_string(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Set the reported model name
    pub fn with_model_name(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&self, prompt: impl Into<String>, response: impl Into<String>) {
        self.state()
            .by_prompt
            .insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&self, prompt: impl Into<String>, message: impl Into<String>) {
        self.state()
            .by_prompt
            .insert(prompt.into(), MockReply::Error(message.into()));
    }

    /// Queue a response for the next unmatched prompt
    pub fn push_response(&self, response: impl Into<String>) {
        self.state().queue.push_back(MockReply::Text(response.into()));
    }

    /// Queue an error for the next unmatched prompt
    pub fn push_error(&self, message: impl Into<String>) {
        self.state().queue.push_back(MockReply::Error(message.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.state().prompts.len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    /// Forget recorded prompts
    pub fn reset_call_count(&self) {
        self.state().prompts.clear();
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the recorded prompts from the others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.prompts.push(prompt.to_string());

        if let Some(reply) = state.by_prompt.get(prompt) {
            return reply.clone().into_result();
        }
        if let Some(reply) = state.queue.pop_front() {
            return reply.into_result();
        }

        Ok(self.default_response.clone())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
