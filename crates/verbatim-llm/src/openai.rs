//! OpenAI-compatible Chat Completion Provider
//!
//! Talks to any endpoint exposing `POST {api_base}/chat/completions`,
//! Groq being the default.
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - Pinned model, temperature and completion-length cap per provider
//! - One request per prompt: no streaming, no retries, no conversation state
//! - Optional request timeout (none by default)
//!
//! # Examples
//!
//! ```no_run
//! use verbatim_llm::ChatCompletionProvider;
//!
//! let provider = ChatCompletionProvider::new(
//!     "https://api.groq.com/openai/v1",
//!     "gsk_...",
//!     "qwen-qwq-32b",
//! )
//! .unwrap()
//! .with_temperature(0.3)
//! .with_max_tokens(800);
//! ```

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use verbatim_domain::traits::LlmProvider;

/// Default API endpoint (Groq's OpenAI-compatible surface)
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "qwen-qwq-32b";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Default cap on generated tokens
pub const DEFAULT_MAX_TOKENS: u32 = 800;

/// Chat-completion provider for OpenAI-compatible APIs
#[derive(Debug, Clone)]
pub struct ChatCompletionProvider {
    api_base: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

/// Request body for the chat completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `api_base`: endpoint root without trailing slash (e.g. "https://api.groq.com/openai/v1")
    /// - `api_key`: bearer credential
    /// - `model`: model identifier (e.g. "qwen-qwq-32b")
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Other` if the HTTP client cannot be built.
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            client,
        })
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the cap on generated tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Apply a timeout to every request
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Send one prompt and return the trimmed completion text
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint cannot be reached
    /// - The endpoint answers 429 (`RateLimitExceeded`), 401/403 (`Unauthorized`)
    ///   or 404 (`ModelNotAvailable`)
    /// - Any other non-success status is returned
    /// - The response has no choices or no content
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.api_base);

        debug!("POST {} (model {}, {} prompt chars)", url, self.model, prompt.len());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .json::<ChatResponse>()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
            return first_content(body);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(match status {
            reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded(error_text),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                LlmError::Unauthorized(error_text)
            }
            reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(self.model.clone()),
            _ => LlmError::Communication(format!("HTTP {}: {}", status, error_text)),
        })
    }
}

/// Pull the first choice's content out of a response
fn first_content(response: ChatResponse) -> Result<String, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))?;

    choice
        .message
        .content
        .map(|content| content.trim().to_string())
        .ok_or_else(|| LlmError::InvalidResponse("Response choice had no content".to_string()))
}

impl LlmProvider for ChatCompletionProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(prompt).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
