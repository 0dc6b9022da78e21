//! Configuration for the coding pipeline

use crate::error::CoderError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use verbatim_llm::openai::{DEFAULT_API_BASE, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// Number of `PDF_*` variables read by default
pub const DEFAULT_INTERVIEW_COUNT: u32 = 29;

/// What to do when a whole document fails (unreadable PDF, unwritable result)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run with the error
    #[default]
    Abort,
    /// Log the error and move on to the next document
    Continue,
}

/// Configuration for the pipeline
///
/// `Default` reproduces the settings of the reference run: Groq endpoint,
/// `qwen-qwq-32b` at temperature 0.3 capped at 800 tokens, 1500-character
/// chunks, at most five chunks per interview, 17 s between chunks and a
/// 65 s pause after a rate-limit error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Root of the OpenAI-compatible API
    pub api_base: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Cap on generated tokens per chunk
    pub max_tokens: u32,

    /// Chunk length in characters
    pub chunk_size: usize,

    /// Maximum chunks analysed per interview (0 disables the cap)
    pub max_chunks: usize,

    /// Pause between two chunk requests (seconds)
    pub chunk_delay_secs: u64,

    /// Pause after a rate-limited request (seconds)
    pub rate_limit_pause_secs: u64,

    /// Optional HTTP request timeout (seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Directory receiving `Entretien_{index}.json`
    pub output_dir: PathBuf,

    /// Number of `PDF_*` variables making up the corpus
    pub interview_count: u32,

    /// Whole-document failure handling
    pub failure_policy: FailurePolicy,
}

impl PipelineConfig {
    /// Chunk cap, if any
    pub fn chunk_cap(&self) -> Option<usize> {
        (self.max_chunks > 0).then_some(self.max_chunks)
    }

    /// Pause between chunks as a Duration
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_secs(self.chunk_delay_secs)
    }

    /// Rate-limit pause as a Duration
    pub fn rate_limit_pause(&self) -> Duration {
        Duration::from_secs(self.rate_limit_pause_secs)
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature {} out of range [0.0, 2.0]", self.temperature));
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.api_base.trim().is_empty() {
            return Err("api_base must not be empty".to_string());
        }
        if self.interview_count == 0 {
            return Err("interview_count must be greater than 0".to_string());
        }
        if self.request_timeout_secs == Some(0) {
            return Err("request_timeout_secs must be greater than 0 when set".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoderError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)
            .map_err(|e| CoderError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate().map_err(CoderError::Config)?;
        Ok(config)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            chunk_size: 1500,
            max_chunks: 5,
            chunk_delay_secs: 17,
            rate_limit_pause_secs: 65,
            request_timeout_secs: None,
            output_dir: PathBuf::from("resultats_qwen"),
            interview_count: DEFAULT_INTERVIEW_COUNT,
            failure_policy: FailurePolicy::Abort,
        }
    }
}
