//! Per-chunk model calls

use crate::prompt::PromptBuilder;
use std::time::Duration;
use tracing::{debug, info, warn};
use verbatim_domain::traits::LlmProvider;

/// True when an error message reports a rate limit
///
/// # Examples
///
/// ```
/// use verbatim_coder::is_rate_limited;
///
/// assert!(is_rate_limited("Rate limit reached for model `qwen-qwq-32b`"));
/// assert!(!is_rate_limited("HTTP 500: internal error"));
/// ```
pub fn is_rate_limited(message: &str) -> bool {
    message.to_lowercase().contains("rate limit")
}

/// Inline text recorded in place of a response when the call fails
pub fn error_placeholder(message: &str) -> String {
    format!("[Erreur lors de l'analyse : {}]", message)
}

/// What the analyzer got back for one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkResponse {
    /// Model output, or the error placeholder
    pub text: String,

    /// The remote call failed
    pub failed: bool,

    /// The failure was a rate limit and the pause was taken
    pub rate_limited: bool,
}

/// Sends chunks to the model, one request per chunk
pub struct ChunkAnalyzer<L> {
    llm: L,
    rate_limit_pause: Duration,
}

impl<L> ChunkAnalyzer<L>
where
    L: LlmProvider,
{
    /// Create a new analyzer
    pub fn new(llm: L, rate_limit_pause: Duration) -> Self {
        Self {
            llm,
            rate_limit_pause,
        }
    }

    /// The underlying provider
    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// Analyse one chunk
    ///
    /// Never fails: a provider error is logged and turned into the inline
    /// placeholder. A rate-limit error additionally blocks for the
    /// configured pause before returning. The request is not retried.
    pub async fn analyze(&self, chunk: &str, interview: u32, chunk_index: usize) -> ChunkResponse {
        let prompt = PromptBuilder::new(chunk).build();

        debug!(
            "Interview {} chunk {}: prompt length {} chars",
            interview,
            chunk_index + 1,
            prompt.len()
        );

        match self.llm.generate(&prompt).await {
            Ok(text) => {
                debug!("Interview {} chunk {}: response length {} chars", interview, chunk_index + 1, text.len());
                ChunkResponse {
                    text: text.trim().to_string(),
                    failed: false,
                    rate_limited: false,
                }
            }
            Err(e) => {
                let message = e.to_string();
                warn!("API error for interview {} (chunk {}): {}", interview, chunk_index + 1, message);

                let rate_limited = is_rate_limited(&message);
                if rate_limited {
                    info!("Rate limit hit, waiting {}s", self.rate_limit_pause.as_secs());
                    tokio::time::sleep(self.rate_limit_pause).await;
                }

                ChunkResponse {
                    text: error_placeholder(&message),
                    failed: true,
                    rate_limited,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verbatim_llm::MockProvider;

    #[test]
    fn test_rate_limit_detection_is_case_insensitive() {
        assert!(is_rate_limited("rate limit"));
        assert!(is_rate_limited("RATE LIMIT EXCEEDED"));
        assert!(is_rate_limited("Error code: 429 - Rate Limit reached"));
        assert!(!is_rate_limited("ratelimit"));
        assert!(!is_rate_limited("Communication error: connection refused"));
        assert!(!is_rate_limited(""));
    }

    #[test]
    fn test_error_placeholder_format() {
        assert_eq!(error_placeholder("boom"), "[Erreur lors de l'analyse : boom]");
    }

    #[tokio::test]
    async fn test_successful_call_returns_trimmed_text() {
        let llm = MockProvider::new("  Thème : A\n");
        let analyzer = ChunkAnalyzer::new(llm.clone(), Duration::ZERO);

        let response = analyzer.analyze("extrait", 27, 0).await;
        assert_eq!(response.text, "Thème : A");
        assert!(!response.failed);
        assert!(!response.rate_limited);
        assert_eq!(llm.call_count(), 1);
        assert!(llm.prompts()[0].contains("\"\"\"extrait\"\"\""));
    }

    #[tokio::test]
    async fn test_failed_call_returns_placeholder() {
        let llm = MockProvider::default();
        llm.push_error("connection reset");
        let analyzer = ChunkAnalyzer::new(llm, Duration::ZERO);

        let response = analyzer.analyze("extrait", 1, 0).await;
        assert!(response.failed);
        assert!(!response.rate_limited);
        assert!(response.text.starts_with("[Erreur lors de l'analyse : "));
        assert!(response.text.contains("connection reset"));
    }

    #[tokio::test]
    async fn test_rate_limited_call_pauses_without_retry() {
        let llm = MockProvider::new("should not be reached");
        llm.push_error("Rate limit reached for model qwen-qwq-32b");
        let analyzer = ChunkAnalyzer::new(llm.clone(), Duration::from_millis(20));

        let started = std::time::Instant::now();
        let response = analyzer.analyze("extrait", 1, 0).await;

        assert!(response.failed);
        assert!(response.rate_limited);
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(llm.call_count(), 1);
    }
}
