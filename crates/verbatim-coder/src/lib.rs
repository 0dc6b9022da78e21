//! Verbatim Coder
//!
//! Qualitative thematic coding of interview transcripts with an LLM.
//!
//! # Overview
//!
//! Each interview transcript is read from PDF, cut into fixed-size character
//! chunks, and every chunk is sent to a chat-completion model with a coding
//! instruction. The model's plain-text answer is parsed into
//! theme / sub-theme / verbatim records which are written to one JSON file
//! per interview.
//!
//! # Architecture
//!
//! ```text
//! PDF_n → PdfReader → TextChunker → ChunkAnalyzer → LLM → parser → ResultWriter
//! ```
//!
//! Processing is strictly sequential: one request is awaited before the next
//! chunk is sent, with a fixed pause between chunks.
//!
//! # Example Usage
//!
//! ```no_run
//! use verbatim_coder::{Corpus, PdfReader, Pipeline, PipelineConfig};
//! use verbatim_llm::ChatCompletionProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::default();
//! let corpus = Corpus::from_env(config.interview_count)?;
//!
//! let llm = ChatCompletionProvider::new(&config.api_base, "gsk_...", &config.model)?;
//! let pipeline = Pipeline::new(llm, PdfReader::new(), &config);
//!
//! let summary = pipeline.run(&corpus.select(&[27])?).await?;
//! println!("{} records written", summary.total_records());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod chunking;
mod config;
mod corpus;
mod error;
mod parser;
mod pdf;
mod pipeline;
mod prompt;
mod writer;


pub use analyzer::{error_placeholder, is_rate_limited, ChunkAnalyzer, ChunkResponse};
pub use chunking::{ChunkPlan, TextChunker};
pub use config::{FailurePolicy, PipelineConfig, DEFAULT_INTERVIEW_COUNT};
pub use corpus::{env_key, Corpus};
pub use error::CoderError;
pub use parser::{parse_response, ParsedResponse};
pub use pdf::PdfReader;
pub use pipeline::{DocumentReport, Pipeline, RunSummary};
pub use prompt::PromptBuilder;
pub use writer::ResultWriter;
