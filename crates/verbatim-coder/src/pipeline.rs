//! Document-by-document coding loop

use crate::analyzer::ChunkAnalyzer;
use crate::chunking::{ChunkPlan, TextChunker};
use crate::config::{FailurePolicy, PipelineConfig};
use crate::error::CoderError;
use crate::parser::parse_response;
use crate::writer::ResultWriter;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};
use verbatim_domain::traits::{DocumentReader, LlmProvider};
use verbatim_domain::{AnalysisRecord, DocumentRef};

/// Outcome of coding one interview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// Interview index
    pub index: u32,

    /// Result file written
    pub output_path: PathBuf,

    /// Characters of extracted text
    pub text_chars: usize,

    /// Chunks sent to the model
    pub chunks_analysed: usize,

    /// Chunks left out by the cap
    pub chunks_skipped: usize,

    /// Chunk requests that failed
    pub failed_chunks: usize,

    /// Blocks dropped for a missing field
    pub dropped_blocks: usize,

    /// Records written
    pub records: usize,
}

/// Outcome of a run over several interviews
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Interviews coded, in processing order
    pub reports: Vec<DocumentReport>,

    /// Interviews abandoned under `FailurePolicy::Continue`
    pub failures: Vec<(u32, String)>,
}

impl RunSummary {
    /// Records written across all interviews
    pub fn total_records(&self) -> usize {
        self.reports.iter().map(|r| r.records).sum()
    }
}

/// Reads, chunks, analyses, parses and writes, one interview at a time
pub struct Pipeline<L, R> {
    analyzer: ChunkAnalyzer<L>,
    reader: R,
    chunker: TextChunker,
    writer: ResultWriter,
    chunk_delay: Duration,
    failure_policy: FailurePolicy,
}

impl<L, R> Pipeline<L, R>
where
    L: LlmProvider,
    R: DocumentReader<Error = CoderError>,
{
    /// Create a new pipeline from a provider, a reader and settings
    pub fn new(llm: L, reader: R, config: &PipelineConfig) -> Self {
        Self {
            analyzer: ChunkAnalyzer::new(llm, config.rate_limit_pause()),
            reader,
            chunker: TextChunker::new(config.chunk_size).with_limit(config.chunk_cap()),
            writer: ResultWriter::new(config.output_dir.clone()),
            chunk_delay: config.chunk_delay(),
            failure_policy: config.failure_policy,
        }
    }

    /// Name of the model coding the chunks
    pub fn model_name(&self) -> &str {
        self.analyzer.llm().model_name()
    }

    /// The result writer
    pub fn writer(&self) -> &ResultWriter {
        &self.writer
    }

    /// Extract and chunk an interview without calling the model
    pub fn plan(&self, doc: &DocumentRef) -> Result<ChunkPlan, CoderError> {
        let text = self.reader.read_text(doc.path())?;
        Ok(self.chunker.plan(&text))
    }

    /// Code one interview and write its result file
    pub async fn process_document(&self, doc: &DocumentRef) -> Result<DocumentReport, CoderError> {
        info!("Analysing interview {}...", doc.index());

        let text = self.reader.read_text(doc.path())?;
        let plan = self.chunker.plan(&text);
        if plan.skipped() > 0 {
            info!(
                "Interview {}: analysing {} of {} chunks (cap reached)",
                doc.index(),
                plan.chunks.len(),
                plan.total
            );
        }

        let mut records: Vec<AnalysisRecord> = Vec::new();
        let mut failed_chunks = 0;
        let mut dropped_blocks = 0;

        for (i, chunk) in plan.chunks.iter().enumerate() {
            if i > 0 && !self.chunk_delay.is_zero() {
                tokio::time::sleep(self.chunk_delay).await;
            }

            info!("Chunk {} / {}", i + 1, plan.chunks.len());

            let response = self.analyzer.analyze(chunk, doc.index(), i).await;
            if response.failed {
                failed_chunks += 1;
            }

            let parsed = parse_response(&response.text);
            dropped_blocks += parsed.dropped_blocks;
            records.extend(parsed.records);
        }

        let output_path = self.writer.write(doc.index(), &records)?;
        info!("Result saved to {} ({} records)", output_path.display(), records.len());

        Ok(DocumentReport {
            index: doc.index(),
            output_path,
            text_chars: text.chars().count(),
            chunks_analysed: plan.chunks.len(),
            chunks_skipped: plan.skipped(),
            failed_chunks,
            dropped_blocks,
            records: records.len(),
        })
    }

    /// Code every given interview, in order
    ///
    /// Under `FailurePolicy::Abort` the first document-level error ends the
    /// run; under `FailurePolicy::Continue` it is logged and recorded.
    pub async fn run(&self, docs: &[DocumentRef]) -> Result<RunSummary, CoderError> {
        let mut summary = RunSummary::default();

        info!(
            "Coding {} interview(s) with model {}",
            docs.len(),
            self.model_name()
        );

        for doc in docs {
            match self.process_document(doc).await {
                Ok(report) => summary.reports.push(report),
                Err(e) => match self.failure_policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Continue => {
                        error!("Interview {} failed: {}", doc.index(), e);
                        summary.failures.push((doc.index(), e.to_string()));
                    }
                },
            }
        }

        info!(
            "{} interviews analysed, {} records written to {}",
            summary.reports.len(),
            summary.total_records(),
            self.writer.output_dir().display()
        );

        Ok(summary)
    }
}
