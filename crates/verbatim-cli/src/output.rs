//! Output formatting for the CLI.

use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use verbatim_coder::{env_key, ChunkPlan, RunSummary};
use verbatim_domain::DocumentRef;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the validated corpus.
    pub fn corpus(&self, documents: &[DocumentRef]) -> Result<String> {
        if self.format == OutputFormat::Json {
            let json: Vec<serde_json::Value> = documents
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "index": d.index(),
                        "variable": env_key(d.index()),
                        "path": d.path().display().to_string(),
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&json)?);
        }

        let mut builder = Builder::default();
        builder.push_record(["Interview", "Variable", "Path"]);
        for doc in documents {
            builder.push_record(vec![
                doc.index().to_string(),
                env_key(doc.index()),
                doc.path().display().to_string(),
            ]);
        }

        Ok(self.render(builder))
    }

    /// Format the chunk plan of one interview.
    pub fn chunk_plan(&self, doc: &DocumentRef, plan: &ChunkPlan) -> Result<String> {
        if self.format == OutputFormat::Json {
            let json = serde_json::json!({
                "index": doc.index(),
                "total_chunks": plan.total,
                "analysed_chunks": plan.chunks.len(),
                "skipped_chunks": plan.skipped(),
                "analysed_chars": plan.analysed_chars(),
                "chunk_chars": plan.chunks.iter().map(|c| c.chars().count()).collect::<Vec<_>>(),
            });
            return Ok(serde_json::to_string_pretty(&json)?);
        }

        if plan.total == 0 {
            return Ok(self.warning(&format!(
                "Interview {} has no extractable text",
                doc.index()
            )));
        }

        let mut builder = Builder::default();
        builder.push_record(["Chunk", "Chars", "Starts with"]);
        for (i, chunk) in plan.chunks.iter().enumerate() {
            builder.push_record(vec![
                (i + 1).to_string(),
                chunk.chars().count().to_string(),
                preview(chunk, 40),
            ]);
        }

        let mut out = self.render(builder);
        out.push('\n');
        if plan.skipped() > 0 {
            out.push_str(&self.warning(&format!(
                "{} of {} chunks skipped by the chunk cap",
                plan.skipped(),
                plan.total
            )));
        } else {
            out.push_str(&self.info(&format!("All {} chunks would be analysed", plan.total)));
        }

        Ok(out)
    }

    /// Format the outcome of an analysis run.
    pub fn run_summary(&self, summary: &RunSummary) -> Result<String> {
        if self.format == OutputFormat::Json {
            let reports: Vec<serde_json::Value> = summary
                .reports
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "index": r.index,
                        "output": r.output_path.display().to_string(),
                        "text_chars": r.text_chars,
                        "chunks_analysed": r.chunks_analysed,
                        "chunks_skipped": r.chunks_skipped,
                        "failed_chunks": r.failed_chunks,
                        "dropped_blocks": r.dropped_blocks,
                        "records": r.records,
                    })
                })
                .collect();
            let failures: Vec<serde_json::Value> = summary
                .failures
                .iter()
                .map(|(index, message)| serde_json::json!({ "index": index, "error": message }))
                .collect();
            return Ok(serde_json::to_string_pretty(
                &serde_json::json!({ "reports": reports, "failures": failures }),
            )?);
        }

        let mut out = String::new();
        if !summary.reports.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Interview", "Chunks", "Skipped", "Failed", "Dropped", "Records", "File"]);
            for r in &summary.reports {
                builder.push_record(vec![
                    r.index.to_string(),
                    r.chunks_analysed.to_string(),
                    r.chunks_skipped.to_string(),
                    r.failed_chunks.to_string(),
                    r.dropped_blocks.to_string(),
                    r.records.to_string(),
                    r.output_path.display().to_string(),
                ]);
            }
            out.push_str(&self.render(builder));
            out.push('\n');
        }

        for (index, message) in &summary.failures {
            out.push_str(&self.error(&format!("Interview {}: {}", index, message)));
            out.push('\n');
        }

        out.push_str(&self.success(&format!(
            "{} interview(s) analysed, {} record(s) written",
            summary.reports.len(),
            summary.total_records()
        )));

        Ok(out)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// First `max` characters of a chunk on one line.
fn preview(text: &str, max: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .take(max)
        .collect();
    if text.chars().count() > max {
        format!("{}…", flat.trim_end())
    } else {
        flat.trim_end().to_string()
    }
}
