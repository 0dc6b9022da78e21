//! CLI command definitions and argument parsing.

use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use verbatim_coder::{FailurePolicy, PipelineConfig};

/// Verbatim - thematic coding of interview transcripts with an LLM.
#[derive(Debug, Parser)]
#[command(name = "verbatim")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Pipeline configuration file (TOML)
    #[arg(short, long, global = true, env = "VERBATIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of PDF_* variables making up the corpus
    #[arg(long, global = true)]
    pub count: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Code interviews and write their result files
    Analyze(AnalyzeArgs),

    /// Validate the configured transcript paths
    Check,

    /// Show how an interview would be chunked, without calling the model
    Chunks(ChunksArgs),
}

/// Chunking overrides shared by `analyze` and `chunks`.
#[derive(Debug, Clone, Args)]
pub struct ChunkingArgs {
    /// Maximum chunks analysed per interview (0 disables the cap)
    #[arg(long, conflicts_with = "no_chunk_limit")]
    pub max_chunks: Option<usize>,

    /// Analyse every chunk of every interview
    #[arg(long)]
    pub no_chunk_limit: bool,

    /// Chunk length in characters
    #[arg(long)]
    pub chunk_size: Option<usize>,
}

impl ChunkingArgs {
    /// Apply the overrides to a configuration.
    pub fn apply(&self, config: &mut PipelineConfig) {
        if self.no_chunk_limit {
            config.max_chunks = 0;
        } else if let Some(max_chunks) = self.max_chunks {
            config.max_chunks = max_chunks;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
    }
}

/// Arguments for the analyze command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Interview index to analyse (repeatable; default: every interview)
    #[arg(short = 'i', long = "interview")]
    pub interviews: Vec<u32>,

    #[command(flatten)]
    pub chunking: ChunkingArgs,

    /// Directory receiving the JSON result files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Root of the OpenAI-compatible API
    #[arg(long, env = "VERBATIM_API_BASE")]
    pub api_base: Option<String>,

    /// API credential
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Seconds to wait between two chunk requests
    #[arg(long)]
    pub chunk_delay: Option<u64>,

    /// Keep going when an interview cannot be read or written
    #[arg(long)]
    pub continue_on_error: bool,
}

impl AnalyzeArgs {
    /// Apply the overrides to a configuration.
    pub fn apply(&self, config: &mut PipelineConfig) {
        self.chunking.apply(config);
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(delay) = self.chunk_delay {
            config.chunk_delay_secs = delay;
        }
        if self.continue_on_error {
            config.failure_policy = FailurePolicy::Continue;
        }
    }
}

/// Arguments for the chunks command.
#[derive(Debug, Args)]
pub struct ChunksArgs {
    /// Interview index
    #[arg(short = 'i', long = "interview")]
    pub interview: u32,

    #[command(flatten)]
    pub chunking: ChunkingArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(args: &[&str]) -> AnalyzeArgs {
        let mut argv = vec!["verbatim", "analyze"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Command::Analyze(args) => args,
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from(["verbatim", "--count", "3", "--no-color", "check"]);
        assert!(matches!(cli.command, Command::Check));
        assert_eq!(cli.count, Some(3));
        assert!(cli.no_color);
    }

    #[test]
    fn test_repeated_interview_flags() {
        let args = analyze(&["-i", "27", "-i", "3"]);
        assert_eq!(args.interviews, vec![27, 3]);
    }

    #[test]
    fn test_analyze_defaults_leave_config_untouched() {
        let args = analyze(&["--api-key", "k"]);
        let mut config = PipelineConfig::default();
        args.apply(&mut config);

        let defaults = PipelineConfig {
            api_base: config.api_base.clone(),
            ..PipelineConfig::default()
        };
        assert_eq!(config, defaults);
    }

    #[test]
    fn test_analyze_overrides() {
        let args = analyze(&[
            "--max-chunks",
            "2",
            "--chunk-size",
            "800",
            "-o",
            "out",
            "--model",
            "llama-3.3-70b-versatile",
            "--chunk-delay",
            "0",
            "--continue-on-error",
        ]);
        let mut config = PipelineConfig::default();
        args.apply(&mut config);

        assert_eq!(config.chunk_cap(), Some(2));
        assert_eq!(config.chunk_size, 800);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.chunk_delay_secs, 0);
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
    }

    #[test]
    fn test_no_chunk_limit() {
        let args = analyze(&["--no-chunk-limit"]);
        let mut config = PipelineConfig::default();
        args.apply(&mut config);
        assert_eq!(config.chunk_cap(), None);
    }

    #[test]
    fn test_chunk_limit_flags_conflict() {
        let result = Cli::try_parse_from([
            "verbatim",
            "analyze",
            "--max-chunks",
            "3",
            "--no-chunk-limit",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_chunks_requires_interview() {
        assert!(Cli::try_parse_from(["verbatim", "chunks"]).is_err());

        let cli = Cli::parse_from(["verbatim", "chunks", "-i", "5", "--chunk-size", "100"]);
        match cli.command {
            Command::Chunks(args) => {
                assert_eq!(args.interview, 5);
                assert_eq!(args.chunking.chunk_size, Some(100));
            }
            _ => panic!("Expected Chunks command"),
        }
    }

    #[test]
    fn test_json_format() {
        let cli = Cli::parse_from(["verbatim", "check", "--format", "json"]);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
