//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use tracing::info;
use verbatim_coder::{Corpus, PdfReader, Pipeline, PipelineConfig};
use verbatim_llm::ChatCompletionProvider;

/// Execute the analyze command.
///
/// Everything that can fail before the first request (configuration, API key,
/// transcript paths, interview selection) is checked up front.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    mut config: PipelineConfig,
    formatter: &Formatter,
) -> Result<()> {
    args.apply(&mut config);
    config::validate(&config)?;

    let api_key = args
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(CliError::MissingApiKey)?;

    let corpus = Corpus::from_env(config.interview_count)?;
    let documents = corpus.select(&args.interviews)?;

    let mut llm = ChatCompletionProvider::new(&config.api_base, api_key, &config.model)?
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens);
    if let Some(timeout) = config.request_timeout() {
        llm = llm.with_timeout(timeout)?;
    }

    info!(
        "Analysing {} interview(s) with {} (max chunks: {})",
        documents.len(),
        config.model,
        config
            .chunk_cap()
            .map_or_else(|| "unlimited".to_string(), |n| n.to_string())
    );

    let pipeline = Pipeline::new(llm, PdfReader::new(), &config);
    let summary = pipeline.run(&documents).await?;

    println!("{}", formatter.run_summary(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use crate::output::OutputFormat;
    use clap::Parser;

    #[tokio::test]
    async fn test_invalid_config_fails_before_anything_else() {
        let cli = Cli::parse_from([
            "verbatim",
            "analyze",
            "--chunk-size",
            "0",
            "--api-key",
            "gsk_test",
        ]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        let formatter = Formatter::new(OutputFormat::Table, false);

        let err = execute_analyze(args, PipelineConfig::default(), &formatter)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[tokio::test]
    async fn test_blank_api_key_is_missing() {
        let cli = Cli::parse_from(["verbatim", "analyze", "--api-key", "  "]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        let formatter = Formatter::new(OutputFormat::Table, false);

        let err = execute_analyze(args, PipelineConfig::default(), &formatter)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::MissingApiKey));
    }
}
