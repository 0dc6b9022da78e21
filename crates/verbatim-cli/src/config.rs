//! Configuration resolution for the CLI.
//!
//! Settings come from, in increasing precedence: built-in defaults, the
//! optional TOML file, then command-line flags. Secrets only ever come from
//! the environment (or `.env`).

use crate::cli::Cli;
use crate::error::{CliError, Result};
use std::path::Path;
use verbatim_coder::PipelineConfig;

/// Load the pipeline configuration from file, or defaults when no file is given.
pub fn load(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => Ok(PipelineConfig::from_file(path)?),
        None => Ok(PipelineConfig::default()),
    }
}

/// Resolve the base configuration for a parsed command line.
pub fn resolve(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = load(cli.config.as_deref())?;
    if let Some(count) = cli.count {
        config.interview_count = count;
    }
    Ok(config)
}

/// Validate a configuration after all overrides were applied.
pub fn validate(config: &PipelineConfig) -> Result<()> {
    config.validate().map_err(CliError::Config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_without_file() {
        let config = load(None).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verbatim.toml");
        std::fs::write(&path, "max_chunks = 0\noutput_dir = \"out\"\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.chunk_cap(), None);
        assert_eq!(config.output_dir, std::path::PathBuf::from("out"));
    }

    #[test]
    fn test_count_flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verbatim.toml");
        std::fs::write(&path, "interview_count = 10\n").unwrap();

        let cli = Cli::parse_from([
            "verbatim",
            "--config",
            path.to_str().unwrap(),
            "--count",
            "3",
            "check",
        ]);
        assert_eq!(resolve(&cli).unwrap().interview_count, 3);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verbatim.toml");
        std::fs::write(&path, "temperature = 9.0\n").unwrap();

        assert!(load(Some(&path)).is_err());
    }

    #[test]
    fn test_validate_reports_config_error() {
        let mut config = PipelineConfig::default();
        config.chunk_size = 0;
        assert!(matches!(validate(&config), Err(CliError::Config(_))));
    }
}
