//! Verbatim CLI - thematic coding of interview transcripts.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use verbatim_cli::commands;
use verbatim_cli::{config, Cli, Command, Formatter};

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> verbatim_cli::Result<()> {
    let cli = Cli::parse();

    let config = config::resolve(&cli)?;
    let formatter = Formatter::new(cli.format, !cli.no_color);

    match cli.command {
        Command::Analyze(args) => commands::execute_analyze(args, config, &formatter).await?,
        Command::Check => commands::execute_check(&config, &formatter)?,
        Command::Chunks(args) => commands::execute_chunks(args, config, &formatter)?,
    }

    Ok(())
}
