//! Check command implementation.

use crate::error::Result;
use crate::output::Formatter;
use verbatim_coder::{Corpus, PipelineConfig};

/// Execute the check command.
pub fn execute_check(config: &PipelineConfig, formatter: &Formatter) -> Result<()> {
    let corpus = Corpus::from_env(config.interview_count)?;

    println!("{}", formatter.corpus(corpus.documents())?);
    Ok(())
}
