//! Chunks command implementation.

use crate::cli::ChunksArgs;
use crate::config;
use crate::error::Result;
use crate::output::Formatter;
use verbatim_coder::{CoderError, Corpus, PdfReader, PipelineConfig, TextChunker};
use verbatim_domain::traits::DocumentReader;

/// Execute the chunks command.
///
/// Only `PDF_<interview>` has to be set; the model is never called.
pub fn execute_chunks(
    args: ChunksArgs,
    mut config: PipelineConfig,
    formatter: &Formatter,
) -> Result<()> {
    args.chunking.apply(&mut config);
    config::validate(&config)?;

    if args.interview == 0 || args.interview > config.interview_count {
        return Err(CoderError::UnknownInterview {
            index: args.interview,
            count: config.interview_count,
        }
        .into());
    }

    let doc = Corpus::locate(args.interview)?;
    let text = PdfReader::new().read_text(doc.path())?;
    let plan = TextChunker::new(config.chunk_size)
        .with_limit(config.chunk_cap())
        .plan(&text);

    println!("{}", formatter.chunk_plan(&doc, &plan)?);
    Ok(())
}
