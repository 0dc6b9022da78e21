//! PDF transcript reading

use crate::error::CoderError;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::debug;
use verbatim_domain::traits::DocumentReader;

/// Reads transcripts with `pdf-extract`
///
/// Pages are concatenated in order with no separator, no de-hyphenation and
/// no layout reconstruction.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new reader
    pub fn new() -> Self {
        Self
    }

    /// Extract text from in-memory PDF bytes
    pub fn read_bytes(&self, bytes: &[u8], path: &Path) -> Result<String, CoderError> {
        // pdf-extract panics on some malformed inputs
        let pages = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|_| CoderError::Pdf {
            path: path.to_path_buf(),
            message: "extractor panicked on malformed document".to_string(),
        })?
        .map_err(|e| CoderError::Pdf {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!("{}: {} pages", path.display(), pages.len());

        Ok(pages.concat())
    }
}

impl DocumentReader for PdfReader {
    type Error = CoderError;

    fn read_text(&self, path: &Path) -> Result<String, Self::Error> {
        let bytes = std::fs::read(path).map_err(|e| CoderError::Pdf {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.read_bytes(&bytes, path)
    }
}
