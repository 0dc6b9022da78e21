//! JSON result files

use crate::error::CoderError;
use std::fs;
use std::path::{Path, PathBuf};
use verbatim_domain::document::result_file_name;
use verbatim_domain::AnalysisRecord;

/// Writes one `Entretien_{index}.json` per interview
#[derive(Debug, Clone)]
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    /// Create a writer targeting `output_dir` (created on first write)
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory receiving result files
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Result file path for an interview
    pub fn path_for(&self, index: u32) -> PathBuf {
        self.output_dir.join(result_file_name(index))
    }

    /// Write the records as an indented UTF-8 JSON array, replacing any
    /// existing file. Returns the path written.
    pub fn write(&self, index: u32, records: &[AnalysisRecord]) -> Result<PathBuf, CoderError> {
        fs::create_dir_all(&self.output_dir)?;

        let path = self.path_for(index);
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&path, json)?;

        Ok(path)
    }
}
