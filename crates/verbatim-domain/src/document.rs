//! Document references - which interview lives where

use std::fmt;
use std::path::{Path, PathBuf};

/// An interview transcript known to the pipeline
///
/// Built once from configuration at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentRef {
    index: u32,
    path: PathBuf,
}

impl DocumentRef {
    /// Create a new document reference
    ///
    /// # Examples
    ///
    /// ```
    /// use verbatim_domain::DocumentRef;
    ///
    /// let doc = DocumentRef::new(27, "/data/entretien_27.pdf");
    /// assert_eq!(doc.index(), 27);
    /// assert_eq!(doc.result_file_name(), "Entretien_27.json");
    /// ```
    pub fn new(index: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            path: path.into(),
        }
    }

    /// Interview index (1-based)
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Path of the transcript
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the JSON file holding this interview's results
    pub fn result_file_name(&self) -> String {
        result_file_name(self.index)
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entretien {} ({})", self.index, self.path.display())
    }
}

/// Name of the result file for an interview index
pub fn result_file_name(index: u32) -> String {
    format!("Entretien_{}.json", index)
}
