//! Interview corpus loaded from `PDF_1`..`PDF_N`

use crate::error::CoderError;
use std::path::Path;
use tracing::debug;
use verbatim_domain::DocumentRef;

/// Environment variable holding the transcript path of an interview
pub fn env_key(index: u32) -> String {
    format!("PDF_{}", index)
}

/// The validated set of interview transcripts
///
/// Every configured path is checked at construction; a corpus with a
/// missing file never exists.
#[derive(Debug, Clone)]
pub struct Corpus {
    documents: Vec<DocumentRef>,
}

impl Corpus {
    /// Load `PDF_1`..`PDF_{count}` from the process environment
    pub fn from_env(count: u32) -> Result<Self, CoderError> {
        Self::from_lookup(count, |key| std::env::var(key).ok())
    }

    /// Load `PDF_1`..`PDF_{count}` through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// `CoderError::MissingDocument` for the first variable that is unset,
    /// blank, or does not name an existing file.
    pub fn from_lookup<F>(count: u32, lookup: F) -> Result<Self, CoderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let documents = (1..=count)
            .map(|index| locate_with(index, &lookup))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { documents })
    }

    /// Resolve a single interview from the process environment
    ///
    /// Used when only one transcript is needed and the rest of the corpus
    /// may be incomplete.
    pub fn locate(index: u32) -> Result<DocumentRef, CoderError> {
        locate_with(index, &|key: &str| std::env::var(key).ok())
    }

    /// All documents in index order
    pub fn documents(&self) -> &[DocumentRef] {
        &self.documents
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if the corpus holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Look up one interview
    pub fn get(&self, index: u32) -> Option<&DocumentRef> {
        self.documents.iter().find(|d| d.index() == index)
    }

    /// Documents for the requested indices, in request order
    ///
    /// An empty request selects the whole corpus.
    pub fn select(&self, indices: &[u32]) -> Result<Vec<DocumentRef>, CoderError> {
        if indices.is_empty() {
            return Ok(self.documents.clone());
        }

        indices
            .iter()
            .map(|&index| {
                self.get(index)
                    .cloned()
                    .ok_or(CoderError::UnknownInterview {
                        index,
                        count: self.documents.len() as u32,
                    })
            })
            .collect()
    }
}

fn locate_with<F>(index: u32, lookup: &F) -> Result<DocumentRef, CoderError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(&env_key(index)).filter(|v| !v.trim().is_empty()) {
        Some(path) if Path::new(&path).is_file() => {
            debug!("Interview {} -> {}", index, path);
            Ok(DocumentRef::new(index, path))
        }
        Some(path) => Err(CoderError::MissingDocument { index, path }),
        None => Err(CoderError::MissingDocument {
            index,
            path: "<unset>".to_string(),
        }),
    }
}
