//! Analysis records - the output unit of thematic coding

use serde::{Deserialize, Serialize};

/// One coded excerpt: a general theme, a specific aspect of it, and a
/// direct quotation from the transcript supporting both.
///
/// Serialized with the French field name `sous_theme` for the sub-theme,
/// which is the format of the result files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// General topic
    pub theme: String,

    /// Specific aspect of the theme
    #[serde(rename = "sous_theme")]
    pub sub_theme: String,

    /// Supporting quotation, without surrounding quotation marks
    pub verbatim: String,
}

impl AnalysisRecord {
    /// Build a record if all three fields are non-empty after trimming
    ///
    /// # Examples
    ///
    /// ```
    /// use verbatim_domain::AnalysisRecord;
    ///
    /// assert!(AnalysisRecord::try_new("Études", "Orientation", "J'ai choisi seul.").is_some());
    /// assert!(AnalysisRecord::try_new("Études", "", "J'ai choisi seul.").is_none());
    /// ```
    pub fn try_new(
        theme: impl Into<String>,
        sub_theme: impl Into<String>,
        verbatim: impl Into<String>,
    ) -> Option<Self> {
        let record = Self {
            theme: theme.into().trim().to_string(),
            sub_theme: sub_theme.into().trim().to_string(),
            verbatim: verbatim.into().trim().to_string(),
        };
        record.is_complete().then_some(record)
    }

    /// True when every field carries text
    pub fn is_complete(&self) -> bool {
        !self.theme.is_empty() && !self.sub_theme.is_empty() && !self.verbatim.is_empty()
    }
}
