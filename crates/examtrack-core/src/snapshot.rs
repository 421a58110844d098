//! The JSON envelope used for both the persisted data file and export/import.
//!
//! ```json
//! { "theme": "light", "subjects": [], "exams": [], "pages": [],
//!   "questions": [], "subsections": [], "manualScores": [] }
//! ```
//!
//! Every key is optional on the way in and unknown keys are ignored, so files
//! written by older versions still load.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::{Exam, ManualScore, Page, Question, Subject, Subsection, Theme};

/// The complete tracker state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub exams: Vec<Exam>,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
    #[serde(default)]
    pub manual_scores: Vec<ManualScore>,
}

impl Snapshot {
    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(StoreError::Serialize)
    }

    /// Parse an envelope, defaulting any missing collection.
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        serde_json::from_str(raw).map_err(StoreError::InvalidData)
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
            && self.exams.is_empty()
            && self.pages.is_empty()
            && self.questions.is_empty()
            && self.subsections.is_empty()
            && self.manual_scores.is_empty()
    }
}
