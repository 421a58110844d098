//! Core data model types for examtrack.
//!
//! Every record serializes with camelCase keys so the persisted data file and
//! the export envelope share one shape.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level subject category a question is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TopicMajor {
    Functions,
    Calculus,
    Probability,
}

impl TopicMajor {
    /// All majors, in display order.
    pub const ALL: [TopicMajor; 3] = [
        TopicMajor::Functions,
        TopicMajor::Calculus,
        TopicMajor::Probability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TopicMajor::Functions => "Functions",
            TopicMajor::Calculus => "Calculus",
            TopicMajor::Probability => "Probability",
        }
    }

    /// Exact, case-sensitive match against the three category names.
    pub fn from_literal(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl fmt::Display for TopicMajor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exam section a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Section {
    #[default]
    A,
    B,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::A => write!(f, "A"),
            Section::B => write!(f, "B"),
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Section::A),
            "B" | "b" => Ok(Section::B),
            other => Err(format!("unknown section: {other} (expected A or B)")),
        }
    }
}

/// UI colour theme, persisted alongside the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// A subject of study with its topic taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub taxonomy: Vec<TaxonomyGroup>,
}

/// One major category and the sub-topics filed under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyGroup {
    pub major: TopicMajor,
    #[serde(default)]
    pub subs: Vec<String>,
}

/// A single exam attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    pub subject_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Free-form date, usually `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A logical grouping of questions within an exam, e.g. one answer sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub exam_id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// A scored question, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub exam_id: String,
    pub page_id: String,
    pub q_number: u32,
    pub section: Section,
    pub topic_major: TopicMajor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_sub: Option<String>,
    pub max_marks: u32,
    pub awarded_marks: u32,
    pub correct: bool,
    pub short_prompt: String,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_minutes: Option<f64>,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A question before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDraft {
    pub exam_id: String,
    pub page_id: String,
    pub q_number: u32,
    pub section: Section,
    pub topic_major: TopicMajor,
    pub topic_sub: Option<String>,
    pub max_marks: u32,
    pub awarded_marks: u32,
    pub correct: bool,
    pub short_prompt: String,
    pub errors: Vec<String>,
    pub confidence: Option<u8>,
    pub time_minutes: Option<f64>,
    pub reference: Option<String>,
}

impl QuestionDraft {
    /// Attach an identity, producing the stored record.
    pub fn into_question(self, id: String) -> Question {
        Question {
            id,
            exam_id: self.exam_id,
            page_id: self.page_id,
            q_number: self.q_number,
            section: self.section,
            topic_major: self.topic_major,
            topic_sub: self.topic_sub,
            max_marks: self.max_marks,
            awarded_marks: self.awarded_marks,
            correct: self.correct,
            short_prompt: self.short_prompt,
            errors: self.errors,
            confidence: self.confidence,
            time_minutes: self.time_minutes,
            reference: self.reference,
        }
    }
}

/// A named subsection of an exam that reported scores can be attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsection {
    pub id: String,
    pub exam_id: String,
    pub name: String,
}

/// An externally graded percentage entered by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualScore {
    pub id: String,
    pub exam_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for [`crate::store::Store::add_subject`].
#[derive(Debug, Clone)]
pub struct NewSubject {
    pub name: String,
    pub taxonomy: Vec<TaxonomyGroup>,
}

/// Input for [`crate::store::Store::add_exam`].
#[derive(Debug, Clone, Default)]
pub struct NewExam {
    pub subject_id: String,
    pub title: String,
    pub provider: Option<String>,
    pub date: Option<String>,
    pub notes: Option<String>,
}

/// Input for [`crate::store::Store::add_page`].
#[derive(Debug, Clone)]
pub struct NewPage {
    pub exam_id: String,
    pub reference: String,
    pub order: Option<i64>,
}

/// Input for [`crate::store::Store::add_manual_score`].
#[derive(Debug, Clone, Default)]
pub struct NewManualScore {
    pub exam_id: String,
    pub subsection_id: Option<String>,
    pub label: Option<String>,
    pub percentage: f64,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_major_literal_is_case_sensitive() {
        assert_eq!(TopicMajor::from_literal("Calculus"), Some(TopicMajor::Calculus));
        assert_eq!(TopicMajor::from_literal("calculus"), None);
        assert_eq!(TopicMajor::from_literal("Algebra"), None);
    }

    #[test]
    fn section_display_and_parse() {
        assert_eq!(Section::B.to_string(), "B");
        assert_eq!("a".parse::<Section>().unwrap(), Section::A);
        assert!("C".parse::<Section>().is_err());
    }

    #[test]
    fn theme_toggles() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn question_uses_camel_case_keys() {
        let q = Question {
            id: "q-1".into(),
            exam_id: "e-1".into(),
            page_id: "p-1".into(),
            q_number: 3,
            section: Section::B,
            topic_major: TopicMajor::Calculus,
            topic_sub: Some("Integration".into()),
            max_marks: 4,
            awarded_marks: 2,
            correct: false,
            short_prompt: "area under curve".into(),
            errors: vec!["sign".into()],
            confidence: Some(2),
            time_minutes: None,
            reference: Some("p7".into()),
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["qNumber"], 3);
        assert_eq!(json["topicMajor"], "Calculus");
        assert_eq!(json["section"], "B");
        assert_eq!(json["ref"], "p7");
        assert!(json.get("timeMinutes").is_none());
    }

    #[test]
    fn question_missing_errors_defaults_to_empty() {
        let raw = r#"{
            "id": "q", "examId": "e", "pageId": "p", "qNumber": 1, "section": "A",
            "topicMajor": "Functions", "maxMarks": 1, "awardedMarks": 1,
            "correct": true, "shortPrompt": "x", "timeMinutes": 1.5
        }"#;
        let q: Question = serde_json::from_str(raw).unwrap();
        assert!(q.errors.is_empty());
        assert_eq!(q.time_minutes, Some(1.5));
        assert_eq!(q.reference, None);
    }
}
