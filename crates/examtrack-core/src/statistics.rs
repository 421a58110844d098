//! Mark, time and confidence rollups over question collections.
//!
//! Every function here takes any iterator of question references, so callers
//! can pass a whole store, one exam's questions, or a filtered view without
//! collecting first.

use serde::{Deserialize, Serialize};

use crate::model::{Exam, Question, TopicMajor};

/// Summary statistics over a set of questions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of `max_marks`.
    pub max: u64,
    /// Sum of `awarded_marks`.
    pub got: u64,
    /// `got / max * 100`, or 0 when `max` is 0.
    pub pct: f64,
    /// Sum of recorded minutes; missing times count as 0.
    pub time: f64,
    /// Mean confidence over *all* questions, missing confidence counting as 0.
    pub conf_avg: f64,
}

/// Compute [`Totals`] for a collection of questions.
///
/// The confidence mean divides by the number of questions, not by the number
/// of questions that carry a confidence.
pub fn totals<'a, I>(questions: I) -> Totals
where
    I: IntoIterator<Item = &'a Question>,
{
    let mut max = 0u64;
    let mut got = 0u64;
    let mut time = 0.0f64;
    let mut conf_sum = 0u64;
    let mut count = 0usize;

    for q in questions {
        max += u64::from(q.max_marks);
        got += u64::from(q.awarded_marks);
        time += q.time_minutes.unwrap_or(0.0);
        conf_sum += u64::from(q.confidence.unwrap_or(0));
        count += 1;
    }

    let pct = if max > 0 {
        got as f64 / max as f64 * 100.0
    } else {
        0.0
    };
    let conf_avg = if count > 0 {
        conf_sum as f64 / count as f64
    } else {
        0.0
    };

    Totals {
        max,
        got,
        pct,
        time,
        conf_avg,
    }
}

/// Percentage for the questions filed under one major topic.
pub fn pct_by_major<'a, I>(questions: I, major: TopicMajor) -> f64
where
    I: IntoIterator<Item = &'a Question>,
{
    totals(questions.into_iter().filter(|q| q.topic_major == major)).pct
}

/// Overall totals plus the percentage for each major topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicBreakdown {
    pub overall: Totals,
    pub by_major: Vec<(TopicMajor, f64)>,
}

impl TopicBreakdown {
    pub fn pct_for(&self, major: TopicMajor) -> f64 {
        self.by_major
            .iter()
            .find(|(m, _)| *m == major)
            .map(|(_, pct)| *pct)
            .unwrap_or(0.0)
    }
}

/// Compute the overall totals and all three per-major percentages.
pub fn breakdown<'a, I>(questions: I) -> TopicBreakdown
where
    I: IntoIterator<Item = &'a Question>,
    I::IntoIter: Clone,
{
    let iter = questions.into_iter();
    TopicBreakdown {
        overall: totals(iter.clone()),
        by_major: TopicMajor::ALL
            .into_iter()
            .map(|major| (major, pct_by_major(iter.clone(), major)))
            .collect(),
    }
}

/// Totals for one exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamSummary {
    pub exam_id: String,
    pub title: String,
    pub totals: Totals,
}

/// Per-exam totals, in the order the exams are given.
pub fn summarize_exams(exams: &[Exam], questions: &[Question]) -> Vec<ExamSummary> {
    exams
        .iter()
        .map(|exam| ExamSummary {
            exam_id: exam.id.clone(),
            title: exam.title.clone(),
            totals: totals(questions.iter().filter(|q| q.exam_id == exam.id)),
        })
        .collect()
}
