//! Fixed sub-topic → major-topic table.
//!
//! Used as the fallback classifier when a pasted line does not name one of
//! the three major categories directly.

use crate::model::{TaxonomyGroup, TopicMajor};

/// Sub-topic label to major category, in curriculum order.
pub const SUB_TO_MAJOR: &[(&str, TopicMajor)] = &[
    ("Functions & Relations", TopicMajor::Functions),
    ("Polynomials", TopicMajor::Functions),
    ("Exponentials & Logs", TopicMajor::Functions),
    ("Circular Functions", TopicMajor::Functions),
    ("Differentiation", TopicMajor::Calculus),
    ("Applications of Diff", TopicMajor::Calculus),
    ("Integration", TopicMajor::Calculus),
    ("Probability", TopicMajor::Probability),
    ("Statistics", TopicMajor::Probability),
];

/// Major used when neither the literal nor the table resolves a line.
pub const FALLBACK_MAJOR: TopicMajor = TopicMajor::Functions;

/// Look up the major category for an exact sub-topic label.
pub fn major_for_sub(sub: &str) -> Option<TopicMajor> {
    SUB_TO_MAJOR
        .iter()
        .find(|(label, _)| *label == sub)
        .map(|(_, major)| *major)
}

/// Resolve the major for a parsed `<major> > <sub>` pair.
///
/// A raw major that exactly names a category wins; otherwise the sub-topic
/// is looked up, and failing that the result is [`FALLBACK_MAJOR`].
pub fn resolve_major(raw_major: &str, sub: Option<&str>) -> TopicMajor {
    TopicMajor::from_literal(raw_major.trim())
        .or_else(|| sub.and_then(major_for_sub))
        .unwrap_or(FALLBACK_MAJOR)
}

/// The table regrouped by major, for seeding a subject's taxonomy.
pub fn default_groups() -> Vec<TaxonomyGroup> {
    TopicMajor::ALL
        .into_iter()
        .map(|major| TaxonomyGroup {
            major,
            subs: SUB_TO_MAJOR
                .iter()
                .filter(|(_, m)| *m == major)
                .map(|(label, _)| label.to_string())
                .collect(),
        })
        .collect()
}
