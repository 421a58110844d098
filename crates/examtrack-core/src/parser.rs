//! Pasted-line question parser.
//!
//! Each line follows a fixed pipe-delimited grammar:
//!
//! ```text
//! Q<n> | <major> > <sub> | <max>/<awarded> | correct|wrong | "<prompt>" | [error: a/b | ] conf:<1-5> | time:<min?> | ref:<rest of line>
//! ```
//!
//! Lines that do not match are skipped, never reported as errors: pasted
//! blocks routinely carry blank lines and annotations.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::{QuestionDraft, Section};
use crate::taxonomy;

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^Q(?P<num>[0-9]+)\s*\|",
        r"\s*(?P<major>[^>|]+?)\s*>\s*(?P<sub>[^|]*)\|",
        r"\s*(?P<max>[0-9]+)\s*/\s*(?P<awarded>[0-9]+)\s*\|",
        r"\s*(?P<verdict>correct|wrong)\s*\|",
        r#"\s*"(?P<prompt>[^"]+)"\s*\|"#,
        r"\s*(?:error:\s*(?P<errors>[^|]+)\s*\|\s*)?",
        r"conf:(?P<conf>[1-5])\s*\|",
        r"\s*time:(?P<time>[0-9]*)\s*\|",
        r"\s*ref:\s*(?P<ref>.+)$",
    ))
    .unwrap()
});

/// Parse one trimmed line into a question draft.
///
/// Returns `None` when the line deviates from the grammar in any way,
/// including a question number or marks too large for `u32`.
pub fn parse_line(
    line: &str,
    exam_id: &str,
    page_id: &str,
    section: Section,
) -> Option<QuestionDraft> {
    let caps = LINE_RE.captures(line)?;

    let topic_sub = Some(caps["sub"].trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let topic_major = taxonomy::resolve_major(&caps["major"], topic_sub.as_deref());

    Some(QuestionDraft {
        exam_id: exam_id.to_string(),
        page_id: page_id.to_string(),
        q_number: caps["num"].parse().ok()?,
        section,
        topic_major,
        topic_sub,
        max_marks: caps["max"].parse().ok()?,
        awarded_marks: caps["awarded"].parse().ok()?,
        correct: caps["verdict"].eq_ignore_ascii_case("correct"),
        short_prompt: caps["prompt"].trim().to_string(),
        errors: error_tags(&caps),
        confidence: Some(caps["conf"].parse().ok()?),
        time_minutes: match &caps["time"] {
            "" => None,
            digits => Some(digits.parse::<f64>().ok()?),
        },
        reference: Some(caps["ref"].trim().to_string()),
    })
}

fn error_tags(caps: &Captures<'_>) -> Vec<String> {
    match caps.name("errors").map(|m| m.as_str().trim()) {
        Some(raw) if !raw.is_empty() => raw.split('/').map(|s| s.trim().to_string()).collect(),
        _ => Vec::new(),
    }
}

/// Parse a block of lines, keeping only the ones that match.
///
/// Order is preserved. Blank lines and malformed lines are dropped without
/// any count being returned.
pub fn parse_lines<I, S>(
    lines: I,
    exam_id: &str,
    page_id: &str,
    section: Section,
) -> Vec<QuestionDraft>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut drafts = Vec::new();
    let mut skipped = 0usize;

    for raw in lines {
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line, exam_id, page_id, section) {
            Some(draft) => drafts.push(draft),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(parsed = drafts.len(), skipped, "skipped unparseable lines");
    }

    drafts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TopicMajor;

    fn parse(line: &str) -> Option<QuestionDraft> {
        parse_line(line, "exam-1", "page-1", Section::A)
    }

    #[test]
    fn parse_full_line() {
        let q = parse(
            r#"Q1 | Functions > Polynomials | 2/2 | correct | "factorise cubic" | conf:4 | time:2 | ref:page1"#,
        )
        .unwrap();
        assert_eq!(q.q_number, 1);
        assert_eq!(q.topic_major, TopicMajor::Functions);
        assert_eq!(q.topic_sub.as_deref(), Some("Polynomials"));
        assert_eq!(q.max_marks, 2);
        assert_eq!(q.awarded_marks, 2);
        assert!(q.correct);
        assert_eq!(q.short_prompt, "factorise cubic");
        assert!(q.errors.is_empty());
        assert_eq!(q.confidence, Some(4));
        assert_eq!(q.time_minutes, Some(2.0));
        assert_eq!(q.reference.as_deref(), Some("page1"));
        assert_eq!(q.exam_id, "exam-1");
        assert_eq!(q.page_id, "page-1");
        assert_eq!(q.section, Section::A);
    }

    #[test]
    fn unknown_major_and_sub_default_to_functions() {
        let q = parse(r#"Q2 | Algebra > Unknown Topic | 1/0 | wrong | "x" | conf:3 | time: | ref:p2"#)
            .unwrap();
        assert_eq!(q.topic_major, TopicMajor::Functions);
        assert_eq!(q.topic_sub.as_deref(), Some("Unknown Topic"));
        assert!(!q.correct);
        assert_eq!(q.time_minutes, None);
        assert_eq!(q.reference.as_deref(), Some("p2"));
    }

    #[test]
    fn major_derived_from_sub() {
        let q = parse(r#"Q3 | Methods > Integration | 3/1 | wrong | "area" | conf:2 | time:5 | ref:p3"#)
            .unwrap();
        assert_eq!(q.topic_major, TopicMajor::Calculus);
    }

    #[test]
    fn error_tags_are_split_and_trimmed() {
        let q = parse(
            r#"Q4 | Calculus > Differentiation | 2/1 | wrong | "chain rule" | error: off-by-one/sign error | conf:2 | time:4 | ref:p4"#,
        )
        .unwrap();
        assert_eq!(q.errors, vec!["off-by-one", "sign error"]);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let q = parse(r#"q5 | Probability > Statistics | 1/1 | CORRECT | "mean" | ERROR: units | CONF:5 | TIME:1 | REF:p5"#)
            .unwrap();
        assert_eq!(q.q_number, 5);
        assert!(q.correct);
        assert_eq!(q.errors, vec!["units"]);
        assert_eq!(q.confidence, Some(5));
    }

    #[test]
    fn empty_sub_is_absent() {
        let q = parse(r#"Q6 | Calculus > | 1/1 | correct | "limits" | conf:3 | time:1 | ref:p6"#).unwrap();
        assert_eq!(q.topic_sub, None);
        assert_eq!(q.topic_major, TopicMajor::Calculus);
    }

    #[test]
    fn ref_consumes_rest_of_line_including_pipes() {
        let q = parse(r#"Q7 | Functions > Polynomials | 1/1 | correct | "p" | conf:1 | time:1 | ref:  book 2 | ch 3  "#.trim())
            .unwrap();
        assert_eq!(q.reference.as_deref(), Some("book 2 | ch 3"));
    }

    #[test]
    fn reject_missing_conf() {
        assert!(parse(r#"Q1 | Functions > Polynomials | 2/2 | correct | "p" | time:2 | ref:page1"#).is_none());
    }

    #[test]
    fn reject_conf_out_of_range() {
        assert!(parse(r#"Q1 | Functions > Polynomials | 2/2 | correct | "p" | conf:6 | time:2 | ref:page1"#).is_none());
        assert!(parse(r#"Q1 | Functions > Polynomials | 2/2 | correct | "p" | conf:0 | time:2 | ref:page1"#).is_none());
    }

    #[test]
    fn reject_structural_deviations() {
        // no arrow between major and sub
        assert!(parse(r#"Q1 | Functions | 2/2 | correct | "p" | conf:4 | time:2 | ref:x"#).is_none());
        // verdict literal
        assert!(parse(r#"Q1 | Functions > P | 2/2 | right | "p" | conf:4 | time:2 | ref:x"#).is_none());
        // unquoted prompt
        assert!(parse(r#"Q1 | Functions > P | 2/2 | correct | p | conf:4 | time:2 | ref:x"#).is_none());
        // non-numeric marks
        assert!(parse(r#"Q1 | Functions > P | two/2 | correct | "p" | conf:4 | time:2 | ref:x"#).is_none());
        // empty ref
        assert!(parse(r#"Q1 | Functions > P | 2/2 | correct | "p" | conf:4 | time:2 | ref:"#).is_none());
        // no question number
        assert!(parse(r#"Q | Functions > P | 2/2 | correct | "p" | conf:4 | time:2 | ref:x"#).is_none());
    }

    #[test]
    fn reject_overflowing_counts() {
        assert!(parse(r#"Q99999999999 | Functions > P | 2/2 | correct | "p" | conf:4 | time:2 | ref:x"#).is_none());
        assert!(parse(r#"Q1 | Functions > P | 99999999999/2 | correct | "p" | conf:4 | time:2 | ref:x"#).is_none());
    }

    #[test]
    fn large_time_is_kept() {
        let q = parse(r#"Q1 | Functions > P | 2/2 | correct | "p" | conf:4 | time:5000000000 | ref:x"#)
            .unwrap();
        assert_eq!(q.time_minutes, Some(5_000_000_000.0));
    }

    #[test]
    fn batch_keeps_valid_lines_in_order() {
        let text = r#"Q1 | Functions > Polynomials | 2/2 | correct | "a" | conf:4 | time:2 | ref:p1
this is a note, not a question
Q2 | Calculus > Integration | 3/1 | wrong | "b" | conf:2 | time:5 | ref:p1
Q3 | Calculus > Integration | 3/1 | wrong | "c" | time:5 | ref:p1
Q4 | Probability > Statistics | 1/1 | correct | "d" | conf:5 | time: | ref:p1"#;
        let drafts = parse_lines(text.lines(), "e", "p", Section::B);
        assert_eq!(drafts.len(), 3);
        let numbers: Vec<u32> = drafts.iter().map(|d| d.q_number).collect();
        assert_eq!(numbers, vec![1, 2, 4]);
        assert!(drafts.iter().all(|d| d.section == Section::B));
        assert!(drafts.iter().all(|d| d.exam_id == "e" && d.page_id == "p"));
    }

    #[test]
    fn batch_skips_blank_and_trims_lines() {
        let lines = vec![
            "",
            "   ",
            r#"   Q1 | Functions > Polynomials | 2/2 | correct | "a" | conf:4 | time:2 | ref:p1   "#,
        ];
        let drafts = parse_lines(lines, "e", "p", Section::A);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].reference.as_deref(), Some("p1"));
    }

    #[test]
    fn batch_of_nothing_is_empty() {
        let drafts = parse_lines(Vec::<String>::new(), "e", "p", Section::A);
        assert!(drafts.is_empty());
    }
}
