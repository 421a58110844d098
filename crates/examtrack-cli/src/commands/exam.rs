//! The `examtrack exam` commands.

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};
use comfy_table::{Cell, Table};

use examtrack_core::model::NewExam;
use examtrack_core::statistics::{breakdown, totals};

use super::{open_session, resolve_exam, short_id, Context};
use crate::display::{kpi_table, or_dash, pct};

pub fn add(
    ctx: &Context,
    title: String,
    subject: Option<String>,
    provider: Option<String>,
    date: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    if let Some(d) = &date {
        NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{d}', expected YYYY-MM-DD"))?;
    }

    let mut session = open_session(ctx)?;
    let store = &mut session.store;
    let subject_id = subject.unwrap_or_else(|| store.default_subject_id());

    let id = store.add_exam(NewExam {
        subject_id,
        title,
        provider,
        date,
        notes,
    })?;
    println!("Added exam {id}");
    Ok(())
}

pub fn list(ctx: &Context) -> Result<()> {
    let session = open_session(ctx)?;
    let store = &session.store;

    if store.exams().is_empty() {
        println!("No exams yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Exam", "Provider", "Date", "Questions", "Score", "Id"]);
    for exam in store.exams() {
        let t = totals(store.questions_for_exam(&exam.id));
        table.add_row(vec![
            Cell::new(&exam.title),
            Cell::new(or_dash(exam.provider.as_deref())),
            Cell::new(exam.date.as_deref().unwrap_or("undated")),
            Cell::new(store.questions_for_exam(&exam.id).count()),
            Cell::new(pct(t.pct)),
            Cell::new(short_id(&exam.id)),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn show(ctx: &Context, key: String) -> Result<()> {
    let session = open_session(ctx)?;
    let store = &session.store;
    let exam = resolve_exam(store, &key)?;

    println!("{}", exam.title);
    println!(
        "{} • {}",
        or_dash(exam.provider.as_deref()),
        exam.date.as_deref().unwrap_or("undated")
    );
    if let Some(notes) = &exam.notes {
        println!("{notes}");
    }
    println!(
        "{}",
        kpi_table(&breakdown(store.questions_for_exam(&exam.id)), None)
    );

    for page in store.pages_for_exam(&exam.id) {
        println!("\nPage {} ({})", page.reference, short_id(&page.id));
        let mut table = Table::new();
        table.set_header(vec![
            "Q#",
            "Section",
            "Topic",
            "max/awarded",
            "Correct",
            "Prompt",
            "Errors",
            "Conf",
            "Time",
            "Ref",
        ]);
        for q in store.questions_for_page(&page.id) {
            let topic = match &q.topic_sub {
                Some(sub) => format!("{} > {sub}", q.topic_major),
                None => q.topic_major.to_string(),
            };
            table.add_row(vec![
                Cell::new(q.q_number),
                Cell::new(q.section),
                Cell::new(topic),
                Cell::new(format!("{}/{}", q.max_marks, q.awarded_marks)),
                Cell::new(if q.correct { "correct" } else { "wrong" }),
                Cell::new(&q.short_prompt),
                Cell::new(q.errors.join("/")),
                Cell::new(q.confidence.map(|c| c.to_string()).unwrap_or_default()),
                Cell::new(q.time_minutes.map(|t| t.to_string()).unwrap_or_default()),
                Cell::new(q.reference.as_deref().unwrap_or_default()),
            ]);
        }
        println!("{table}");
    }

    let subsections = store.subsections_for_exam(&exam.id);
    if !subsections.is_empty() {
        let names: Vec<&str> = subsections.iter().map(|s| s.name.as_str()).collect();
        println!("\nSubsections: {}", names.join(", "));
    }

    let reported = store.manual_scores_for_exam(&exam.id);
    println!("\nReported scores");
    if reported.is_empty() {
        println!("  none");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["When", "Label", "%"]);
        for score in reported {
            table.add_row(vec![
                Cell::new(
                    score
                        .created_at
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M"),
                ),
                Cell::new(or_dash(score.label.as_deref())),
                Cell::new(format!("{}%", score.percentage)),
            ]);
        }
        println!("{table}");
    }

    Ok(())
}
