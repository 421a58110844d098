//! The `examtrack dashboard` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use examtrack_core::statistics::{breakdown, summarize_exams};

use super::{open_session, short_id, Context};
use crate::display::{kpi_table, or_dash, pct};

pub fn execute(ctx: &Context) -> Result<()> {
    let session = open_session(ctx)?;
    let store = &session.store;

    let overall = breakdown(store.questions());
    println!("Overall accuracy");
    println!("{}", kpi_table(&overall, Some(store.questions().len())));

    if store.exams().is_empty() {
        println!("\nNo exams yet. Run `examtrack exam add --title <TITLE>` to create one.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Exam", "Provider", "Date", "Score", "Id"]);
    for (exam, summary) in store
        .exams()
        .iter()
        .zip(summarize_exams(store.exams(), store.questions()))
    {
        table.add_row(vec![
            Cell::new(&exam.title),
            Cell::new(or_dash(exam.provider.as_deref())),
            Cell::new(exam.date.as_deref().unwrap_or("undated")),
            Cell::new(pct(summary.totals.pct)),
            Cell::new(short_id(&exam.id)),
        ]);
    }
    println!("\nExams");
    println!("{table}");

    Ok(())
}
