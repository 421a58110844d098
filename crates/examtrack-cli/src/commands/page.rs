//! The `examtrack page` commands.

use anyhow::Result;

use examtrack_core::model::NewPage;

use super::{open_session, resolve_exam, Context};

pub fn add(
    ctx: &Context,
    exam_key: String,
    reference: Option<String>,
    order: Option<i64>,
) -> Result<()> {
    let mut session = open_session(ctx)?;
    let exam = resolve_exam(&session.store, &exam_key)?;
    let existing = session.store.pages_for_exam(&exam.id).len();

    let reference = reference.unwrap_or_else(|| format!("page{}", existing + 1));
    let id = session.store.add_page(NewPage {
        exam_id: exam.id,
        reference: reference.clone(),
        order: Some(order.unwrap_or(existing as i64 + 1)),
    })?;
    println!("Added page {reference} ({id})");
    Ok(())
}
