//! The `examtrack subsection` commands.

use anyhow::Result;

use super::{open_session, resolve_exam, Context};

pub fn add(ctx: &Context, exam_key: String, name: String) -> Result<()> {
    let mut session = open_session(ctx)?;
    let exam = resolve_exam(&session.store, &exam_key)?;
    let id = session.store.add_subsection(&exam.id, &name)?;
    println!("Added subsection {} ({id})", name.trim());
    Ok(())
}
