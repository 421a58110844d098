//! The `examtrack subject` commands.

use anyhow::Result;

use examtrack_core::model::NewSubject;
use examtrack_core::taxonomy;

use super::{open_session, Context};

pub fn add(ctx: &Context, name: String) -> Result<()> {
    let mut session = open_session(ctx)?;
    let id = session.store.add_subject(NewSubject {
        name,
        taxonomy: taxonomy::default_groups(),
    })?;
    println!("Added subject {id}");
    Ok(())
}
