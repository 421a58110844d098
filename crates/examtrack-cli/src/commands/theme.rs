//! The `examtrack theme` command.

use anyhow::Result;

use super::{open_session, Context};

pub fn execute(ctx: &Context) -> Result<()> {
    let mut session = open_session(ctx)?;
    let theme = session.store.toggle_theme()?;
    println!("Theme: {theme}");
    Ok(())
}
