//! The `examtrack export` and `examtrack import` commands.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::{open_session, Context};

pub fn export(ctx: &Context, output: Option<PathBuf>) -> Result<()> {
    let session = open_session(ctx)?;
    let json = session.store.export_all()?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write export to {}", path.display()))?;
            eprintln!("Exported to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn import(ctx: &Context, input: PathBuf) -> Result<()> {
    let raw = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read import file: {}", input.display()))?;

    let mut session = open_session(ctx)?;
    session.store.import_all(&raw)?;

    let snapshot = session.store.snapshot();
    println!(
        "Imported {} exam(s), {} page(s), {} question(s)",
        snapshot.exams.len(),
        snapshot.pages.len(),
        snapshot.questions.len()
    );
    Ok(())
}
