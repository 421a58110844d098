//! The `examtrack paste` command.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use examtrack_core::model::Section;

use super::{open_session, resolve_exam, Context};

pub fn execute(
    ctx: &Context,
    exam_key: String,
    page_key: String,
    section: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let mut session = open_session(ctx)?;

    let section = match section {
        Some(s) => s.parse::<Section>().map_err(|e| anyhow::anyhow!(e))?,
        None => session.config.default_section,
    };

    let exam = resolve_exam(&session.store, &exam_key)?;
    let page = session
        .store
        .find_page(&exam.id, &page_key)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("page not found in {}: {page_key}", exam.title))?;

    let text = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read paste file: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let added = session.store.ingest(&text, &exam.id, &page.id, section)?;
    if added.is_empty() {
        println!("No lines matched the question format; nothing added.");
    } else {
        println!(
            "Added {} question(s) to {} / {}",
            added.len(),
            exam.title,
            page.reference
        );
    }
    Ok(())
}
