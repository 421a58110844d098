//! The `examtrack score` commands.

use anyhow::Result;

use examtrack_core::model::NewManualScore;
use examtrack_core::store::parse_percentage;

use super::{open_session, resolve_exam, Context};

pub fn add(
    ctx: &Context,
    exam_key: String,
    percentage: String,
    label: Option<String>,
    subsection: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    // Reject bad input before touching the data file.
    let percentage = parse_percentage(&percentage)?;

    let mut session = open_session(ctx)?;
    let exam = resolve_exam(&session.store, &exam_key)?;
    let subsection_id = match subsection {
        Some(key) => Some(
            session
                .store
                .find_subsection(&exam.id, &key)
                .map(|s| s.id.clone())
                .ok_or_else(|| anyhow::anyhow!("subsection not found in {}: {key}", exam.title))?,
        ),
        None => None,
    };

    session.store.add_manual_score(NewManualScore {
        exam_id: exam.id,
        subsection_id,
        label,
        percentage,
        notes,
    })?;
    println!("Recorded {percentage}% for {}", exam.title);
    Ok(())
}
