//! Subcommand implementations.

pub mod dashboard;
pub mod exam;
pub mod init;
pub mod page;
pub mod paste;
pub mod score;
pub mod subject;
pub mod subsection;
pub mod theme;
pub mod transfer;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use examtrack_core::model::Exam;
use examtrack_core::snapshot::Snapshot;
use examtrack_core::storage::JsonFileStorage;
use examtrack_core::Store;

use crate::config::{load_config_from, ExamtrackConfig};

/// Global options shared by every subcommand.
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub data_path: Option<PathBuf>,
}

/// A loaded config plus the store it points at.
pub struct Session {
    pub config: ExamtrackConfig,
    pub data_path: PathBuf,
    pub store: Store,
}

pub fn open_session(ctx: &Context) -> Result<Session> {
    let config = load_config_from(ctx.config_path.as_deref())?;
    let data_path = ctx
        .data_path
        .clone()
        .unwrap_or_else(|| config.data_file.clone());

    let mut store = Store::open(JsonFileStorage::new(&data_path))
        .with_context(|| format!("failed to open data file: {}", data_path.display()))?;

    let path_for_log = data_path.clone();
    store.subscribe(Box::new(move |snapshot: &Snapshot| {
        tracing::debug!(
            path = %path_for_log.display(),
            exams = snapshot.exams.len(),
            questions = snapshot.questions.len(),
            "state changed"
        );
    }));

    Ok(Session {
        config,
        data_path,
        store,
    })
}

/// Resolve an exam argument, cloning it so the store can be mutated after.
pub fn resolve_exam(store: &Store, key: &str) -> Result<Exam> {
    store
        .find_exam(key)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("exam not found: {key}"))
}

/// First eight characters of an id, as shown in tables.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
