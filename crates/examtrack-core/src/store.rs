//! The owned tracker store.
//!
//! `Store` holds the authoritative collections, persists them through a
//! [`Storage`] backend after every mutation, and tells registered observers
//! about each change. Parsing and statistics never see the store; callers
//! hand them slices and get plain data back.

use chrono::Utc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{
    Exam, ManualScore, NewExam, NewManualScore, NewPage, NewSubject, Page, Question,
    QuestionDraft, Section, Subject, Subsection, Theme, TopicMajor,
};
use crate::parser;
use crate::snapshot::Snapshot;
use crate::storage::{MemoryStorage, Storage};
use crate::taxonomy;

/// Subject id used for new exams when no subject exists yet.
pub const FALLBACK_SUBJECT_ID: &str = "subject-1";

/// Receives the new state after every successful mutation.
pub trait StoreObserver: Send + Sync {
    fn on_change(&self, snapshot: &Snapshot);
}

impl<F> StoreObserver for F
where
    F: Fn(&Snapshot) + Send + Sync,
{
    fn on_change(&self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

pub struct Store {
    state: Snapshot,
    storage: Box<dyn Storage>,
    observers: Vec<(ObserverId, Box<dyn StoreObserver>)>,
    next_observer: u64,
}

impl Store {
    /// Load state from `storage`.
    ///
    /// Nothing saved yet means an empty store. A saved document that no
    /// longer parses is backed up through [`Storage::backup`] and the store
    /// starts empty.
    pub fn open(storage: impl Storage + 'static) -> Result<Self, StoreError> {
        let state = match storage.read()? {
            Some(raw) => match Snapshot::from_json(&raw) {
                Ok(state) => state,
                Err(e) => {
                    match storage.backup()? {
                        Some(copy) => tracing::warn!(
                            backup = %copy.display(),
                            "saved state is unreadable, starting empty: {e}"
                        ),
                        None => tracing::warn!("saved state is unreadable, starting empty: {e}"),
                    }
                    Snapshot::default()
                }
            },
            None => Snapshot::default(),
        };

        tracing::debug!(
            exams = state.exams.len(),
            questions = state.questions.len(),
            "store opened"
        );

        Ok(Self {
            state,
            storage: Box::new(storage),
            observers: Vec::new(),
            next_observer: 0,
        })
    }

    /// An empty store that only lives in memory.
    pub fn in_memory() -> Self {
        Self {
            state: Snapshot::default(),
            storage: Box::new(MemoryStorage::new()),
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.state.subjects
    }

    pub fn exams(&self) -> &[Exam] {
        &self.state.exams
    }

    pub fn pages(&self) -> &[Page] {
        &self.state.pages
    }

    pub fn questions(&self) -> &[Question] {
        &self.state.questions
    }

    pub fn subsections(&self) -> &[Subsection] {
        &self.state.subsections
    }

    pub fn manual_scores(&self) -> &[ManualScore] {
        &self.state.manual_scores
    }

    pub fn questions_for_exam<'a>(
        &'a self,
        exam_id: &'a str,
    ) -> impl Iterator<Item = &'a Question> + Clone + 'a {
        self.state
            .questions
            .iter()
            .filter(move |q| q.exam_id == exam_id)
    }

    /// Questions on one page, by question number.
    pub fn questions_for_page(&self, page_id: &str) -> Vec<&Question> {
        let mut qs: Vec<&Question> = self
            .state
            .questions
            .iter()
            .filter(|q| q.page_id == page_id)
            .collect();
        qs.sort_by_key(|q| q.q_number);
        qs
    }

    /// Pages of an exam, by `order` (missing order sorts as 0).
    pub fn pages_for_exam(&self, exam_id: &str) -> Vec<&Page> {
        let mut pages: Vec<&Page> = self
            .state
            .pages
            .iter()
            .filter(|p| p.exam_id == exam_id)
            .collect();
        pages.sort_by_key(|p| p.order.unwrap_or(0));
        pages
    }

    pub fn subsections_for_exam(&self, exam_id: &str) -> Vec<&Subsection> {
        self.state
            .subsections
            .iter()
            .filter(|s| s.exam_id == exam_id)
            .collect()
    }

    /// Reported scores of an exam, oldest first.
    pub fn manual_scores_for_exam(&self, exam_id: &str) -> Vec<&ManualScore> {
        let mut scores: Vec<&ManualScore> = self
            .state
            .manual_scores
            .iter()
            .filter(|s| s.exam_id == exam_id)
            .collect();
        scores.sort_by_key(|s| s.created_at);
        scores
    }

    /// Find an exam by exact id, unique id prefix, or exact title.
    pub fn find_exam(&self, key: &str) -> Option<&Exam> {
        lookup(&self.state.exams, key, |e| e.id.as_str(), |e| e.title.as_str())
    }

    /// Find a page of `exam_id` by exact id, unique id prefix, or exact ref.
    pub fn find_page(&self, exam_id: &str, key: &str) -> Option<&Page> {
        let pages: Vec<&Page> = self
            .state
            .pages
            .iter()
            .filter(|p| p.exam_id == exam_id)
            .collect();
        lookup(pages.iter().copied(), key, |p| p.id.as_str(), |p| p.reference.as_str())
    }

    /// Find a subsection of `exam_id` by exact id, unique id prefix, or exact name.
    pub fn find_subsection(&self, exam_id: &str, key: &str) -> Option<&Subsection> {
        lookup(
            self.subsections_for_exam(exam_id),
            key,
            |s| s.id.as_str(),
            |s| s.name.as_str(),
        )
    }

    /// Subject new exams are attached to when none is given.
    pub fn default_subject_id(&self) -> String {
        self.state
            .subjects
            .first()
            .map(|s| s.id.clone())
            .unwrap_or_else(|| FALLBACK_SUBJECT_ID.to_string())
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        self.update(|state| {
            state.theme = state.theme.toggled();
            state.theme
        })
    }

    pub fn add_subject(&mut self, subject: NewSubject) -> Result<String, StoreError> {
        let name = required(&subject.name, "subject name")?;
        let id = new_id();
        self.update(|state| {
            state.subjects.push(Subject {
                id: id.clone(),
                name,
                taxonomy: subject.taxonomy,
            })
        })?;
        tracing::info!(subject_id = %id, "subject added");
        Ok(id)
    }

    pub fn add_exam(&mut self, exam: NewExam) -> Result<String, StoreError> {
        let title = required(&exam.title, "exam title")?;
        let id = new_id();
        self.update(|state| {
            state.exams.push(Exam {
                id: id.clone(),
                subject_id: exam.subject_id,
                title,
                provider: exam.provider,
                date: exam.date,
                notes: exam.notes,
            })
        })?;
        tracing::info!(exam_id = %id, "exam added");
        Ok(id)
    }

    pub fn add_page(&mut self, page: NewPage) -> Result<String, StoreError> {
        let reference = required(&page.reference, "page ref")?;
        let id = new_id();
        self.update(|state| {
            state.pages.push(Page {
                id: id.clone(),
                exam_id: page.exam_id,
                reference,
                order: page.order,
            })
        })?;
        tracing::info!(page_id = %id, "page added");
        Ok(id)
    }

    /// Assign ids to a batch of drafts and append them in order.
    ///
    /// The batch is saved and announced once. An empty batch changes nothing.
    pub fn append_questions(
        &mut self,
        drafts: Vec<QuestionDraft>,
    ) -> Result<Vec<String>, StoreError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let questions: Vec<Question> = drafts
            .into_iter()
            .map(|draft| draft.into_question(new_id()))
            .collect();
        let ids: Vec<String> = questions.iter().map(|q| q.id.clone()).collect();
        self.update(|state| state.questions.extend(questions))?;
        tracing::info!(count = ids.len(), "questions appended");
        Ok(ids)
    }

    /// Parse pasted text and append every line that matches the grammar.
    pub fn ingest(
        &mut self,
        text: &str,
        exam_id: &str,
        page_id: &str,
        section: Section,
    ) -> Result<Vec<String>, StoreError> {
        let drafts = parser::parse_lines(text.lines(), exam_id, page_id, section);
        self.append_questions(drafts)
    }

    pub fn add_subsection(&mut self, exam_id: &str, name: &str) -> Result<String, StoreError> {
        let name = required(name, "subsection name")?;
        let id = new_id();
        self.update(|state| {
            state.subsections.push(Subsection {
                id: id.clone(),
                exam_id: exam_id.to_string(),
                name,
            })
        })?;
        tracing::info!(subsection_id = %id, "subsection added");
        Ok(id)
    }

    /// Record a reported percentage, stamped with the current time.
    pub fn add_manual_score(&mut self, score: NewManualScore) -> Result<String, StoreError> {
        check_percentage(score.percentage, &score.percentage.to_string())?;
        let id = new_id();
        let percentage = score.percentage;
        self.update(|state| {
            state.manual_scores.push(ManualScore {
                id: id.clone(),
                exam_id: score.exam_id,
                subsection_id: score.subsection_id,
                label: score.label.filter(|l| !l.trim().is_empty()),
                percentage,
                notes: score.notes,
                created_at: Utc::now(),
            })
        })?;
        tracing::info!(score_id = %id, percentage, "manual score added");
        Ok(id)
    }

    /// Populate a sample subject, exam, page, question and reported scores.
    ///
    /// Does nothing if any subject exists. Returns whether it seeded.
    pub fn seed_if_empty(&mut self) -> Result<bool, StoreError> {
        if !self.state.subjects.is_empty() {
            return Ok(false);
        }

        let subject_id = self.add_subject(NewSubject {
            name: "Methods".into(),
            taxonomy: taxonomy::default_groups(),
        })?;
        let exam_id = self.add_exam(NewExam {
            subject_id,
            title: "Sample Exam".into(),
            provider: Some("Sample".into()),
            date: Some("2025-10-01".into()),
            notes: None,
        })?;
        let page_id = self.add_page(NewPage {
            exam_id: exam_id.clone(),
            reference: "page1".into(),
            order: Some(1),
        })?;
        self.append_questions(vec![QuestionDraft {
            exam_id: exam_id.clone(),
            page_id,
            q_number: 1,
            section: Section::A,
            topic_major: TopicMajor::Functions,
            topic_sub: Some("Polynomials".into()),
            max_marks: 2,
            awarded_marks: 2,
            correct: true,
            short_prompt: "factorise cubic".into(),
            errors: Vec::new(),
            confidence: Some(4),
            time_minutes: Some(2.0),
            reference: Some("page1".into()),
        }])?;
        let subsection_id = self.add_subsection(&exam_id, "Section A")?;
        self.add_manual_score(NewManualScore {
            exam_id: exam_id.clone(),
            subsection_id: Some(subsection_id),
            label: Some("Reported A".into()),
            percentage: 85.0,
            notes: None,
        })?;
        self.add_manual_score(NewManualScore {
            exam_id,
            subsection_id: None,
            label: Some("Reported Overall".into()),
            percentage: 78.0,
            notes: None,
        })?;

        Ok(true)
    }

    /// The whole state as the export envelope.
    pub fn export_all(&self) -> Result<String, StoreError> {
        self.state.to_json()
    }

    /// Replace the whole state with an imported envelope.
    ///
    /// On any failure the in-memory and saved state stay as they were.
    pub fn import_all(&mut self, raw: &str) -> Result<(), StoreError> {
        let incoming = Snapshot::from_json(raw)?;
        self.replace(incoming)?;
        tracing::info!(
            exams = self.state.exams.len(),
            questions = self.state.questions.len(),
            "state imported"
        );
        Ok(())
    }

    /// Apply `change` to a copy of the state and keep it only once it is saved.
    fn update<R>(&mut self, change: impl FnOnce(&mut Snapshot) -> R) -> Result<R, StoreError> {
        let mut next = self.state.clone();
        let out = change(&mut next);
        self.replace(next)?;
        Ok(out)
    }

    fn replace(&mut self, next: Snapshot) -> Result<(), StoreError> {
        self.storage.write(&next.to_json()?)?;
        self.state = next;
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        for (_, observer) in &self.observers {
            observer.on_change(&self.state);
        }
    }
}

/// Parse a typed-in percentage, accepting only numbers in `0..=100`.
pub fn parse_percentage(raw: &str) -> Result<f64, StoreError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| StoreError::InvalidPercentage {
            input: raw.to_string(),
        })?;
    check_percentage(value, raw)?;
    Ok(value)
}

fn check_percentage(value: f64, raw: &str) -> Result<(), StoreError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(StoreError::InvalidPercentage {
            input: raw.to_string(),
        })
    }
}

fn required(value: &str, field: &'static str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Exact id, then a unique id prefix, then a unique exact label.
fn lookup<'a, T, I>(
    items: I,
    key: &str,
    id: impl Fn(&'a T) -> &'a str,
    label: impl Fn(&'a T) -> &'a str,
) -> Option<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    I::IntoIter: Clone,
{
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let items = items.into_iter();

    if let Some(hit) = items.clone().find(|item| id(*item) == key) {
        return Some(hit);
    }

    let unique = |mut matches: Vec<&'a T>| (matches.len() == 1).then(|| matches.remove(0));

    unique(items.clone().filter(|item| id(*item).starts_with(key)).collect())
        .or_else(|| unique(items.filter(|item| label(*item) == key).collect()))
}
