//! End-to-end tests of the store against a real data file.
//!
//! These cover the paste → persist → reopen → statistics path without the CLI.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use examtrack_core::model::{NewExam, NewManualScore, NewPage, Section, TopicMajor};
use examtrack_core::snapshot::Snapshot;
use examtrack_core::statistics::{breakdown, summarize_exams, totals};
use examtrack_core::storage::JsonFileStorage;
use examtrack_core::{Store, StoreError};

const PAGE_ONE: &str = include_str!("../../../sample-data/paste-page1.txt");

fn open(path: &std::path::Path) -> Store {
    Store::open(JsonFileStorage::new(path)).unwrap()
}

fn exam_with_page(store: &mut Store, title: &str) -> (String, String) {
    let subject_id = store.default_subject_id();
    let exam_id = store
        .add_exam(NewExam {
            subject_id,
            title: title.into(),
            ..Default::default()
        })
        .unwrap();
    let page_id = store
        .add_page(NewPage {
            exam_id: exam_id.clone(),
            reference: "page1".into(),
            order: Some(1),
        })
        .unwrap();
    (exam_id, page_id)
}

#[test]
fn e2e_paste_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let exam_id = {
        let mut store = open(&path);
        let (exam_id, page_id) = exam_with_page(&mut store, "Trial");
        let added = store
            .ingest(PAGE_ONE, &exam_id, &page_id, Section::A)
            .unwrap();
        assert_eq!(added.len(), 3);
        exam_id
    };

    let store = open(&path);
    let t = totals(store.questions_for_exam(&exam_id));
    assert_eq!(t.max, 10);
    assert_eq!(t.got, 7);
    assert!((t.pct - 70.0).abs() < 1e-9);
    assert!((t.time - 11.0).abs() < 1e-9);
    assert!((t.conf_avg - 3.0).abs() < 1e-9);

    let by_topic = breakdown(store.questions());
    assert!((by_topic.pct_for(TopicMajor::Functions) - 100.0).abs() < 1e-9);
    assert!((by_topic.pct_for(TopicMajor::Calculus) - 100.0 / 3.0).abs() < 1e-9);
    assert!((by_topic.pct_for(TopicMajor::Probability) - 80.0).abs() < 1e-9);

    let refs: Vec<_> = store
        .questions()
        .iter()
        .map(|q| q.reference.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(refs, vec!["page1", "page1", "page1 | photo 2"]);
}

#[test]
fn e2e_exam_summaries_are_independent() {
    let mut store = Store::in_memory();
    let (first, first_page) = exam_with_page(&mut store, "First");
    let (second, second_page) = exam_with_page(&mut store, "Second");

    store
        .ingest(PAGE_ONE, &first, &first_page, Section::A)
        .unwrap();
    store
        .ingest(
            r#"Q1 | Calculus > Integration | 4/1 | wrong | "area" | conf:1 | time:3 | ref:x"#,
            &second,
            &second_page,
            Section::B,
        )
        .unwrap();

    let summaries = summarize_exams(store.exams(), store.questions());
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].exam_id, first);
    assert!((summaries[0].totals.pct - 70.0).abs() < 1e-9);
    assert!((summaries[1].totals.pct - 25.0).abs() < 1e-9);
}

#[test]
fn e2e_observers_see_each_commit() {
    let mut store = Store::in_memory();
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    store.subscribe(Box::new(move |_: &Snapshot| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let (exam_id, page_id) = exam_with_page(&mut store, "Trial");
    assert_eq!(seen.load(Ordering::SeqCst), 2);

    store.ingest(PAGE_ONE, &exam_id, &page_id, Section::A).unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 3);

    // Nothing matched, nothing announced.
    store.ingest("noise", &exam_id, &page_id, Section::A).unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 3);

    let err = store
        .add_manual_score(NewManualScore {
            exam_id,
            percentage: 101.0,
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidPercentage { .. }));
    assert_eq!(seen.load(Ordering::SeqCst), 3);
}

#[test]
fn e2e_import_replaces_everything() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("source.json");
    let target_path = dir.path().join("target.json");

    let mut source = open(&source_path);
    source.seed_if_empty().unwrap();
    let exported = source.export_all().unwrap();

    let mut target = open(&target_path);
    exam_with_page(&mut target, "Will be replaced");
    target.import_all(&exported).unwrap();

    assert_eq!(target.snapshot(), source.snapshot());
    let reopened = open(&target_path);
    assert_eq!(reopened.snapshot(), source.snapshot());
    assert!(reopened.find_exam("Will be replaced").is_none());
}

#[test]
fn e2e_corrupt_data_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let store = open(&path);
    assert!(store.snapshot().is_empty());
}
