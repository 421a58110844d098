use criterion::{black_box, criterion_group, criterion_main, Criterion};

use examtrack_core::model::{Question, Section, TopicMajor};
use examtrack_core::statistics::{breakdown, pct_by_major, totals};

fn make_question(i: u32) -> Question {
    Question {
        id: format!("q{i}"),
        exam_id: format!("exam-{}", i % 10),
        page_id: "page".into(),
        q_number: i,
        section: Section::A,
        topic_major: TopicMajor::ALL[(i % 3) as usize],
        topic_sub: None,
        max_marks: 4,
        awarded_marks: i % 5,
        correct: i % 5 == 4,
        short_prompt: "bench".into(),
        errors: vec![],
        confidence: (i % 2 == 0).then_some((i % 5 + 1) as u8),
        time_minutes: Some(f64::from(i % 7)),
        reference: None,
    }
}

fn bench_totals(c: &mut Criterion) {
    let questions: Vec<Question> = (0..1_000).map(make_question).collect();

    c.bench_function("totals_1000", |b| b.iter(|| totals(black_box(&questions))));

    c.bench_function("pct_by_major_1000", |b| {
        b.iter(|| pct_by_major(black_box(&questions), TopicMajor::Calculus))
    });

    c.bench_function("breakdown_1000", |b| {
        b.iter(|| breakdown(black_box(&questions)))
    });
}

criterion_group!(benches, bench_totals);
criterion_main!(benches);
