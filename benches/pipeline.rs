use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use intake::{
    Field, FormEngine, FormKind, FormSession, IntakeConfig, LogChannel, ManualClock,
    SeededRandom, Snapshot, SubmissionId, SubmissionRecord, WorkingInput,
};

fn jane_doe(engine: &FormEngine) -> WorkingInput {
    let schema = engine.schema();
    let mut input = WorkingInput::new(FormKind::Discovery);
    for (field, value) in [
        (Field::FromName, "Jane Doe"),
        (Field::UserEmail, "jane@biz.com"),
        (Field::Timezone, "America/Chicago"),
        (Field::ProjectName, "Ocean Café Site"),
        (
            Field::ProjectSummary,
            "A marketing site for a seaside café with menu and booking.",
        ),
        (Field::BudgetRange, "$1,500–$2,500"),
        (Field::Availability, "Flexible / as needed"),
        (Field::Signature, "Jane Doe"),
        (Field::SignedDate, "2026-01-10"),
    ] {
        input.set_text(schema, field, value).expect("bench edit");
    }
    for (field, label) in [
        (Field::ProjectTypes, "Website"),
        (Field::Goals, "Lead generation"),
        (Field::Services, "Custom website"),
        (Field::Services, "Maintenance"),
    ] {
        input.toggle(schema, field, label).expect("bench toggle");
    }
    for field in [Field::AckPaid, Field::AckNoDev, Field::AckScope] {
        input.set_flag(schema, field, true).expect("bench ack");
    }
    input
}

fn seal_bench(c: &mut Criterion) {
    let engine = FormEngine::new(FormKind::Discovery, &IntakeConfig::default())
        .expect("default prefixes");
    let input = jane_doe(&engine);
    let day = NaiveDate::from_ymd_opt(2026, 1, 10).expect("bench date");
    let mut rng = SeededRandom::new(7);

    c.bench_function("validate_snapshot_seal", |b| {
        b.iter(|| {
            let valid = engine
                .validator()
                .accept(black_box(&input))
                .expect("bench input is valid");
            let snapshot = Snapshot::capture(valid);
            let id = SubmissionId::generate(engine.prefix(), day, &mut rng).expect("bench id");
            let texts = engine.texts().render(&snapshot, &id);
            black_box(SubmissionRecord::seal(id, texts));
        });
    });
}

fn render_bench(c: &mut Criterion) {
    let engine = FormEngine::new(FormKind::Discovery, &IntakeConfig::default())
        .expect("default prefixes");
    let valid = engine
        .validator()
        .accept(&jane_doe(&engine))
        .expect("bench input is valid");
    let snapshot = Snapshot::capture(valid);
    let id = SubmissionId::parse("DISC-20260110-AB12CD").expect("bench id");
    let record = SubmissionRecord::seal(id.clone(), engine.texts().render(&snapshot, &id));

    c.bench_function("render_filled_document", |b| {
        b.iter(|| {
            black_box(
                engine
                    .renderer()
                    .render_filled(black_box(&snapshot), &record),
            );
        });
    });
}

fn session_bench(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let config = IntakeConfig::default();
    let engine = FormEngine::new(FormKind::Discovery, &config).expect("default prefixes");
    let input = jane_doe(&engine);
    let start = Utc
        .with_ymd_and_hms(2026, 1, 10, 9, 0, 0)
        .single()
        .expect("bench time");

    c.bench_function("session_submit_log_channel", |b| {
        b.to_async(&runtime).iter(|| {
            let clock = Arc::new(ManualClock::new(start));
            let session = FormSession::new(engine.clone(), Arc::new(LogChannel))
                .with_clock(clock.clone())
                .with_random(Box::new(SeededRandom::new(1)));
            session.load(input.clone()).expect("bench input conforms");
            clock.advance(Duration::from_secs(60));
            async move { black_box(session.submit().await) }
        });
    });
}

criterion_group!(benches, seal_bench, render_bench, session_bench);
criterion_main!(benches);
