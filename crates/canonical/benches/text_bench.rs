use std::sync::Arc;

use canonical::{ClientNote, SeededRandom, SubmissionId, SubmissionRecord, TextBuilder};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ingest::{Field, FormKind, FormSchema, Snapshot, Validator, WorkingInput};

fn snapshot(schema: &Arc<FormSchema>, summary_len: usize) -> Snapshot {
    let mut input = WorkingInput::new(FormKind::Discovery);
    let summary = "word ".repeat(summary_len / 5);
    for (field, value) in [
        (Field::FromName, "Jane Doe"),
        (Field::UserEmail, "jane@biz.com"),
        (Field::Timezone, "UTC"),
        (Field::ProjectName, "Ocean Café Site"),
        (Field::ProjectSummary, summary.as_str()),
        (Field::BudgetRange, "$1,500–$2,500"),
        (Field::Availability, "Flexible / as needed"),
        (Field::Signature, "Jane Doe"),
        (Field::SignedDate, "2026-01-10"),
    ] {
        input.set_text(schema, field, value).expect("edit");
    }
    for (field, label) in [
        (Field::ProjectTypes, "Website"),
        (Field::Goals, "Lead generation"),
        (Field::Services, "Custom website"),
    ] {
        input.toggle(schema, field, label).expect("toggle");
    }
    for field in [Field::AckPaid, Field::AckNoDev, Field::AckScope] {
        input.set_flag(schema, field, true).expect("ack");
    }
    let valid = Validator::new(Arc::clone(schema))
        .accept(&input)
        .expect("valid input");
    Snapshot::capture(valid)
}

fn bench_seal(c: &mut Criterion) {
    let schema = Arc::new(FormSchema::discovery());
    let builder = TextBuilder::new(Arc::clone(&schema), ClientNote::new("Derek"));
    let date = NaiveDate::from_ymd_opt(2026, 1, 10).expect("date");
    let mut group = c.benchmark_group("seal");

    for size in [64, 512, 4096, 32768].iter() {
        let snap = snapshot(&schema, (*size).max(20));
        let mut rng = SeededRandom::new(1);
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_function(format!("summary_bytes_{size}"), |b| {
            b.iter(|| {
                let id = SubmissionId::generate("DISC", date, &mut rng).expect("id");
                let texts = builder.render(black_box(&snap), &id);
                SubmissionRecord::seal(id, texts)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_seal);
criterion_main!(benches);
