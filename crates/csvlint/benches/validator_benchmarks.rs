//! Validator performance benchmarks.
//!
//! Measures per-value type checks and per-row validation throughput.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use csvlint::{Constraints, Field, FieldType, Schema};

/// Sample values for type checks.
const TYPE_SAMPLES: &[&str] = &[
    "42",
    "-17",
    "0x1F",
    "1_000_000",
    "3.14159",
    "-2.5e10",
    "true",
    "0",
    "https://example.com/listing/1",
    "ftp://example.com",
    "not a number",
    "",
];

fn houses_schema() -> Schema {
    Schema::new(
        "http://example.org/houses.json",
        vec![
            Field::new(
                "id",
                Constraints::new()
                    .required()
                    .unique()
                    .with_type(FieldType::PositiveInteger),
            )
            .unwrap(),
            Field::new("price", Constraints::new().with_type(FieldType::Float)).unwrap(),
            Field::new(
                "postcode",
                Constraints::new()
                    .required()
                    .with_pattern("[A-Z]{1,2}[0-9][0-9A-Z]? ?[0-9][A-Z]{2}"),
            )
            .unwrap(),
            Field::new("notes", Constraints::new().with_max_length(200)).unwrap(),
        ],
    )
}

fn make_rows(count: usize) -> Vec<Vec<String>> {
    (0..count)
        .map(|i| {
            vec![
                (i + 1).to_string(),
                format!("{}.50", 100_000 + i),
                "SW1A 1AA".to_string(),
                "semi-detached".to_string(),
            ]
        })
        .collect()
}

/// Benchmark type checks.
fn bench_type_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("type_checks");

    for field_type in FieldType::ALL {
        group.bench_function(field_type.local_name(), |b| {
            b.iter(|| {
                for sample in TYPE_SAMPLES {
                    black_box(field_type.check(sample));
                }
            })
        });
    }

    group.finish();
}

/// Benchmark full row validation, including uniqueness tracking.
fn bench_row_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_validation");

    for size in [100, 1_000, 10_000] {
        let rows = make_rows(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                let mut schema = houses_schema();
                schema.validate_header(&["id", "price", "postcode", "notes"]);
                for (idx, row) in rows.iter().enumerate() {
                    black_box(schema.validate_record(row, Some(idx + 2)));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_type_checks, bench_row_validation);
criterion_main!(benches);
