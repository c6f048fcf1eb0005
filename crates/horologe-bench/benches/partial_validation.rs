//! Benchmarks for partial construction and carrying adds

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use horologe_core::{DateTimeFieldType, DurationFieldType};
use horologe_partial::Partial;

fn date_types() -> Vec<DateTimeFieldType> {
    vec![DateTimeFieldType::YEAR, DateTimeFieldType::MONTH_OF_YEAR, DateTimeFieldType::DAY_OF_MONTH]
}

fn bench_construct(c: &mut Criterion) {
    let types = date_types();
    c.bench_function("partial_construct_ymd", |b| {
        b.iter(|| Partial::from_fields(types.clone(), black_box(vec![2004, 2, 29]), None).unwrap())
    });
}

fn bench_with_insert(c: &mut Criterion) {
    let base = Partial::of(DateTimeFieldType::YEAR, 2004).unwrap();
    c.bench_function("partial_with_insert", |b| {
        b.iter(|| base.with(DateTimeFieldType::MONTH_OF_YEAR, black_box(6)).unwrap())
    });
}

fn bench_day_carry(c: &mut Criterion) {
    let partial = Partial::from_fields(date_types(), vec![2004, 12, 31], None).unwrap();
    c.bench_function("partial_day_carry", |b| {
        b.iter(|| partial.with_field_added(&DurationFieldType::DAYS, black_box(1)).unwrap())
    });
}

criterion_group!(benches, bench_construct, bench_with_insert, bench_day_carry);
criterion_main!(benches);
