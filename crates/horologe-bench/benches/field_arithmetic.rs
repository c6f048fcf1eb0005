//! Benchmarks for field get/set/add across calendar systems

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use horologe_bench::{all_chronologies, SAMPLE_INSTANT};

fn bench_field_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("year_month_day_get");
    for (name, chrono) in all_chronologies().unwrap() {
        let (year, month, day) = (chrono.year(), chrono.month_of_year(), chrono.day_of_month());
        group.bench_with_input(BenchmarkId::from_parameter(name), &SAMPLE_INSTANT, |b, &instant| {
            b.iter(|| {
                let instant = black_box(instant);
                (year.get(instant).unwrap(), month.get(instant).unwrap(), day.get(instant).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_month_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("month_add");
    for (name, chrono) in all_chronologies().unwrap() {
        let months = chrono.months();
        group.bench_with_input(BenchmarkId::from_parameter(name), &SAMPLE_INSTANT, |b, &instant| {
            b.iter(|| months.add(black_box(instant), black_box(7)).unwrap())
        });
    }
    group.finish();
}

fn bench_date_time_millis(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_time_millis");
    for (name, chrono) in all_chronologies().unwrap() {
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| chrono.date_time_millis_hms(black_box(2004), 6, 9, 12, 30, 0, 0).unwrap())
        });
    }
    group.finish();
}

fn bench_day_of_month_set(c: &mut Criterion) {
    let chrono = horologe_chrono::Chronology::iso();
    let day = chrono.day_of_month();
    c.bench_function("iso_day_of_month_set", |b| {
        b.iter(|| day.set(black_box(SAMPLE_INSTANT), black_box(17)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_field_get,
    bench_month_add,
    bench_date_time_millis,
    bench_day_of_month_set,
);
criterion_main!(benches);
