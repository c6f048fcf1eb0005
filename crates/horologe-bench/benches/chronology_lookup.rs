//! Benchmarks for cached chronology lookup and zone changes

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use horologe_bench::paris;
use horologe_chrono::{Chronology, CutoverConfig, WeekConfig};

fn bench_cached_iso(c: &mut Criterion) {
    c.bench_function("cached_iso", |b| b.iter(|| black_box(Chronology::iso())));
}

fn bench_cached_gj(c: &mut Criterion) {
    let config = CutoverConfig::default();
    c.bench_function("cached_gj", |b| b.iter(|| Chronology::gj(black_box(config)).unwrap()));
}

fn bench_with_zone(c: &mut Criterion) {
    let zone = paris().unwrap();
    let iso = Chronology::iso();
    c.bench_function("iso_with_zone", |b| b.iter(|| iso.with_zone(black_box(&zone))));
}

fn bench_gregorian_week_config(c: &mut Criterion) {
    c.bench_function("cached_gregorian_us", |b| {
        b.iter(|| Chronology::gregorian(black_box(WeekConfig::us())).unwrap())
    });
}

criterion_group!(benches, bench_cached_iso, bench_cached_gj, bench_with_zone, bench_gregorian_week_config);
criterion_main!(benches);
