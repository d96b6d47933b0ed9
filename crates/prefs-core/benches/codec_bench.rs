//! Criterion benchmarks for the preferences snapshot codec.
//!
//! Every setter re-encodes the full snapshot on the persistence worker, and
//! every launch decodes it once, so both directions are measured.
//!
//! Run with:
//! ```bash
//! cargo bench --package prefs-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use prefs_core::{
    decode_snapshot, encode_snapshot, AmountOfResults, DistanceSpeedUnit, PreferencesSnapshot,
    PreferredBookmark, SortingOrientation, TemperatureUnit,
};

// ── Snapshot fixtures ─────────────────────────────────────────────────────────

fn make_default() -> PreferencesSnapshot {
    PreferencesSnapshot::default()
}

fn make_customised() -> PreferencesSnapshot {
    PreferencesSnapshot {
        preferred_bookmark: PreferredBookmark::new(Some(5341145)),
        amount_of_results: AmountOfResults::Fifty,
        temperature_unit: TemperatureUnit::Kelvin,
        distance_speed_unit: DistanceSpeedUnit::Miles,
        sorting_orientation: SortingOrientation::Temperature,
        ..PreferencesSnapshot::default()
    }
}

fn fixtures() -> Vec<(&'static str, PreferencesSnapshot)> {
    vec![("default", make_default()), ("customised", make_customised())]
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_snapshot");
    for (name, snapshot) in fixtures() {
        group.bench_with_input(BenchmarkId::new("snapshot", name), &snapshot, |b, s| {
            b.iter(|| encode_snapshot(black_box(s)).expect("encode must succeed"))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_snapshot");
    for (name, snapshot) in fixtures() {
        let text = encode_snapshot(&snapshot).expect("encode must succeed for benchmark setup");
        group.bench_with_input(BenchmarkId::new("snapshot", name), &text, |b, text| {
            b.iter(|| decode_snapshot(black_box(text)).expect("decode must succeed"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
