//! Criterion benchmarks for issuance-schedule critical operations.
//!
//! Covers: subsidy accumulator at early, mid, and tail offsets, the vesting
//! accumulator, and a short ledger projection.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use issuance_core::constants::{HALF_LIFE_LAYERS, VEST_START};
use issuance_core::traits::{SubsidySchedule, VestingSchedule};
use issuance_schedule::IssuanceSchedule;

fn bench_subsidy(c: &mut Criterion) {
    let schedule = IssuanceSchedule::mainnet();

    c.bench_function("total_subsidy_first_layer", |b| {
        b.iter(|| schedule.total_subsidy_through(black_box(0)))
    });

    // Worst case for the series: fractional exponent just below ln 2.
    c.bench_function("total_subsidy_before_half_life", |b| {
        b.iter(|| schedule.total_subsidy_through(black_box(HALF_LIFE_LAYERS - 2)))
    });

    c.bench_function("total_subsidy_tail", |b| {
        b.iter(|| schedule.total_subsidy_through(black_box(1_000_000_000)))
    });

    c.bench_function("subsidy_at_layer", |b| {
        b.iter(|| schedule.subsidy_at_layer(black_box(1_000_000)))
    });
}

fn bench_vesting(c: &mut Criterion) {
    let schedule = IssuanceSchedule::mainnet();

    c.bench_function("vest_at_layer", |b| {
        b.iter(|| schedule.vest_at_layer(black_box(VEST_START + 1_000)))
    });
}

fn bench_projection(c: &mut Criterion) {
    let schedule = IssuanceSchedule::mainnet();

    c.bench_function("projection_10k_layers", |b| {
        b.iter(|| schedule.projection(black_box(10_000)).last())
    });
}

criterion_group!(benches, bench_subsidy, bench_vesting, bench_projection);
criterion_main!(benches);
