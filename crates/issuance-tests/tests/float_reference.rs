//! Sanity check of the fixed-point curve against the `f64` closed form.
//!
//! `f64` carries about 53 bits, so at a cap near 2^61 smidge the float
//! result is only good to a few thousand smidge. The tolerance is loose
//! enough for that and tight enough to catch a wrong formula.

use issuance_core::constants::{HALF_LIFE_LAYERS, TOTAL_SUBSIDY};
use issuance_core::traits::SubsidySchedule;
use issuance_schedule::IssuanceSchedule;
use issuance_tests::helpers::{float_total_subsidy, sample_offsets};

const TOLERANCE: f64 = 1e-12 * TOTAL_SUBSIDY as f64;

fn assert_close(n: u32, fixed: u64) {
    let float = float_total_subsidy(TOTAL_SUBSIDY, HALF_LIFE_LAYERS, n);
    let diff = (fixed as f64 - float).abs();
    assert!(
        diff <= TOLERANCE,
        "offset {n}: fixed {fixed}, float {float}, diff {diff}"
    );
}

#[test]
fn early_layers_track_float() {
    let s = IssuanceSchedule::mainnet();
    for n in 0..1_000u32 {
        assert_close(n, s.total_subsidy_through(n));
    }
}

#[test]
fn sampled_layers_track_float() {
    let s = IssuanceSchedule::mainnet();
    for n in sample_offsets(7, 500, 100 * HALF_LIFE_LAYERS) {
        assert_close(n, s.total_subsidy_through(n));
    }
}

#[test]
fn first_layer_beats_naive_float() {
    // The f64 evaluation is off in the last digits; the fixed-point value is
    // the correctly floored one.
    let s = IssuanceSchedule::mainnet();
    assert_eq!(s.total_subsidy_through(0), 477_291_497_137);
    assert_close(0, 477_291_497_137);
}
