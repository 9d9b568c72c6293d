//! Shared helpers for the integration tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use issuance_core::params::{ParameterSet, ScheduleConfig};
use issuance_schedule::{IssuanceSchedule, SubsidyCurve};

/// Mainnet schedule with `precision_bits` fractional bits.
pub fn schedule_at_precision(precision_bits: u32) -> IssuanceSchedule {
    schedule_with(ScheduleConfig {
        precision_bits,
        ..ScheduleConfig::default()
    })
}

/// Schedule for `cfg`, panicking on an invalid config.
pub fn schedule_with(cfg: ScheduleConfig) -> IssuanceSchedule {
    let params = ParameterSet::new(cfg).unwrap_or_else(|e| panic!("invalid test config: {e}"));
    IssuanceSchedule::new(params)
}

/// Mainnet subsidy curve with `precision_bits` fractional bits.
pub fn curve_at_precision(precision_bits: u32) -> SubsidyCurve {
    schedule_at_precision(precision_bits).subsidy().clone()
}

/// Closed-form total subsidy in `f64`. Not deterministic across platforms;
/// only good for sanity checks with a tolerance.
pub fn float_total_subsidy(cap: u64, half_life: u32, layer_offset: u32) -> f64 {
    let x = std::f64::consts::LN_2 * (f64::from(layer_offset) + 1.0) / f64::from(half_life);
    cap as f64 * -(-x).exp_m1()
}

/// `count` reproducible offsets drawn uniformly from `0..upper`, sorted.
pub fn sample_offsets(seed: u64, count: usize, upper: u32) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut offsets: Vec<u32> = (0..count).map(|_| rng.gen_range(0..upper)).collect();
    offsets.sort_unstable();
    offsets
}
