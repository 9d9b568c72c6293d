//! Combined issuance schedule: subsidy curve, vesting curve, and the epochs
//! they are measured from.
//!
//! The trait methods take layer *offsets* already normalized to each curve's
//! epoch. The `*_at` / `*_in` helpers take absolute layer IDs and clamp to
//! zero before the relevant epoch (issuance start for the subsidy, vault
//! genesis for vesting).

use tracing::debug;

use issuance_core::params::ParameterSet;
use issuance_core::traits::{SubsidySchedule, VestingSchedule};

use crate::projection::Projection;
use crate::subsidy::SubsidyCurve;
use crate::vesting::VestingCurve;

/// Offset of `layer` from `epoch`, or `None` before the epoch.
pub fn layer_offset(layer: u32, epoch: u32) -> Option<u32> {
    layer.checked_sub(epoch)
}

/// The production issuance schedule.
///
/// Stateless after construction: every query is recomputed from the layer
/// and the immutable parameters, so a shared reference can be used from any
/// number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuanceSchedule {
    params: ParameterSet,
    subsidy: SubsidyCurve,
    vesting: VestingCurve,
}

impl IssuanceSchedule {
    pub fn new(params: ParameterSet) -> Self {
        let subsidy = SubsidyCurve::new(&params);
        let vesting = VestingCurve::new(&params);
        debug!(
            total_subsidy = params.total_subsidy(),
            half_life_layers = params.half_life_layers(),
            precision_bits = params.precision_bits(),
            cliff_amount = params.cliff_amount(),
            vest_per_layer = params.vest_per_layer(),
            residual_shortfall = params.residual_shortfall(),
            "issuance schedule initialised"
        );
        Self {
            params,
            subsidy,
            vesting,
        }
    }

    pub fn mainnet() -> Self {
        Self::new(ParameterSet::mainnet())
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn subsidy(&self) -> &SubsidyCurve {
        &self.subsidy
    }

    pub fn vesting(&self) -> &VestingCurve {
        &self.vesting
    }

    /// Total subsidy issued through absolute layer `layer`.
    pub fn total_subsidy_at(&self, layer: u32) -> u64 {
        layer_offset(layer, self.params.issuance_start_layer())
            .map_or(0, |n| self.subsidy.total_subsidy_through(n))
    }

    /// Subsidy issued in absolute layer `layer`.
    pub fn subsidy_in(&self, layer: u32) -> u64 {
        layer_offset(layer, self.params.issuance_start_layer())
            .map_or(0, |n| self.subsidy.subsidy_at_layer(n))
    }

    /// Total vault release through absolute layer `layer`.
    pub fn total_vested_at(&self, layer: u32) -> u64 {
        layer_offset(layer, self.params.vault_genesis_layer())
            .map_or(0, |n| self.vesting.total_vested_through(n))
    }

    /// Vault release in absolute layer `layer`.
    pub fn vested_in(&self, layer: u32) -> u64 {
        layer_offset(layer, self.params.vault_genesis_layer())
            .map_or(0, |n| self.vesting.vest_at_layer(n))
    }

    /// First subsidy offset at which the total equals the cap, found by
    /// binary search over the monotone accumulator.
    ///
    /// Returns `None` if the cap is not reached within the `u32` horizon.
    pub fn final_subsidy_layer(&self) -> Option<u32> {
        let cap = self.params.total_subsidy();
        if self.subsidy.total_subsidy_through(u32::MAX) < cap {
            return None;
        }
        let (mut lo, mut hi) = (0u32, u32::MAX);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.subsidy.total_subsidy_through(mid) >= cap {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        Some(lo)
    }

    /// Per-layer ledger projection over absolute layers `0..=end_layer`.
    pub fn projection(&self, end_layer: u32) -> Projection<'_> {
        Projection::new(self, end_layer)
    }
}

impl Default for IssuanceSchedule {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl SubsidySchedule for IssuanceSchedule {
    fn total_subsidy_through(&self, layer_offset: u32) -> u64 {
        self.subsidy.total_subsidy_through(layer_offset)
    }
}

impl VestingSchedule for IssuanceSchedule {
    fn total_vested_through(&self, layer_offset: u32) -> u64 {
        self.vesting.total_vested_through(layer_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuance_core::constants::{HALF_LIFE_LAYERS, TOTAL_SUBSIDY, TOTAL_VAULTED, VEST_START};
    use issuance_core::params::ScheduleConfig;
    use std::sync::Arc;

    fn offset_schedule() -> IssuanceSchedule {
        let cfg = ScheduleConfig {
            issuance_start_layer: 1_000,
            vault_genesis_layer: 50,
            ..ScheduleConfig::default()
        };
        IssuanceSchedule::new(ParameterSet::new(cfg).unwrap())
    }

    // --- layer_offset ---

    #[test]
    fn layer_offset_clamps_before_epoch() {
        assert_eq!(layer_offset(5, 10), None);
        assert_eq!(layer_offset(10, 10), Some(0));
        assert_eq!(layer_offset(15, 10), Some(5));
    }

    // --- effective genesis ---

    #[test]
    fn no_subsidy_before_issuance_start() {
        let s = offset_schedule();
        assert_eq!(s.total_subsidy_at(0), 0);
        assert_eq!(s.total_subsidy_at(999), 0);
        assert_eq!(s.subsidy_in(999), 0);
    }

    #[test]
    fn subsidy_starts_at_issuance_start() {
        let s = offset_schedule();
        let first = s.total_subsidy_through(0);
        assert!(first > 0);
        assert_eq!(s.total_subsidy_at(1_000), first);
        assert_eq!(s.subsidy_in(1_000), first);
        assert_eq!(s.subsidy_in(1_001), s.subsidy_at_layer(1));
    }

    #[test]
    fn vesting_measured_from_vault_genesis() {
        let s = offset_schedule();
        assert_eq!(s.total_vested_at(VEST_START + 49), 0);
        assert_eq!(s.total_vested_at(VEST_START + 50), TOTAL_VAULTED / 4);
        assert_eq!(s.vested_in(VEST_START + 50), TOTAL_VAULTED / 4);
        assert_eq!(s.vested_in(10), 0);
    }

    #[test]
    fn mainnet_epochs_are_zero() {
        let s = IssuanceSchedule::mainnet();
        assert_eq!(s.total_subsidy_at(42), s.total_subsidy_through(42));
        assert_eq!(s.total_vested_at(VEST_START), s.total_vested_through(VEST_START));
    }

    // --- final layer ---

    #[test]
    fn final_subsidy_layer_matches_curve() {
        let s = IssuanceSchedule::mainnet();
        let last = s.final_subsidy_layer().unwrap();
        assert_eq!(Some(last), s.subsidy().final_layer());
        assert_eq!(s.total_subsidy_through(last), TOTAL_SUBSIDY);
        assert_eq!(s.total_subsidy_through(last - 1), TOTAL_SUBSIDY - 1);
    }

    #[test]
    fn final_subsidy_layer_none_for_long_half_life() {
        let cfg = ScheduleConfig {
            half_life_layers: u32::MAX / 64,
            ..ScheduleConfig::default()
        };
        let s = IssuanceSchedule::new(ParameterSet::new(cfg).unwrap());
        assert_eq!(s.final_subsidy_layer(), None);
    }

    // --- trait delegation ---

    #[test]
    fn delegates_to_curves() {
        let s = IssuanceSchedule::mainnet();
        assert_eq!(
            s.total_subsidy_through(HALF_LIFE_LAYERS - 1),
            s.subsidy().total_subsidy_through(HALF_LIFE_LAYERS - 1)
        );
        assert_eq!(s.vest_at_layer(VEST_START), s.vesting().vest_at_layer(VEST_START));
    }

    #[test]
    fn shared_across_threads() {
        let s = Arc::new(IssuanceSchedule::mainnet());
        let handles: Vec<_> = (0..4u32)
            .map(|i| {
                let s = Arc::clone(&s);
                std::thread::spawn(move || s.total_subsidy_through(i * 1_000_000))
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            let got = h.join().unwrap();
            assert_eq!(got, s.total_subsidy_through(i as u32 * 1_000_000));
        }
    }
}
