//! Linear vault vesting with a cliff, implementing [`VestingSchedule`].
//!
//! Phases, by layer offset from vault genesis:
//! - before the cliff: nothing released
//! - at the cliff (`vest_start`): the cliff lump sum
//! - ramping: cliff plus `vest_per_layer` for every layer past the cliff
//! - at or after `vest_end`: the whole vault, including the rounding
//!   shortfall of `vest_per_layer`

use issuance_core::params::ParameterSet;
use issuance_core::traits::VestingSchedule;

/// Where a layer offset falls relative to the vesting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VestingPhase {
    BeforeCliff,
    Ramping,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VestingCurve {
    total: u64,
    start: u32,
    end: u32,
    cliff: u64,
    per_layer: u64,
}

impl VestingCurve {
    pub fn new(params: &ParameterSet) -> Self {
        Self {
            total: params.total_vaulted(),
            start: params.vest_start_layer(),
            end: params.vest_end_layer(),
            cliff: params.cliff_amount(),
            per_layer: params.vest_per_layer(),
        }
    }

    pub fn phase(&self, layer_offset: u32) -> VestingPhase {
        if layer_offset < self.start {
            VestingPhase::BeforeCliff
        } else if layer_offset < self.end {
            VestingPhase::Ramping
        } else {
            VestingPhase::Complete
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

impl VestingSchedule for VestingCurve {
    /// # Panics
    ///
    /// Panics if the linear release overflows `u64`. A validated
    /// [`ParameterSet`] guarantees it cannot.
    fn total_vested_through(&self, layer_offset: u32) -> u64 {
        match self.phase(layer_offset) {
            VestingPhase::BeforeCliff => 0,
            VestingPhase::Complete => self.total,
            VestingPhase::Ramping => {
                let layers = u64::from(layer_offset - self.start);
                let released = self
                    .per_layer
                    .checked_mul(layers)
                    .and_then(|linear| linear.checked_add(self.cliff));
                match released {
                    Some(amount) => amount,
                    None => panic!("vesting overflow at layer offset {layer_offset}"),
                }
            }
        }
    }
}
