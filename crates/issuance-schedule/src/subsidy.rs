//! Exponential-decay subsidy curve implementing [`SubsidySchedule`].
//!
//! The total subsidy issued through layer offset `n` is
//!
//! ```text
//! floor(cap * (1 - e^(-λ (n + 1)))),   λ = ln 2 / half_life
//! ```
//!
//! The exponent is split exactly in integers before any rounding happens:
//! `(n + 1) / half_life = k + m / half_life`, so
//! `e^(-λ (n + 1)) = 2^-k * e^(-ln 2 * m / half_life)`. Only the fractional
//! part goes through the Taylor series; the whole halvings are a right shift.
//! The cap is multiplied in and floored once, at the very end.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use issuance_core::constants::{MAX_PRECISION_BITS, MIN_PRECISION_BITS};
use issuance_core::params::ParameterSet;
use issuance_core::traits::SubsidySchedule;

use crate::fixed::FixedPoint;

/// The block subsidy curve for one parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsidyCurve {
    cap: u64,
    half_life: u32,
    fixed: FixedPoint,
}

impl SubsidyCurve {
    pub fn new(params: &ParameterSet) -> Self {
        Self::with_precision(
            params.total_subsidy(),
            params.half_life_layers(),
            params.precision_bits(),
        )
    }

    /// Build a curve from raw parts.
    ///
    /// # Panics
    ///
    /// Panics if `half_life` is zero or `precision_bits` is outside
    /// `MIN_PRECISION_BITS..=MAX_PRECISION_BITS`, the same bounds
    /// [`ParameterSet::new`] enforces.
    pub fn with_precision(cap: u64, half_life: u32, precision_bits: u32) -> Self {
        assert!(half_life > 0, "half-life must be positive");
        assert!(
            (MIN_PRECISION_BITS..=MAX_PRECISION_BITS).contains(&precision_bits),
            "precision {precision_bits} bits outside [{MIN_PRECISION_BITS}, {MAX_PRECISION_BITS}]"
        );
        Self {
            cap,
            half_life,
            fixed: FixedPoint::new(precision_bits),
        }
    }

    pub fn cap(&self) -> u64 {
        self.cap
    }

    pub fn half_life_layers(&self) -> u32 {
        self.half_life
    }

    pub fn precision_bits(&self) -> u32 {
        self.fixed.frac_bits()
    }

    /// Per-layer decay rate `λ = ln 2 / half_life` in fixed point.
    pub fn decay_rate(&self) -> BigUint {
        self.fixed.ln2_ratio(1, u64::from(self.half_life))
    }

    /// Fraction of the cap still unissued after `layer_offset`, i.e.
    /// `e^(-λ (layer_offset + 1))` in fixed point, rounded down.
    ///
    /// Reaches exactly zero once more than `precision_bits` half-lives have
    /// elapsed.
    pub fn remaining_fraction(&self, layer_offset: u32) -> BigUint {
        let elapsed = u64::from(layer_offset) + 1;
        let half_life = u64::from(self.half_life);
        let halvings = elapsed / half_life;
        if halvings > u64::from(self.fixed.frac_bits()) {
            return BigUint::zero();
        }
        let r = self.fixed.ln2_ratio(elapsed % half_life, half_life);
        self.fixed.exp_neg(&r) >> halvings
    }

    /// The offset at which the total first equals the cap, given that the
    /// fractional exponent is never below one ulp.
    ///
    /// This is `precision_bits * half_life`: at that offset the remaining
    /// fraction drops from exactly one ulp to zero. The cap is reached here
    /// because the fixed-point precision runs out; the real-valued curve
    /// never reaches it. Until then the total sits at `cap - 1` for a long
    /// stretch of layers. Returns `None` when the offset does not fit in
    /// `u32`.
    pub fn final_layer(&self) -> Option<u32> {
        u32::try_from(u64::from(self.fixed.frac_bits()) * u64::from(self.half_life)).ok()
    }
}

impl SubsidySchedule for SubsidyCurve {
    fn total_subsidy_through(&self, layer_offset: u32) -> u64 {
        let remaining = self.remaining_fraction(layer_offset);
        let issued = self.fixed.one() - remaining;
        self.fixed
            .mul_floor(self.cap, &issued)
            .to_u64()
            .map_or(self.cap, |amount| amount.min(self.cap))
    }
}
