//! Binary fixed-point arithmetic for the decay curve.
//!
//! A value `v` represents the real number `v / 2^frac_bits`. All operations
//! round toward zero, and each one is monotone non-decreasing in its
//! arguments (except [`FixedPoint::exp_neg`], which is non-increasing), so
//! compositions of them preserve the monotonicity of the real function they
//! approximate.
//!
//! Nothing here uses hardware floating point: results are bit-identical on
//! every platform for a given `frac_bits`.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Extra bits carried while summing the `ln 2` series.
const LN2_GUARD_BITS: u32 = 16;

/// Fixed-point context with a precomputed `ln 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPoint {
    frac_bits: u32,
    one: BigUint,
    ln2: BigUint,
}

impl FixedPoint {
    pub fn new(frac_bits: u32) -> Self {
        let one = BigUint::one() << frac_bits;
        let ln2 = ln2(frac_bits);
        Self { frac_bits, one, ln2 }
    }

    pub fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    /// `1.0`
    pub fn one(&self) -> &BigUint {
        &self.one
    }

    /// `ln 2`, rounded down.
    pub fn ln2(&self) -> &BigUint {
        &self.ln2
    }

    /// `ln 2 * num / den`, rounded down.
    pub fn ln2_ratio(&self, num: u64, den: u64) -> BigUint {
        &self.ln2 * num / den
    }

    /// `e^x` by the Taylor series, each term rounded down.
    ///
    /// Intended for `0 <= x < 1`; the series converges for any `x` but the
    /// number of terms grows with it.
    pub fn exp(&self, x: &BigUint) -> BigUint {
        let mut sum = self.one.clone();
        let mut term = self.one.clone();
        let mut k: u32 = 1;
        loop {
            term = (term * x) >> self.frac_bits;
            term /= k;
            if term.is_zero() {
                break;
            }
            sum += &term;
            k += 1;
        }
        sum
    }

    /// `e^-x` as the rounded-down reciprocal of [`exp`](Self::exp).
    ///
    /// Always in `(0, 1]` for the inputs the decay curve uses.
    pub fn exp_neg(&self, x: &BigUint) -> BigUint {
        (&self.one << self.frac_bits) / self.exp(x)
    }

    /// `floor(amount * v)` as a plain integer.
    pub fn mul_floor(&self, amount: u64, v: &BigUint) -> BigUint {
        (v * amount) >> self.frac_bits
    }
}

/// `ln 2 = 2 * atanh(1/3) = 2 * sum_j 1 / ((2j + 1) * 3^(2j + 1))`.
fn ln2(frac_bits: u32) -> BigUint {
    let work_bits = frac_bits + LN2_GUARD_BITS;
    let mut power = (BigUint::one() << work_bits) / 3u32;
    let mut sum = BigUint::zero();
    let mut denom: u32 = 1;
    while !power.is_zero() {
        sum += &power / denom;
        power /= 9u32;
        denom += 2;
    }
    (sum << 1u32) >> LN2_GUARD_BITS
}
