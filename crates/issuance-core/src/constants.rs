//! Protocol constants. All monetary values in smidge (1 SMESH = 10^9 smidge).

pub const COIN: u64 = 1_000_000_000;

/// Total issuance over the lifetime of the protocol: vault plus subsidy.
pub const TOTAL_ISSUANCE: u64 = 2_400_000_000 * COIN;

/// Amount allocated to the vault at genesis and released by vesting.
pub const TOTAL_VAULTED: u64 = 150_000_000 * COIN;

/// Amount paid out as block subsidy along the decay curve.
///
/// # Examples
///
/// ```
/// use issuance_core::constants::{COIN, TOTAL_SUBSIDY};
/// assert_eq!(TOTAL_SUBSIDY, 2_250_000_000 * COIN);
/// ```
pub const TOTAL_SUBSIDY: u64 = TOTAL_ISSUANCE - TOTAL_VAULTED;

pub const LAYER_DURATION_SECS: u64 = 300;

/// One year (365.2425 days) of five-minute layers, rounded to the nearest layer.
pub const LAYERS_PER_YEAR: u32 = 105_190;

/// Cliff layer: one year after vault genesis.
pub const VEST_START: u32 = LAYERS_PER_YEAR;

/// Final vesting layer: four years after vault genesis.
pub const VEST_END: u32 = 4 * VEST_START;

/// Length of the linear part of the vesting window, in layers.
pub const VEST_LAYERS: u32 = VEST_END - VEST_START;

pub const BPS_PRECISION: u64 = 10_000;

/// Share of the vault released as a lump sum at the cliff (25%).
pub const VEST_CLIFF_BPS: u64 = 2_500;

/// Subsidy half-life in layers (~31 years).
///
/// After this many layers exactly half of [`TOTAL_SUBSIDY`] has been issued.
pub const HALF_LIFE_LAYERS: u32 = 3_267_565;

/// Default number of fractional bits in the fixed-point working precision.
pub const DEFAULT_PRECISION_BITS: u32 = 320;
pub const MIN_PRECISION_BITS: u32 = 128;
pub const MAX_PRECISION_BITS: u32 = 4096;
