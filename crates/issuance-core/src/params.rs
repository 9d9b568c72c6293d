//! Economic parameter set.
//!
//! [`ScheduleConfig`] is the raw, deserializable form of the economic policy.
//! [`ParameterSet`] is the validated form: constructed once, read-only
//! afterwards, with every derived constant (subsidy cap, cliff amount,
//! per-layer vesting rate, residual shortfall) computed at construction.

use serde::{Deserialize, Serialize};

use crate::constants::{
    BPS_PRECISION, DEFAULT_PRECISION_BITS, HALF_LIFE_LAYERS, MAX_PRECISION_BITS,
    MIN_PRECISION_BITS, TOTAL_ISSUANCE, TOTAL_VAULTED, VEST_CLIFF_BPS, VEST_END, VEST_START,
};
use crate::error::ParamsError;

/// Unvalidated economic policy, as read from a config file.
///
/// Missing fields fall back to the mainnet constants.
///
/// # Examples
///
/// ```
/// use issuance_core::params::{ParameterSet, ScheduleConfig};
/// let cfg = ScheduleConfig { cliff_bps: 0, ..ScheduleConfig::default() };
/// let params = ParameterSet::new(cfg).unwrap();
/// assert_eq!(params.cliff_amount(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Total issuance cap in smidge (vault plus subsidy).
    pub total_issuance: u64,
    /// Vault allocation in smidge.
    pub total_vaulted: u64,
    /// Subsidy half-life in layers.
    pub half_life_layers: u32,
    /// Vesting cliff, as a layer offset from vault genesis.
    pub vest_start_layer: u32,
    /// Final vesting layer, as a layer offset from vault genesis.
    pub vest_end_layer: u32,
    /// Fraction of the vault released at the cliff, in basis points.
    ///
    /// The cliff is 1/10,000-grained; finer fractions cannot be expressed.
    pub cliff_bps: u64,
    /// Layer at which subsidy offset 0 begins (effective genesis).
    pub issuance_start_layer: u32,
    /// Layer at which vesting offset 0 begins.
    pub vault_genesis_layer: u32,
    /// Fractional bits of the fixed-point arithmetic used for the decay curve.
    pub precision_bits: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            total_issuance: TOTAL_ISSUANCE,
            total_vaulted: TOTAL_VAULTED,
            half_life_layers: HALF_LIFE_LAYERS,
            vest_start_layer: VEST_START,
            vest_end_layer: VEST_END,
            cliff_bps: VEST_CLIFF_BPS,
            issuance_start_layer: 0,
            vault_genesis_layer: 0,
            precision_bits: DEFAULT_PRECISION_BITS,
        }
    }
}

/// Validated, immutable economic parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSet {
    total_issuance: u64,
    total_vaulted: u64,
    total_subsidy: u64,
    half_life_layers: u32,
    vest_start_layer: u32,
    vest_end_layer: u32,
    cliff_bps: u64,
    cliff_amount: u64,
    vest_per_layer: u64,
    residual_shortfall: u64,
    issuance_start_layer: u32,
    vault_genesis_layer: u32,
    precision_bits: u32,
}

impl ParameterSet {
    /// Validate `cfg` and derive the dependent constants.
    pub fn new(cfg: ScheduleConfig) -> Result<Self, ParamsError> {
        if cfg.total_vaulted > cfg.total_issuance {
            return Err(ParamsError::VaultExceedsIssuance {
                vaulted: cfg.total_vaulted,
                issuance: cfg.total_issuance,
            });
        }
        let total_subsidy = cfg.total_issuance - cfg.total_vaulted;
        if total_subsidy == 0 {
            return Err(ParamsError::ZeroSubsidyCap);
        }
        if cfg.half_life_layers == 0 {
            return Err(ParamsError::ZeroHalfLife);
        }
        if cfg.vest_start_layer >= cfg.vest_end_layer {
            return Err(ParamsError::InvalidVestWindow {
                start: cfg.vest_start_layer,
                end: cfg.vest_end_layer,
            });
        }
        if cfg.cliff_bps >= BPS_PRECISION {
            return Err(ParamsError::CliffOutOfRange(cfg.cliff_bps));
        }
        if !(MIN_PRECISION_BITS..=MAX_PRECISION_BITS).contains(&cfg.precision_bits) {
            return Err(ParamsError::PrecisionOutOfRange {
                bits: cfg.precision_bits,
                min: MIN_PRECISION_BITS,
                max: MAX_PRECISION_BITS,
            });
        }

        // floor(cliff_bps / 10_000 * total_vaulted); the product fits u128.
        let cliff_amount =
            (cfg.total_vaulted as u128 * cfg.cliff_bps as u128 / BPS_PRECISION as u128) as u64;
        let remainder = cfg.total_vaulted - cliff_amount;
        let window = u64::from(cfg.vest_end_layer - cfg.vest_start_layer);
        let vest_per_layer = remainder / window;
        let linear_total = vest_per_layer
            .checked_mul(window)
            .ok_or(ParamsError::ArithmeticOverflow)?;
        let residual_shortfall = remainder
            .checked_sub(linear_total)
            .ok_or(ParamsError::ArithmeticOverflow)?;

        Ok(Self {
            total_issuance: cfg.total_issuance,
            total_vaulted: cfg.total_vaulted,
            total_subsidy,
            half_life_layers: cfg.half_life_layers,
            vest_start_layer: cfg.vest_start_layer,
            vest_end_layer: cfg.vest_end_layer,
            cliff_bps: cfg.cliff_bps,
            cliff_amount,
            vest_per_layer,
            residual_shortfall,
            issuance_start_layer: cfg.issuance_start_layer,
            vault_genesis_layer: cfg.vault_genesis_layer,
            precision_bits: cfg.precision_bits,
        })
    }

    /// The mainnet parameter set built from [`crate::constants`].
    pub fn mainnet() -> Self {
        match Self::new(ScheduleConfig::default()) {
            Ok(params) => params,
            Err(e) => unreachable!("mainnet constants are invalid: {e}"),
        }
    }

    pub fn total_issuance(&self) -> u64 {
        self.total_issuance
    }

    pub fn total_vaulted(&self) -> u64 {
        self.total_vaulted
    }

    /// `total_issuance - total_vaulted`.
    pub fn total_subsidy(&self) -> u64 {
        self.total_subsidy
    }

    pub fn half_life_layers(&self) -> u32 {
        self.half_life_layers
    }

    pub fn vest_start_layer(&self) -> u32 {
        self.vest_start_layer
    }

    pub fn vest_end_layer(&self) -> u32 {
        self.vest_end_layer
    }

    /// Number of layers between the cliff and the final vesting layer.
    pub fn vest_layers(&self) -> u32 {
        self.vest_end_layer - self.vest_start_layer
    }

    pub fn cliff_bps(&self) -> u64 {
        self.cliff_bps
    }

    /// Lump sum released at the cliff layer, rounded down.
    pub fn cliff_amount(&self) -> u64 {
        self.cliff_amount
    }

    /// Linear release per layer after the cliff, rounded down.
    pub fn vest_per_layer(&self) -> u64 {
        self.vest_per_layer
    }

    /// Rounding loss of [`vest_per_layer`](Self::vest_per_layer) over the
    /// whole window. Paid out in full at the final vesting layer.
    pub fn residual_shortfall(&self) -> u64 {
        self.residual_shortfall
    }

    pub fn issuance_start_layer(&self) -> u32 {
        self.issuance_start_layer
    }

    pub fn vault_genesis_layer(&self) -> u32 {
        self.vault_genesis_layer
    }

    pub fn precision_bits(&self) -> u32 {
        self.precision_bits
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl TryFrom<ScheduleConfig> for ParameterSet {
    type Error = ParamsError;

    fn try_from(cfg: ScheduleConfig) -> Result<Self, Self::Error> {
        Self::new(cfg)
    }
}
