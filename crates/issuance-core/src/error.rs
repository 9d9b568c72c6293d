//! Error types for schedule construction.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("vaulted cap {vaulted} exceeds issuance cap {issuance}")] VaultExceedsIssuance { vaulted: u64, issuance: u64 },
    #[error("zero subsidy cap")] ZeroSubsidyCap,
    #[error("zero half-life")] ZeroHalfLife,
    #[error("vest start {start} not before vest end {end}")] InvalidVestWindow { start: u32, end: u32 },
    #[error("cliff {0} bps outside [0, 10000)")] CliffOutOfRange(u64),
    #[error("precision {bits} bits outside [{min}, {max}]")] PrecisionOutOfRange { bits: u32, min: u32, max: u32 },
    #[error("arithmetic overflow")] ArithmeticOverflow,
}
