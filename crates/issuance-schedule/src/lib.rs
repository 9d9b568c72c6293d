//! # issuance-schedule
//! Deterministic subsidy and vesting curves.
//!
//! All consensus-path arithmetic is integer or big-integer fixed point; no
//! hardware floating point is involved, so every platform computes the same
//! smidge amounts.
//!
//! - **Subsidy decay**: `floor(cap * (1 - e^(-λ (n + 1))))` evaluated in
//!   binary fixed point with a configurable number of fractional bits and a
//!   single floor at the end.
//! - **Vault vesting**: cliff lump sum, then a linear per-layer release, with
//!   the rounding shortfall paid at the final vesting layer.
//! - **Projection**: per-layer ledger totals for reporting and simulation.

pub mod fixed;
pub mod projection;
pub mod schedule;
pub mod subsidy;
pub mod vesting;

pub use fixed::FixedPoint;
pub use projection::{LayerSnapshot, Projection};
pub use schedule::IssuanceSchedule;
pub use subsidy::SubsidyCurve;
pub use vesting::{VestingCurve, VestingPhase};
