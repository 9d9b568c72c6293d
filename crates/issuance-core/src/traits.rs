//! Trait interfaces for the issuance schedule.
//!
//! These traits define the contracts between crates:
//! - [`SubsidySchedule`]: exponential-decay subsidy curve (issuance-schedule implements)
//! - [`VestingSchedule`]: vault vesting curve (issuance-schedule implements)
//!
//! Implementors only supply the cumulative accumulator. The per-layer amount
//! is always the first difference of that accumulator, so a projection that
//! sums per-layer amounts reproduces the accumulator exactly.

/// Cumulative block subsidy as a function of the layer offset since
/// issuance start.
pub trait SubsidySchedule: Send + Sync {
    /// Total subsidy (in smidge) issued from offset 0 through `layer_offset`
    /// inclusive.
    ///
    /// Must be non-decreasing in `layer_offset` and never exceed the subsidy cap.
    fn total_subsidy_through(&self, layer_offset: u32) -> u64;

    /// Subsidy (in smidge) newly issued at `layer_offset`.
    ///
    /// Default implementation: first difference of
    /// [`total_subsidy_through`](Self::total_subsidy_through), with a zero
    /// previous term at offset 0.
    fn subsidy_at_layer(&self, layer_offset: u32) -> u64 {
        let current = self.total_subsidy_through(layer_offset);
        match layer_offset.checked_sub(1) {
            Some(prev) => first_difference(current, self.total_subsidy_through(prev)),
            None => current,
        }
    }
}

/// Cumulative vault release as a function of the layer offset since vault
/// genesis.
pub trait VestingSchedule: Send + Sync {
    /// Total vaulted amount (in smidge) released from offset 0 through
    /// `layer_offset` inclusive.
    fn total_vested_through(&self, layer_offset: u32) -> u64;

    /// Vaulted amount (in smidge) newly released at `layer_offset`.
    ///
    /// Default implementation: first difference of
    /// [`total_vested_through`](Self::total_vested_through).
    fn vest_at_layer(&self, layer_offset: u32) -> u64 {
        let current = self.total_vested_through(layer_offset);
        match layer_offset.checked_sub(1) {
            Some(prev) => first_difference(current, self.total_vested_through(prev)),
            None => current,
        }
    }
}

/// `current - previous` for a monotone accumulator.
///
/// # Panics
///
/// Panics if the accumulator decreased.
fn first_difference(current: u64, previous: u64) -> u64 {
    match current.checked_sub(previous) {
        Some(diff) => diff,
        None => panic!("accumulator decreased from {previous} to {current}"),
    }
}
