//! Running ledger projection over consecutive layers.
//!
//! The vault is issued in full at genesis but circulates only as it vests;
//! subsidy is issued and circulates in the layer it is paid. Iterating a
//! [`Projection`] costs one subsidy evaluation per layer because the previous
//! layer's total is carried forward.

use serde::Serialize;

use crate::schedule::IssuanceSchedule;

/// Ledger totals as of the end of one layer. All amounts in smidge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerSnapshot {
    pub layer: u32,
    /// Vault released in this layer.
    pub vested_new: u64,
    /// Vault released through this layer.
    pub vested_total: u64,
    /// Subsidy issued in this layer.
    pub subsidy_new: u64,
    /// Subsidy issued through this layer.
    pub subsidy_total: u64,
    /// Vested vault plus subsidy.
    pub circulating: u64,
    /// Whole vault plus subsidy.
    pub issued: u64,
}

/// Iterator of [`LayerSnapshot`]s for absolute layers `0..=end_layer`.
#[derive(Debug, Clone)]
pub struct Projection<'a> {
    schedule: &'a IssuanceSchedule,
    next: Option<u32>,
    end: u32,
    prev_subsidy_total: u64,
}

impl<'a> Projection<'a> {
    pub fn new(schedule: &'a IssuanceSchedule, end_layer: u32) -> Self {
        Self {
            schedule,
            next: Some(0),
            end: end_layer,
            prev_subsidy_total: 0,
        }
    }
}

impl Iterator for Projection<'_> {
    type Item = LayerSnapshot;

    fn next(&mut self) -> Option<LayerSnapshot> {
        let layer = self.next.filter(|&l| l <= self.end)?;
        self.next = layer.checked_add(1);

        let s = self.schedule;
        let vested_total = s.total_vested_at(layer);
        let vested_new = s.vested_in(layer);
        let subsidy_total = s.total_subsidy_at(layer);
        let subsidy_new = subsidy_total - self.prev_subsidy_total;
        self.prev_subsidy_total = subsidy_total;

        Some(LayerSnapshot {
            layer,
            vested_new,
            vested_total,
            subsidy_new,
            subsidy_total,
            circulating: vested_total + subsidy_total,
            issued: s.params().total_vaulted() + subsidy_total,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(l) if l <= self.end => (self.end - l) as usize + 1,
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Projection<'_> {}

/// Reconciles a projection against the schedule's own accumulators.
///
/// Snapshots carry absolute layer IDs, so they are checked against the
/// epoch-aware totals. Returns the first layer whose running sums disagree
/// with the closed-form totals, or `None` if every layer matches.
pub fn first_divergence(schedule: &IssuanceSchedule, snapshots: &[LayerSnapshot]) -> Option<u32> {
    let mut subsidy_sum = 0u64;
    let mut vested_sum = 0u64;
    for snap in snapshots {
        subsidy_sum += snap.subsidy_new;
        vested_sum += snap.vested_new;
        if subsidy_sum != schedule.total_subsidy_at(snap.layer)
            || vested_sum != schedule.total_vested_at(snap.layer)
        {
            return Some(snap.layer);
        }
    }
    None
}
