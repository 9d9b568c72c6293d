//! Issuance report: one row per tick interval, aggregated from the per-layer
//! projection.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use issuance_core::constants::COIN;
use issuance_schedule::IssuanceSchedule;

use crate::settings::RunSettings;

pub const CAPTION: &str = "all figures in SMESH (rounded down)";

const PROGRESS_INTERVAL: u32 = 100_000;

const HEADERS: [&str; 14] = [
    "layer",
    "date",
    "vaultNewVest",
    "vaultTotalVest",
    "vaultPctVest",
    "vaultTotal",
    "subsidyPerLayer",
    "subsidyNew",
    "subsidyTotal",
    "circulatingTotal",
    "issuanceTotal",
    "pctVault",
    "pctCirculating",
    "pctFinalIssuance",
];

/// Columns rendered flush left; the rest are right-aligned.
const LEFT_ALIGNED: [usize; 4] = [0, 1, 5, 11];

/// One report row. Amounts are in smidge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub layer: u32,
    pub date: NaiveDate,
    /// Vault released since the previous row.
    pub vault_new_vest: u64,
    pub vault_total_vest: u64,
    pub vault_total: u64,
    /// Subsidy issued in this row's layer alone.
    pub subsidy_per_layer: u64,
    /// Subsidy issued since the previous row.
    pub subsidy_new: u64,
    pub subsidy_total: u64,
    pub circulating_total: u64,
    pub issuance_total: u64,
    pub final_issuance: u64,
}

impl ReportRow {
    pub fn vault_pct_vested(&self) -> f64 {
        percent(self.vault_total_vest, self.vault_total)
    }

    pub fn pct_vault(&self) -> f64 {
        percent(self.vault_total, self.issuance_total)
    }

    pub fn pct_circulating(&self) -> f64 {
        percent(self.circulating_total, self.issuance_total)
    }

    pub fn pct_final_issuance(&self) -> f64 {
        percent(self.issuance_total, self.final_issuance)
    }

    fn cells(&self) -> [String; 14] {
        [
            self.layer.to_string(),
            self.date.format("%Y-%m-%d").to_string(),
            smesh(self.vault_new_vest),
            smesh(self.vault_total_vest),
            format!("{:.2}%", self.vault_pct_vested()),
            smesh(self.vault_total),
            smesh(self.subsidy_per_layer),
            smesh(self.subsidy_new),
            smesh(self.subsidy_total),
            smesh(self.circulating_total),
            smesh(self.issuance_total),
            format!("{:.2}%", self.pct_vault()),
            format!("{:.2}%", self.pct_circulating()),
            format!("{:.2}%", self.pct_final_issuance()),
        ]
    }
}

// Display only; every ledger figure stays integral.
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    100.0 * part as f64 / whole as f64
}

/// Whole SMESH, rounded down, with thousands separators.
pub fn smesh(smidge: u64) -> String {
    group_thousands(smidge / COIN)
}

pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Step through every layer up to `run.end_layer` and collect a row at each
/// tick and at the last layer.
pub fn build_rows(schedule: &IssuanceSchedule, run: &RunSettings, quiet: bool) -> Vec<ReportRow> {
    let params = schedule.params();
    let tick = run.tick_interval.max(1);
    let mut rows = Vec::with_capacity((run.end_layer / tick) as usize + 2);
    let mut vault_new_vest = 0u64;
    let mut subsidy_new = 0u64;

    for snap in schedule.projection(run.end_layer) {
        vault_new_vest += snap.vested_new;
        subsidy_new += snap.subsidy_new;

        if !quiet && snap.layer > 0 && snap.layer % PROGRESS_INTERVAL == 0 {
            info!(layer = snap.layer, end_layer = run.end_layer, "simulating");
        }

        if snap.layer % tick == 0 || snap.layer == run.end_layer {
            rows.push(ReportRow {
                layer: snap.layer,
                date: run.layer_time(snap.layer).date(),
                vault_new_vest,
                vault_total_vest: snap.vested_total,
                vault_total: params.total_vaulted(),
                subsidy_per_layer: snap.subsidy_new,
                subsidy_new,
                subsidy_total: snap.subsidy_total,
                circulating_total: snap.circulating,
                issuance_total: snap.issued,
                final_issuance: params.total_issuance(),
            });
            vault_new_vest = 0;
            subsidy_new = 0;
        }
    }
    rows
}

/// Render `rows` as an aligned text table followed by the caption.
pub fn render_table<W: Write>(out: &mut W, rows: &[ReportRow]) -> Result<()> {
    let cells: Vec<[String; 14]> = rows.iter().map(ReportRow::cells).collect();
    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let rule = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let rule = format!("+{rule}+");

    writeln!(out, "{rule}")?;
    write_line(out, &HEADERS.map(str::to_uppercase), &widths, true)?;
    writeln!(out, "{rule}")?;
    for row in &cells {
        write_line(out, row, &widths, false)?;
    }
    writeln!(out, "{rule}")?;
    writeln!(out, "{CAPTION}").context("failed to write report")?;
    Ok(())
}

fn write_line<W: Write>(out: &mut W, cells: &[String; 14], widths: &[usize; 14], header: bool) -> Result<()> {
    let mut line = String::from("|");
    for (i, (cell, &w)) in cells.iter().zip(widths).enumerate() {
        if header || LEFT_ALIGNED.contains(&i) {
            line.push_str(&format!(" {cell:<w$} |"));
        } else {
            line.push_str(&format!(" {cell:>w$} |"));
        }
    }
    writeln!(out, "{line}").context("failed to write report")
}

/// Render `rows` as JSON lines, amounts in smidge.
pub fn render_json<W: Write>(out: &mut W, rows: &[ReportRow]) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut *out, row).context("failed to encode report row")?;
        writeln!(out).context("failed to write report")?;
    }
    Ok(())
}
