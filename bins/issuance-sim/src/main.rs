//! Issuance simulator.
//!
//! Steps through every layer from genesis to the chosen end layer and prints
//! vault vesting, subsidy, and circulating supply at each tick interval.

mod prompt;
mod report;
mod settings;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use issuance_core::params::ParameterSet;
use issuance_schedule::IssuanceSchedule;
use tracing::{error, info, warn};

use crate::settings::RunSettings;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Aligned text table in whole SMESH
    Table,
    /// One JSON object per row, amounts in smidge
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "issuance-sim",
    version,
    about = "Simulate subsidy issuance and vault vesting layer by layer"
)]
struct Args {
    /// Quiet mode: never prompt, no progress logging
    #[arg(short, long)]
    quiet: bool,

    /// Genesis date (YYYYMMDD)
    #[arg(long, value_parser = settings::parse_date)]
    genesis_date: Option<chrono::NaiveDate>,

    /// Layers between report rows
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    tick_interval: Option<u32>,

    /// Last simulated layer, inclusive
    #[arg(long)]
    end_layer: Option<u32>,

    /// Economic parameter file (TOML, JSON, or YAML)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Print the effective parameter set as JSON and exit
    #[arg(long)]
    print_params: bool,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, default_value = "text")]
    log_format: String,
}

impl Args {
    /// Fill in run settings from flags, prompting for the rest when
    /// interactive and falling back to defaults otherwise.
    fn run_settings(&self) -> Result<RunSettings> {
        if !self.quiet && io::stdin().is_terminal() {
            let mut stdin = io::stdin().lock();
            let mut stderr = io::stderr();
            return prompt::complete_settings(
                &mut stdin,
                &mut stderr,
                self.genesis_date,
                self.tick_interval,
                self.end_layer,
            );
        }
        let defaults = RunSettings::default();
        Ok(RunSettings {
            genesis_date: self.genesis_date.unwrap_or(defaults.genesis_date),
            tick_interval: self.tick_interval.unwrap_or(defaults.tick_interval),
            end_layer: self.end_layer.unwrap_or(defaults.end_layer),
        })
    }
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level, &args.log_format);

    if let Err(e) = run(args) {
        error!("{e:#}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let cfg = settings::load_schedule_config(args.params.as_deref())?;
    let params = ParameterSet::new(cfg).context("invalid schedule parameters")?;

    if args.print_params {
        let json = serde_json::to_string_pretty(&params).context("failed to encode parameters")?;
        println!("{json}");
        return Ok(());
    }

    let run = args.run_settings()?;
    if run.tick_interval == 0 {
        bail!("tick interval must be positive");
    }
    info!("genesis date is {}", run.genesis_date);
    info!("tick interval is {}", run.tick_interval);
    info!("last layer is {}", run.end_layer);

    let schedule = IssuanceSchedule::new(params);
    let rows = report::build_rows(&schedule, &run, args.quiet);

    let mut stdout = io::stdout().lock();
    match args.output {
        OutputFormat::Table => report::render_table(&mut stdout, &rows)?,
        OutputFormat::Json => report::render_json(&mut stdout, &rows)?,
    }

    match schedule.final_subsidy_layer() {
        Some(layer) => info!(
            final_layer = u64::from(layer) + u64::from(schedule.params().issuance_start_layer()),
            "subsidy reaches its cap"
        ),
        None => warn!("subsidy does not reach its cap within the layer horizon"),
    }
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// `RUST_LOG` takes precedence over `level_str`. Pass `format = "json"` for
/// structured output; any other value gives human-readable text.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    // Logs go to stderr so the report on stdout stays machine-readable.
    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .init();
    }
}
