//! Interactive prompts for run settings.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use crate::settings::{self, RunSettings, DATE_FORMAT};

/// Ask `question` until the answer parses. An empty answer takes `default`.
///
/// Fails if the input stream ends before a valid answer is read.
pub fn ask<T, R, W>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: &str,
    parse: impl Fn(&str) -> Result<T>,
) -> Result<T>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{question} [{default}]: ").context("failed to write prompt")?;
        output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("failed to read answer")?;
        if read == 0 {
            bail!("input closed while asking for {question}");
        }
        let answer = match line.trim() {
            "" => default,
            s => s,
        };
        match parse(answer) {
            Ok(value) => return Ok(value),
            Err(e) => writeln!(output, "{e:#}").context("failed to write prompt")?,
        }
    }
}

fn parse_positive(s: &str) -> Result<u32> {
    let n: u32 = s.parse().with_context(|| format!("{s:?} is not a layer count"))?;
    if n == 0 {
        bail!("value must be positive");
    }
    Ok(n)
}

fn parse_layer(s: &str) -> Result<u32> {
    s.parse().with_context(|| format!("{s:?} is not a layer number"))
}

/// Prompt for every run setting not already fixed on the command line.
pub fn complete_settings<R, W>(
    input: &mut R,
    output: &mut W,
    genesis_date: Option<NaiveDate>,
    tick_interval: Option<u32>,
    end_layer: Option<u32>,
) -> Result<RunSettings>
where
    R: BufRead,
    W: Write,
{
    let defaults = RunSettings::default();
    let genesis_date = match genesis_date {
        Some(d) => d,
        None => ask(
            input,
            output,
            "genesis date (YYYYMMDD)",
            &defaults.genesis_date.format(DATE_FORMAT).to_string(),
            settings::parse_date,
        )?,
    };
    let tick_interval = match tick_interval {
        Some(t) => t,
        None => ask(
            input,
            output,
            "tick interval in layers",
            &defaults.tick_interval.to_string(),
            parse_positive,
        )?,
    };
    let end_layer = match end_layer {
        Some(l) => l,
        None => ask(
            input,
            output,
            "last layer",
            &defaults.end_layer.to_string(),
            parse_layer,
        )?,
    };
    Ok(RunSettings {
        genesis_date,
        tick_interval,
        end_layer,
    })
}
