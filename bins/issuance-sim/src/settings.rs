//! Simulator settings: economic parameters and run parameters.
//!
//! Economic parameters are layered: built-in mainnet defaults, then an
//! optional parameter file (format inferred from its extension), then
//! `ISSUANCE_*` environment variables.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use config::{Config, Environment, File};
use issuance_core::constants::{LAYER_DURATION_SECS, LAYERS_PER_YEAR};
use issuance_core::params::ScheduleConfig;

pub const ENV_PREFIX: &str = "ISSUANCE";
pub const DATE_FORMAT: &str = "%Y%m%d";
pub const DEFAULT_GENESIS_DATE: &str = "20230811";
/// One week of layers.
pub const DEFAULT_TICK_INTERVAL: u32 = 2016;
/// Ten years of layers.
pub const DEFAULT_END_LAYER: u32 = 10 * LAYERS_PER_YEAR;

/// Load the economic parameters from defaults, `path`, and the process
/// environment.
pub fn load_schedule_config(path: Option<&Path>) -> Result<ScheduleConfig> {
    load_with_env(path, Environment::with_prefix(ENV_PREFIX))
}

fn load_with_env(path: Option<&Path>, env: Environment) -> Result<ScheduleConfig> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }
    let cfg = builder
        .add_source(env.try_parsing(true))
        .build()
        .context("failed to read schedule parameters")?;
    cfg.try_deserialize()
        .context("failed to parse schedule parameters")
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("invalid date {s:?}, expected YYYYMMDD"))
}

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub genesis_date: NaiveDate,
    /// A report row is emitted every `tick_interval` layers.
    pub tick_interval: u32,
    /// Last simulated layer, inclusive.
    pub end_layer: u32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            genesis_date: NaiveDate::parse_from_str(DEFAULT_GENESIS_DATE, DATE_FORMAT)
                .unwrap_or_default(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            end_layer: DEFAULT_END_LAYER,
        }
    }
}

impl RunSettings {
    /// Wall-clock start of `layer`.
    pub fn layer_time(&self, layer: u32) -> NaiveDateTime {
        let secs = i64::from(layer) * LAYER_DURATION_SECS as i64;
        self.genesis_date.and_time(NaiveTime::MIN) + Duration::seconds(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    // --- schedule parameters ---

    #[test]
    fn defaults_without_sources() {
        let cfg = load_with_env(None, no_env()).unwrap();
        assert_eq!(cfg, ScheduleConfig::default());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let f = temp_file(".toml", "half_life_layers = 1000\ncliff_bps = 0\n");
        let cfg = load_with_env(Some(f.path()), no_env()).unwrap();
        assert_eq!(cfg.half_life_layers, 1000);
        assert_eq!(cfg.cliff_bps, 0);
        assert_eq!(cfg.total_issuance, ScheduleConfig::default().total_issuance);
    }

    #[test]
    fn json_file_overrides_defaults() {
        let f = temp_file(".json", r#"{"vest_start_layer": 5, "vest_end_layer": 50}"#);
        let cfg = load_with_env(Some(f.path()), no_env()).unwrap();
        assert_eq!(cfg.vest_start_layer, 5);
        assert_eq!(cfg.vest_end_layer, 50);
    }

    #[test]
    fn env_overrides_file() {
        let f = temp_file(".toml", "half_life_layers = 1000\n");
        let cfg = load_with_env(
            Some(f.path()),
            env(&[("ISSUANCE_HALF_LIFE_LAYERS", "2000")]),
        )
        .unwrap();
        assert_eq!(cfg.half_life_layers, 2000);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_with_env(Some(Path::new("/nonexistent/params.toml")), no_env());
        assert!(err.is_err());
    }

    #[test]
    fn malformed_value_is_an_error() {
        let f = temp_file(".toml", "half_life_layers = \"soon\"\n");
        assert!(load_with_env(Some(f.path()), no_env()).is_err());
    }

    // --- run settings ---

    #[test]
    fn parse_date_accepts_compact_format() {
        let d = parse_date("20230811").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2023, 8, 11).unwrap());
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("2023-08-11").is_err());
        assert!(parse_date("20231345").is_err());
    }

    #[test]
    fn default_genesis_matches_constant() {
        let s = RunSettings::default();
        assert_eq!(s.genesis_date, parse_date(DEFAULT_GENESIS_DATE).unwrap());
        assert_eq!(s.end_layer, 1_051_900);
    }

    #[test]
    fn layer_time_advances_five_minutes() {
        let s = RunSettings::default();
        let t0 = s.layer_time(0);
        let t1 = s.layer_time(1);
        assert_eq!(t1 - t0, Duration::minutes(5));
        // One week of layers later.
        assert_eq!(s.layer_time(DEFAULT_TICK_INTERVAL) - t0, Duration::days(7));
    }
}
