//! # Quote Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CABFARE_GST_BPS=1200                                               │
//! │     CABFARE_FALLBACK_KM=400                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or fare.toml in the platform config dir           │
//! │     ~/.config/cabfare/fare.toml (Linux)                                │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     the named constants in cabfare_core::schedule                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [schedule]
//! discount_bps = 9000
//! best_price_bps = 8500
//! gst_bps = 500
//! toll_tax_bps = 300
//! state_tax_bps = 400
//! round_trip_bps = 18000
//! average_speed_kmh = 60
//! fallback_distance_km = 500
//!
//! [output]
//! pretty = true
//! ```

use std::path::{Path, PathBuf};

use cabfare_core::types::Rate;
use cabfare_core::validation::validate_schedule;
use cabfare_core::FareSchedule;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// How results are printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Pretty-print JSON output.
    #[serde(default)]
    pub pretty: bool,
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default)]
    pub schedule: FareSchedule,

    #[serde(default)]
    pub output: OutputSettings,
}

impl QuoteConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (fare.toml); a missing default file is not an error
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Reads a TOML config file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading fare config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Rejects schedules the calculator would price nonsensically.
    pub fn validate(&self) -> CliResult<()> {
        validate_schedule(&self.schedule).map_err(CliError::InvalidSchedule)
    }

    /// Applies `CABFARE_*` overrides from `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let schedule = &mut self.schedule;
        let rates: [(&str, &mut Rate); 6] = [
            ("CABFARE_DISCOUNT_BPS", &mut schedule.discount_bps),
            ("CABFARE_BEST_PRICE_BPS", &mut schedule.best_price_bps),
            ("CABFARE_GST_BPS", &mut schedule.gst_bps),
            ("CABFARE_TOLL_TAX_BPS", &mut schedule.toll_tax_bps),
            ("CABFARE_STATE_TAX_BPS", &mut schedule.state_tax_bps),
            ("CABFARE_ROUND_TRIP_BPS", &mut schedule.round_trip_bps),
        ];
        for (key, slot) in rates {
            if let Some(bps) = parse_override::<u32>(&lookup, key) {
                debug!(key, bps, "Overriding rate from environment");
                *slot = Rate::from_bps(bps);
            }
        }

        if let Some(speed) = parse_override::<u32>(&lookup, "CABFARE_AVERAGE_SPEED_KMH") {
            schedule.average_speed_kmh = speed;
        }

        if let Some(km) = parse_override::<u32>(&lookup, "CABFARE_FALLBACK_KM") {
            debug!(km, "Overriding fallback distance from environment");
            schedule.fallback_distance_km = km;
        }

        if let Some(pretty) = parse_override::<bool>(&lookup, "CABFARE_PRETTY") {
            self.output.pretty = pretty;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "cabfare", "cabfare")
            .map(|dirs| dirs.config_dir().join("fare.toml"))
    }
}

fn parse_override<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}
