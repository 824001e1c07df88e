//! # Cabfare Quote CLI
//!
//! Command-line front end for `cabfare-core`. Every subcommand prints one
//! JSON document on stdout; logs go to stderr.
//!
//! ```text
//! fare-quote distance Rajkot Ahmedabad
//! fare-quote fare --distance-km 100 --category sedan --trip-type roundTrip
//! fare-quote tiered --distance-km 350 --base-km-price 11 --included-km 300 --extra-fare-per-km 13
//! fare-quote quote Rajkot Ahmedabad --cab-file dzire.json
//! fare-quote catalog Mumbai Pune
//! fare-quote total --amount 1000 --tax-bps 500
//! ```

pub mod config;
pub mod error;

use std::path::{Path, PathBuf};

use cabfare_core::fare::{calculate_tiered_fare, calculate_total_amount};
use cabfare_core::schedule::DEFAULT_TAX_RATE;
use cabfare_core::travel::estimate_travel;
use cabfare_core::validation::{
    validate_cab_profile, validate_category, validate_city_name, validate_distance_km,
};
use cabfare_core::{
    calculate_taxes_and_fees, parse_cab_profile, CabCategory, CabProfile, CoreError, FareCalculator,
    Money, Rate, TripType,
};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::QuoteConfig;
use crate::error::{CliError, CliResult};

/// Cab fare estimates.
#[derive(Debug, Parser)]
#[command(name = "fare-quote", version, about)]
pub struct Cli {
    /// Path to a fare.toml config file.
    #[arg(long, global = true, env = "CABFARE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the distance between two cities.
    Distance { from: String, to: String },

    /// Category-rate breakdown for a known distance.
    Fare {
        #[arg(long)]
        distance_km: u32,
        /// sedan, suv, luxury or mini; anything else is priced as sedan.
        #[arg(long, default_value = "sedan")]
        category: String,
        #[arg(long, default_value = "oneWay")]
        trip_type: TripType,
        /// Flat fixed-route price in rupees.
        #[arg(long)]
        fixed_price: Option<i64>,
    },

    /// Tiered fare: base price up to the included km, extra price beyond.
    Tiered {
        #[arg(long)]
        distance_km: u32,
        /// Rupees per km inside the included distance.
        #[arg(long)]
        base_km_price: i64,
        #[arg(long, default_value_t = 0)]
        included_km: u32,
        /// Rupees per km beyond the included distance.
        #[arg(long, default_value_t = 0)]
        extra_fare_per_km: i64,
    },

    /// Resolve a route and price it for one cab.
    Quote {
        from: String,
        to: String,
        #[arg(long, default_value = "sedan")]
        category: String,
        /// Cab record JSON (money fields in rupees); overrides --category.
        #[arg(long)]
        cab_file: Option<PathBuf>,
        #[arg(long, default_value = "oneWay")]
        trip_type: TripType,
    },

    /// Quote every cab for a route, cheapest first.
    Catalog {
        from: String,
        to: String,
        /// JSON array of cab records; defaults to one cab per category.
        #[arg(long)]
        cabs_file: Option<PathBuf>,
        #[arg(long, default_value = "oneWay")]
        trip_type: TripType,
    },

    /// Amount plus taxes and fees.
    Total {
        /// Amount in rupees.
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value_t = DEFAULT_TAX_RATE.bps())]
        tax_bps: u32,
        /// Tax rate as a percentage (e.g. 12.5); overrides --tax-bps.
        #[arg(long, conflicts_with = "tax_bps")]
        tax_percent: Option<f64>,
    },
}

/// Runs one subcommand and returns the JSON document to print.
pub fn run(command: Command, config: &QuoteConfig) -> CliResult<Value> {
    let calculator = FareCalculator::new(config.schedule);

    let output = match command {
        Command::Distance { from, to } => {
            validate_route(&from, &to)?;
            let route = calculator.distances().resolve(&from, &to);
            if route.is_guess() {
                warn!(%from, %to, km = route.km, "Unknown city, distance is a placeholder");
            }
            let travel = estimate_travel(route.km, config.schedule.average_speed_kmh);
            json!({ "route": route, "estimatedHours": travel.hours })
        }

        Command::Fare {
            distance_km,
            category,
            trip_type,
            fixed_price,
        } => {
            validate_distance_km(distance_km)?;
            let mut cab = CabProfile::of_category(category.clone(), lenient_category(&category));
            if let Some(price) = fixed_price {
                cab = cab.with_fixed_price(Money::from_rupees(price));
            }
            validate_cab_profile(&cab)?;
            serde_json::to_value(calculator.breakdown(distance_km, &cab, trip_type))?
        }

        Command::Tiered {
            distance_km,
            base_km_price,
            included_km,
            extra_fare_per_km,
        } => {
            validate_distance_km(distance_km)?;
            let cab = CabProfile::default().with_tiered_rates(
                Money::from_rupees(base_km_price),
                included_km,
                Money::from_rupees(extra_fare_per_km),
            );
            validate_cab_profile(&cab)?;
            json!({ "distanceKm": distance_km, "fare": calculate_tiered_fare(&cab, distance_km) })
        }

        Command::Quote {
            from,
            to,
            category,
            cab_file,
            trip_type,
        } => {
            validate_route(&from, &to)?;
            let cab = match cab_file {
                Some(path) => parse_cab_profile(&read_input(&path)?)?,
                None => CabProfile::of_category(category.clone(), lenient_category(&category)),
            };
            validate_cab_profile(&cab)?;
            serde_json::to_value(calculator.quote(&from, &to, &cab, trip_type))?
        }

        Command::Catalog {
            from,
            to,
            cabs_file,
            trip_type,
        } => {
            validate_route(&from, &to)?;
            let cabs = match cabs_file {
                Some(path) => read_cabs(&path)?,
                None => default_catalog(),
            };
            for cab in &cabs {
                validate_cab_profile(cab)?;
            }
            let quotes = calculator.quote_catalog(&from, &to, &cabs, trip_type);
            info!(count = quotes.len(), "Catalog quoted");
            serde_json::to_value(quotes)?
        }

        Command::Total {
            amount,
            tax_bps,
            tax_percent,
        } => {
            let base = Money::from_rupees(amount);
            let rate = tax_percent.map_or(Rate::from_bps(tax_bps), Rate::from_percentage);
            json!({
                "amount": base,
                "taxes": calculate_taxes_and_fees(base, rate),
                "total": calculate_total_amount(base, rate),
            })
        }
    };

    Ok(output)
}

/// Serializes output per the config.
pub fn render(value: &Value, config: &QuoteConfig) -> CliResult<String> {
    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

/// One cab per category, named after the category.
pub fn default_catalog() -> Vec<CabProfile> {
    CabCategory::ALL
        .iter()
        .map(|category| CabProfile::of_category(category.to_string(), *category))
        .collect()
}

fn lenient_category(raw: &str) -> CabCategory {
    validate_category(raw).unwrap_or_else(|e| {
        warn!(error = %e, "Unknown cab category, pricing as sedan");
        CabCategory::default()
    })
}

fn validate_route(from: &str, to: &str) -> CliResult<()> {
    validate_city_name(from)?;
    validate_city_name(to)?;
    Ok(())
}

fn read_input(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn read_cabs(path: &Path) -> CliResult<Vec<CabProfile>> {
    let contents = read_input(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Core(CoreError::InvalidProfile(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn run_default(command: Command) -> Value {
        run(command, &QuoteConfig::default()).unwrap()
    }

    #[test]
    fn test_distance_command() {
        let out = run_default(Command::Distance {
            from: "Rajkot".into(),
            to: "AHMEDABAD".into(),
        });
        assert_eq!(out["route"]["km"], 220);
        assert_eq!(out["route"]["source"], "fixed_route");
        assert_eq!(out["estimatedHours"], 4);
    }

    #[test]
    fn test_distance_rejects_malformed_city() {
        let err = run(
            Command::Distance {
                from: "".into(),
                to: "Pune".into(),
            },
            &QuoteConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_fare_command_matches_reference_quote() {
        let out = run_default(Command::Fare {
            distance_km: 100,
            category: "hatchback".into(),
            trip_type: TripType::OneWay,
            fixed_price: None,
        });
        assert_eq!(out["perKmRate"], 1200);
        assert_eq!(out["allInclusivePrice"], 115_500);
    }

    #[test]
    fn test_fare_command_fixed_price() {
        let out = run_default(Command::Fare {
            distance_km: 220,
            category: "suv".into(),
            trip_type: TripType::OneWay,
            fixed_price: Some(3000),
        });
        assert_eq!(out["isFixedRoute"], true);
        assert_eq!(out["allInclusivePrice"], 300_000);
    }

    #[test]
    fn test_fare_command_rejects_non_positive_fixed_price() {
        let err = run(
            Command::Fare {
                distance_km: 220,
                category: "suv".into(),
                trip_type: TripType::OneWay,
                fixed_price: Some(0),
            },
            &QuoteConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_tiered_command() {
        let out = run_default(Command::Tiered {
            distance_km: 350,
            base_km_price: 11,
            included_km: 300,
            extra_fare_per_km: 13,
        });
        assert_eq!(out["fare"], 395_000);
    }

    #[test]
    fn test_quote_command_with_cab_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name":"Innova","cabType":"SUV"}}"#).unwrap();

        let out = run_default(Command::Quote {
            from: "Mumbai".into(),
            to: "Pune".into(),
            category: "sedan".into(),
            cab_file: Some(file.path().to_path_buf()),
            trip_type: TripType::RoundTrip,
        });
        assert_eq!(out["cabName"], "Innova");
        assert_eq!(out["category"], "suv");
        // 150 km × ₹16 × 1.8
        assert_eq!(out["breakdown"]["basePrice"], 432_000);
    }

    #[test]
    fn test_catalog_command_default_cabs() {
        let out = run_default(Command::Catalog {
            from: "Delhi".into(),
            to: "Agra".into(),
            cabs_file: None,
            trip_type: TripType::OneWay,
        });
        let quotes = out.as_array().unwrap();
        assert_eq!(quotes.len(), 4);
        assert_eq!(quotes[0]["category"], "mini");
        assert_eq!(quotes[3]["category"], "luxury");
    }

    #[test]
    fn test_catalog_command_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = run(
            Command::Catalog {
                from: "Delhi".into(),
                to: "Agra".into(),
                cabs_file: Some(file.path().to_path_buf()),
                trip_type: TripType::OneWay,
            },
            &QuoteConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Core(CoreError::InvalidProfile(_))));
    }

    #[test]
    fn test_total_command() {
        let out = run_default(Command::Total {
            amount: 1000,
            tax_bps: 500,
            tax_percent: None,
        });
        assert_eq!(out["taxes"], 5_000);
        assert_eq!(out["total"], 105_000);
    }

    #[test]
    fn test_total_command_percent_rate() {
        let out = run_default(Command::Total {
            amount: 1000,
            tax_bps: 500,
            tax_percent: Some(12.5),
        });
        assert_eq!(out["taxes"], 12_500);
        assert_eq!(out["total"], 112_500);
    }

    #[test]
    fn test_total_command_huge_amount_saturates() {
        let out = run_default(Command::Total {
            amount: i64::MAX,
            tax_bps: 500,
            tax_percent: None,
        });
        assert!(out["total"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_tiered_command_huge_rate_saturates() {
        let out = run_default(Command::Tiered {
            distance_km: 5_000,
            base_km_price: i64::MAX,
            included_km: 5_000,
            extra_fare_per_km: 0,
        });
        assert!(out["fare"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_quote_command_decimal_cab_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name":"Dzire","cabType":"sedan","isFixedRoute":true,"price":"2499.6"}}"#).unwrap();

        let out = run_default(Command::Quote {
            from: "Rajkot".into(),
            to: "Ahmedabad".into(),
            category: "sedan".into(),
            cab_file: Some(file.path().to_path_buf()),
            trip_type: TripType::OneWay,
        });
        assert_eq!(out["breakdown"]["isFixedRoute"], true);
        assert_eq!(out["breakdown"]["allInclusivePrice"], 250_000);
    }

    #[test]
    fn test_schedule_flows_into_commands() {
        let mut config = QuoteConfig::default();
        config.schedule.fallback_distance_km = 42;
        let out = run(
            Command::Distance {
                from: "Atlantis".into(),
                to: "Rajkot".into(),
            },
            &config,
        )
        .unwrap();
        assert_eq!(out["route"]["km"], 42);
        assert_eq!(out["route"]["source"], "fallback");
    }

    #[test]
    fn test_cli_parses_trip_type() {
        let cli = Cli::parse_from([
            "fare-quote",
            "fare",
            "--distance-km",
            "100",
            "--trip-type",
            "round-trip",
        ]);
        assert!(matches!(
            cli.command,
            Command::Fare {
                trip_type: TripType::RoundTrip,
                ..
            }
        ));
    }

    #[test]
    fn test_render() {
        let mut config = QuoteConfig::default();
        let value = json!({ "a": 1 });
        assert_eq!(render(&value, &config).unwrap(), r#"{"a":1}"#);
        config.output.pretty = true;
        assert!(render(&value, &config).unwrap().contains('\n'));
    }
}
