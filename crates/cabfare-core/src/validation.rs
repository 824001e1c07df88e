//! # Validation Module
//!
//! Opt-in input checks for callers that want to reject bad input before
//! quoting.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Booking form (frontend)                                      │
//! │  └── City pickers, cab selection                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Boundary (quote-cli, API handlers)                           │
//! │  └── THIS MODULE: names, categories, rates, cab records                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculator                                                   │
//! │  └── Accepts anything. Unknown → default, missing → zero.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator never calls into this module; skipping validation
//! still yields a quote.
//!
//! ## Usage
//! ```rust
//! use cabfare_core::validation::{validate_city_name, validate_distance_km};
//!
//! assert!(validate_city_name("Rajkot").is_ok());
//! assert!(validate_distance_km(220).is_ok());
//! ```

use crate::error::ValidationError;
use crate::schedule::FareSchedule;
use crate::types::{CabCategory, CabProfile, Rate, BPS_SCALE};
use crate::MAX_DISTANCE_KM;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted city name.
const MAX_CITY_NAME_LEN: usize = 100;

/// Largest trip multiplier accepted in a schedule (×5).
const MAX_MULTIPLIER_BPS: u32 = 5 * BPS_SCALE;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a city name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters
/// - Letters, spaces, hyphens, dots and apostrophes only
///
/// ## Example
/// ```rust
/// use cabfare_core::validation::validate_city_name;
///
/// assert!(validate_city_name("Navi Mumbai").is_ok());
/// assert!(validate_city_name("").is_err());
/// assert!(validate_city_name("Pune; DROP TABLE").is_err());
/// ```
pub fn validate_city_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "city".to_string(),
        });
    }

    if name.chars().count() > MAX_CITY_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "city".to_string(),
            max: MAX_CITY_NAME_LEN,
        });
    }

    if !name
        .chars()
        .all(|c| c.is_alphabetic() || matches!(c, ' ' | '-' | '.' | '\''))
    {
        return Err(ValidationError::InvalidFormat {
            field: "city".to_string(),
            reason: "must contain only letters, spaces, hyphens, dots, and apostrophes".to_string(),
        });
    }

    Ok(())
}

/// Strictly parses a cab category.
pub fn validate_category(raw: &str) -> ValidationResult<CabCategory> {
    raw.parse().map_err(|_| ValidationError::NotAllowed {
        field: "category".to_string(),
        allowed: CabCategory::ALL.iter().map(ToString::to_string).collect(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a trip distance.
///
/// ## Rules
/// - At most MAX_DISTANCE_KM (5000)
pub fn validate_distance_km(distance_km: u32) -> ValidationResult<()> {
    if distance_km > MAX_DISTANCE_KM {
        return Err(ValidationError::OutOfRange {
            field: "distance_km".to_string(),
            min: 0,
            max: MAX_DISTANCE_KM as i64,
        });
    }

    Ok(())
}

/// Validates a discount or tax rate: between 0% and 100%.
pub fn validate_rate_bps(field: &str, rate: Rate) -> ValidationResult<()> {
    if rate.bps() > BPS_SCALE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: BPS_SCALE as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a cab record before it is offered to riders.
///
/// ## Rules
/// - Per-km prices must not be negative
/// - A fixed route must carry a positive price
pub fn validate_cab_profile(cab: &CabProfile) -> ValidationResult<()> {
    if cab.base_km_price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "base_km_price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if cab.extra_fare_per_km.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "extra_fare_per_km".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if cab.is_fixed_route && !cab.price.is_some_and(|price| price.is_positive()) {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an overridden fare schedule.
///
/// ## Rules
/// - Discount and tax rates between 0% and 100%
/// - Round-trip multiplier between ×1 and ×5
/// - Average speed positive
/// - Fallback distance within MAX_DISTANCE_KM
pub fn validate_schedule(schedule: &FareSchedule) -> ValidationResult<()> {
    validate_rate_bps("discount_bps", schedule.discount_bps)?;
    validate_rate_bps("best_price_bps", schedule.best_price_bps)?;
    validate_rate_bps("gst_bps", schedule.gst_bps)?;
    validate_rate_bps("toll_tax_bps", schedule.toll_tax_bps)?;
    validate_rate_bps("state_tax_bps", schedule.state_tax_bps)?;

    let round_trip = schedule.round_trip_bps.bps();
    if !(BPS_SCALE..=MAX_MULTIPLIER_BPS).contains(&round_trip) {
        return Err(ValidationError::OutOfRange {
            field: "round_trip_bps".to_string(),
            min: BPS_SCALE as i64,
            max: MAX_MULTIPLIER_BPS as i64,
        });
    }

    if schedule.average_speed_kmh == 0 {
        return Err(ValidationError::MustBePositive {
            field: "average_speed_kmh".to_string(),
        });
    }

    validate_distance_km(schedule.fallback_distance_km)
}

// =============================================================================
// Unit Tests
// =============================================================================
