//! # cabfare-core: Pure Fare Logic for the Cab Platform
//!
//! This crate prices cab journeys. It contains no I/O: every function is
//! deterministic and works only on its arguments and compiled-in tables.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cabfare Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │      Callers: booking API, admin panel, quote-cli               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ cabfare-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ distance  │  │  travel   │  │   fare    │  │ schedule  │  │   │
//! │  │   │ tables +  │  │ hours at  │  │ category  │  │ discount  │  │   │
//! │  │   │ haversine │  │ 60 km/h   │  │ + tiered  │  │ + taxes   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`distance`] - City pair → kilometres (curated table, Haversine, fallback)
//! - [`travel`] - Kilometres → estimated hours
//! - [`fare`] - Category-rate breakdowns, tiered fares, tax helpers
//! - [`schedule`] - Discount and tax constants
//! - [`money`] - Integer paise with rupee rounding
//! - [`types`] - Cab profiles, trip types, breakdowns
//! - [`validation`] - Opt-in boundary checks
//! - [`error`] - Error types for the boundary checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, bit-identical output
//! 2. **Total Functions**: unknown cities, categories and missing fields
//!    resolve to defaults; the calculator never fails
//! 3. **Integer Money**: paise and basis points, rounding once per field
//!
//! ## Example Usage
//!
//! ```rust
//! use cabfare_core::{calculate_fare_by_distance, resolve_distance};
//! use cabfare_core::types::{CabCategory, CabProfile, TripType};
//!
//! let km = resolve_distance("Rajkot", "Ahmedabad");
//! assert_eq!(km, 220);
//!
//! let sedan = CabProfile::of_category("Dzire", CabCategory::Sedan);
//! let fare = calculate_fare_by_distance(km, &sedan, TripType::RoundTrip);
//! assert_eq!(fare.base_price.rupees(), 4752); // 220 × ₹12 × 1.8
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod distance;
pub mod error;
pub mod fare;
pub mod money;
pub mod schedule;
pub mod travel;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use distance::{resolve_distance, resolve_route, DistanceTable};
pub use error::{CoreError, CoreResult, ValidationError};
pub use fare::{
    calculate_fare_by_distance, calculate_taxes_and_fees, calculate_tiered_fare,
    calculate_total_amount, FareCalculator,
};
pub use money::Money;
pub use schedule::FareSchedule;
pub use travel::estimate_travel_time;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest trip the booking flow accepts, in km.
pub const MAX_DISTANCE_KM: u32 = 5_000;

/// Parses a cab record from the admin panel's JSON.
///
/// Money fields are rupees (integer, decimal or numeric string). Unknown
/// categories become sedan and missing or non-numeric numbers become zero;
/// only input that is not a JSON object at all is rejected.
pub fn parse_cab_profile(json: &str) -> CoreResult<CabProfile> {
    Ok(serde_json::from_str(json)?)
}
