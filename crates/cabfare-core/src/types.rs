//! # Domain Types
//!
//! Core domain types used by the fare calculator.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CityPair     │   │   CabProfile    │   │ PriceBreakdown  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  origin         │   │  category       │   │  base_price     │       │
//! │  │  destination    │   │  base_km_price  │   │  best_price     │       │
//! │  │  (any case)     │   │  included_km    │   │  gst, tolls ... │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Rate       │   │   CabCategory   │   │    TripType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Sedan (₹12)    │   │  OneWay  ×1.0   │       │
//! │  │  8500 = 85%     │   │  Suv   (₹16)    │   │  RoundTrip ×1.8 │       │
//! │  └─────────────────┘   │  Luxury(₹25)    │   └─────────────────┘       │
//! │                        │  Mini  (₹10)    │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Cab Shape
//! Cab records used to arrive with optional and renamed fields
//! (`baseKmPrice` vs `basePrice`, `extraFarePerKm` vs `perKMCharge`).
//! [`CabProfile`] is the single explicit shape: every field is named, typed
//! and defaulted, and the legacy spellings are accepted as serde aliases.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::{Money, PAISE_PER_RUPEE};

// =============================================================================
// Rate
// =============================================================================

/// Basis points in 100%.
pub const BPS_SCALE: u32 = 10_000;

/// A multiplier represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000.
/// 8500 bps = 85% (the "best price" band), 18000 bps = ×1.8 (round trip).
/// Rates above 100% are allowed; they are multipliers, not only taxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// ×1.0
    pub const ONE: Rate = Rate(BPS_SCALE);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (`5.0` = 5%). Negative input
    /// saturates to zero.
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the rate as a plain fraction (for display only).
    #[inline]
    pub fn as_fraction(&self) -> f64 {
        self.0 as f64 / BPS_SCALE as f64
    }

    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// City Pair
// =============================================================================

/// An ordered (origin, destination) pair of free-text city names.
///
/// Names keep the caller's spelling; [`CityPair::normalized`] gives the
/// lowercase form used for table lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CityPair {
    pub origin: String,
    pub destination: String,
}

impl CityPair {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        CityPair {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    /// Returns the trimmed, lowercase (origin, destination).
    pub fn normalized(&self) -> (String, String) {
        (normalize_city(&self.origin), normalize_city(&self.destination))
    }

    /// Returns the pair travelled the other way.
    pub fn reversed(&self) -> Self {
        CityPair {
            origin: self.destination.clone(),
            destination: self.origin.clone(),
        }
    }

    /// Returns the `"from-to"` key used by the fixed distance table.
    ///
    /// ## Example
    /// ```rust
    /// use cabfare_core::types::CityPair;
    ///
    /// let pair = CityPair::new(" Rajkot", "AHMEDABAD");
    /// assert_eq!(pair.lookup_key(), "rajkot-ahmedabad");
    /// ```
    pub fn lookup_key(&self) -> String {
        let (from, to) = self.normalized();
        format!("{}-{}", from, to)
    }
}

impl fmt::Display for CityPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.origin, self.destination)
    }
}

/// Lookup form of a city name.
pub(crate) fn normalize_city(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Cab Category
// =============================================================================

/// The pricing category of a cab.
///
/// Unrecognized category strings fall back to [`CabCategory::Sedan`], both
/// through [`CabCategory::parse_lenient`] and when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CabCategory {
    #[default]
    Sedan,
    Suv,
    Luxury,
    Mini,
}

impl CabCategory {
    /// Every category, cheapest per-km rate first.
    pub const ALL: [CabCategory; 4] = [
        CabCategory::Mini,
        CabCategory::Sedan,
        CabCategory::Suv,
        CabCategory::Luxury,
    ];

    /// Price per kilometre for the category-rate fare law.
    pub const fn per_km_rate(&self) -> Money {
        match self {
            CabCategory::Sedan => Money::from_rupees(12),
            CabCategory::Suv => Money::from_rupees(16),
            CabCategory::Luxury => Money::from_rupees(25),
            CabCategory::Mini => Money::from_rupees(10),
        }
    }

    /// Case-insensitive parse that never fails.
    ///
    /// ## Example
    /// ```rust
    /// use cabfare_core::types::CabCategory;
    ///
    /// assert_eq!(CabCategory::parse_lenient("SUV"), CabCategory::Suv);
    /// assert_eq!(CabCategory::parse_lenient("hatchback"), CabCategory::Sedan);
    /// ```
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for CabCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CabCategory::Sedan => write!(f, "sedan"),
            CabCategory::Suv => write!(f, "suv"),
            CabCategory::Luxury => write!(f, "luxury"),
            CabCategory::Mini => write!(f, "mini"),
        }
    }
}

/// Strict parse, used at the validation boundary.
impl FromStr for CabCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedan" => Ok(CabCategory::Sedan),
            "suv" => Ok(CabCategory::Suv),
            "luxury" => Ok(CabCategory::Luxury),
            "mini" => Ok(CabCategory::Mini),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for CabCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .map(|value| CabCategory::parse_lenient(&value))
            .unwrap_or_default())
    }
}

// =============================================================================
// Trip Type
// =============================================================================

/// One-way or round-trip journey.
///
/// The trip multiplier is the ONLY difference between the two pricing paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum TripType {
    #[default]
    OneWay,
    RoundTrip,
}

/// Round trip costs 1.8 one-way journeys.
pub const ROUND_TRIP_MULTIPLIER: Rate = Rate::from_bps(18_000);

impl TripType {
    /// Multiplier applied to the one-way base price.
    pub const fn multiplier(&self) -> Rate {
        match self {
            TripType::OneWay => Rate::ONE,
            TripType::RoundTrip => ROUND_TRIP_MULTIPLIER,
        }
    }

    /// Kilometres covered by the base fare.
    pub const fn included_km(&self, distance_km: u32) -> u32 {
        match self {
            TripType::OneWay => distance_km,
            TripType::RoundTrip => distance_km.saturating_mul(2),
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripType::OneWay => write!(f, "oneWay"),
            TripType::RoundTrip => write!(f, "roundTrip"),
        }
    }
}

impl FromStr for TripType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oneway" | "one-way" | "one_way" => Ok(TripType::OneWay),
            "roundtrip" | "round-trip" | "round_trip" => Ok(TripType::RoundTrip),
            other => Err(CoreError::UnknownTripType(other.to_string())),
        }
    }
}

// =============================================================================
// Cab Profile
// =============================================================================

/// The attributes of a cab that pricing consumes.
///
/// Money fields are rupee amounts in JSON, as the admin panel stores them:
/// integers, decimals or numeric strings. Absent, null or non-numeric values
/// become zero, never an error.
///
/// ## Example
/// ```rust
/// use cabfare_core::types::{CabCategory, CabProfile};
///
/// let cab: CabProfile = serde_json::from_str(
///     r#"{ "name": "Ertiga", "cabType": "SUV", "basePrice": "14", "perKMCharge": 17.5, "includedKm": "n/a" }"#,
/// ).unwrap();
///
/// assert_eq!(cab.category, CabCategory::Suv);
/// assert_eq!(cab.base_km_price.rupees(), 14);
/// assert_eq!(cab.extra_fare_per_km.paise(), 1750);
/// assert_eq!(cab.included_km, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CabProfile {
    /// Display name (e.g. "Swift Dzire").
    pub name: String,

    /// Pricing category for the category-rate law.
    #[serde(alias = "cabType", alias = "type")]
    pub category: CabCategory,

    /// Per-km price inside the included distance (tiered law).
    #[serde(alias = "basePrice", deserialize_with = "lenient_rupees", serialize_with = "rupees_out")]
    #[ts(as = "f64")]
    pub base_km_price: Money,

    /// Per-km price beyond the included distance (tiered law).
    #[serde(alias = "perKMCharge", deserialize_with = "lenient_rupees", serialize_with = "rupees_out")]
    #[ts(as = "f64")]
    pub extra_fare_per_km: Money,

    /// Kilometres charged at `base_km_price` (tiered law).
    #[serde(deserialize_with = "lenient_km")]
    pub included_km: u32,

    /// Admin-curated route with a flat price.
    #[serde(deserialize_with = "lenient_flag")]
    pub is_fixed_route: bool,

    /// The flat price of a fixed route.
    #[serde(deserialize_with = "lenient_price", serialize_with = "optional_rupees_out")]
    #[ts(as = "Option<f64>", optional)]
    pub price: Option<Money>,
}

impl CabProfile {
    /// A profile priced purely by its category rate.
    pub fn of_category(name: impl Into<String>, category: CabCategory) -> Self {
        CabProfile {
            name: name.into(),
            category,
            ..Default::default()
        }
    }

    /// Sets the tiered-law rates.
    pub fn with_tiered_rates(mut self, base_km_price: Money, included_km: u32, extra_fare_per_km: Money) -> Self {
        self.base_km_price = base_km_price;
        self.included_km = included_km;
        self.extra_fare_per_km = extra_fare_per_km;
        self
    }

    /// Marks the profile as a fixed route with a flat price.
    pub fn with_fixed_price(mut self, price: Money) -> Self {
        self.is_fixed_route = true;
        self.price = Some(price);
        self
    }

    /// The flat price, when this is a fixed route that carries a positive one.
    pub fn fixed_price(&self) -> Option<Money> {
        self.price.filter(|price| self.is_fixed_route && price.is_positive())
    }
}

/// A JSON number or numeric string as f64; anything else is `None`.
fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn lenient_rupees<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(numeric(&value)
        .map(Money::from_decimal_rupees)
        .unwrap_or_default())
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Money>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(numeric(&other).map(Money::from_decimal_rupees).unwrap_or_default()),
    })
}

fn lenient_km<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    // f64 → u32 `as` saturates: negatives become 0, huge values u32::MAX
    Ok(numeric(&value).map(|km| km.round() as u32).unwrap_or(0))
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => flag,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn rupees_out<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(money.paise() as f64 / PAISE_PER_RUPEE as f64)
}

fn optional_rupees_out<S: Serializer>(price: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error> {
    match price {
        Some(money) => rupees_out(money, serializer),
        None => serializer.serialize_none(),
    }
}

// =============================================================================
// Distance Resolution
// =============================================================================

/// Which rule produced a resolved distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DistanceSource {
    /// Curated distance from the fixed distance table.
    FixedRoute,
    /// Great-circle distance between known city coordinates.
    Haversine,
    /// Placeholder distance for unknown cities.
    Fallback,
}

/// A resolved route length and how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RouteDistance {
    pub km: u32,
    pub source: DistanceSource,
}

impl RouteDistance {
    /// True when the distance is a placeholder rather than a measurement.
    pub fn is_guess(&self) -> bool {
        self.source == DistanceSource::Fallback
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Full price breakdown for one journey. Recomputed on every call.
///
/// All money fields are whole rupees (stored in paise).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub trip_type: TripType,
    pub distance_km: u32,
    /// Distance × per-km rate, before the trip multiplier.
    pub one_way_base_price: Money,
    /// Journey base price: the one-way base price after the trip
    /// multiplier. Every band and tax below derives from it.
    pub base_price: Money,
    /// 10% off band.
    pub discounted_price: Money,
    /// 15% off band, the price offered to the rider.
    pub best_price: Money,
    pub gst_amount: Money,
    pub toll_tax_amount: Money,
    pub state_tax_amount: Money,
    /// Best price plus GST.
    pub tax_inclusive_price: Money,
    /// Tax-inclusive price plus toll and state tax.
    pub all_inclusive_price: Money,
    pub included_km: u32,
    pub per_km_rate: Money,
    pub estimated_hours: u32,
    pub is_fixed_route: bool,
}

impl PriceBreakdown {
    /// Sum of every tax component.
    pub fn total_taxes(&self) -> Money {
        self.gst_amount + self.toll_tax_amount + self.state_tax_amount
    }

    /// Amount saved against the undiscounted journey price.
    pub fn savings(&self) -> Money {
        self.base_price - self.best_price
    }
}

/// A priced route for one cab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FareQuote {
    pub route: CityPair,
    pub distance: RouteDistance,
    pub cab_name: String,
    pub category: CabCategory,
    pub breakdown: PriceBreakdown,
}

// =============================================================================
// Unit Tests
// =============================================================================
