//! # Distance Resolver
//!
//! Maps a pair of city names to a whole number of kilometres.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Rajkot", "AHMEDABAD"                                                  │
//! │       │  trim + lowercase                                               │
//! │       ▼                                                                 │
//! │  1. FIXED_DISTANCES["rajkot-ahmedabad"]  (either direction)             │
//! │       │  hit ──► 220 km (curated, bypasses geometry)                    │
//! │       ▼  miss                                                           │
//! │  2. both cities in CITY_COORDINATES?                                    │
//! │       │  yes ──► Haversine, R = 6371 km, rounded to whole km            │
//! │       ▼  no                                                             │
//! │  3. fallback ──► 500 km placeholder (no geocoding)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution never fails. [`resolve_route`] additionally reports which
//! rule produced the number, so callers can tell a curated distance from a
//! computed one or a guess.
//!
//! ## Usage
//! ```rust
//! use cabfare_core::distance::{resolve_distance, resolve_route};
//! use cabfare_core::types::DistanceSource;
//!
//! assert_eq!(resolve_distance("Rajkot", "Ahmedabad"), 220);
//! assert_eq!(resolve_distance("ahmedabad", "RAJKOT"), 220);
//!
//! let route = resolve_route("Atlantis", "El Dorado");
//! assert_eq!(route.km, 500);
//! assert_eq!(route.source, DistanceSource::Fallback);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::schedule::FALLBACK_DISTANCE_KM;
use crate::types::{normalize_city, CityPair, DistanceSource, RouteDistance};

/// Mean Earth radius used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// =============================================================================
// Coordinates
// =============================================================================

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Coordinate { lat, lng }
    }
}

/// City centres served by the platform, keyed by lowercase name.
pub const CITY_COORDINATES: &[(&str, Coordinate)] = &[
    ("ahmedabad", Coordinate::new(23.0225, 72.5714)),
    ("rajkot", Coordinate::new(22.3039, 70.8022)),
    ("surat", Coordinate::new(21.1702, 72.8311)),
    ("vadodara", Coordinate::new(22.3072, 73.1812)),
    ("gandhinagar", Coordinate::new(23.2156, 72.6369)),
    ("jamnagar", Coordinate::new(22.4707, 70.0577)),
    ("bhavnagar", Coordinate::new(21.7645, 72.1519)),
    ("junagadh", Coordinate::new(21.5222, 70.4579)),
    ("dwarka", Coordinate::new(22.2442, 68.9685)),
    ("somnath", Coordinate::new(20.8880, 70.4012)),
    ("bhuj", Coordinate::new(23.2420, 69.6669)),
    ("udaipur", Coordinate::new(24.5854, 73.7125)),
    ("indore", Coordinate::new(22.7196, 75.8577)),
    ("mumbai", Coordinate::new(19.0760, 72.8777)),
    ("pune", Coordinate::new(18.5204, 73.8567)),
    ("delhi", Coordinate::new(28.7041, 77.1025)),
    ("jaipur", Coordinate::new(26.9124, 75.7873)),
    ("agra", Coordinate::new(27.1767, 78.0081)),
    ("bangalore", Coordinate::new(12.9716, 77.5946)),
    ("mysore", Coordinate::new(12.2958, 76.6394)),
    ("chennai", Coordinate::new(13.0827, 80.2707)),
    ("hyderabad", Coordinate::new(17.3850, 78.4867)),
];

/// Curated road distances for high-traffic corridors, in km.
///
/// Each corridor is listed once; lookups try both directions.
pub const FIXED_DISTANCES: &[(&str, u32)] = &[
    ("rajkot-ahmedabad", 220),
    ("ahmedabad-vadodara", 110),
    ("ahmedabad-surat", 265),
    ("ahmedabad-gandhinagar", 30),
    ("ahmedabad-mumbai", 525),
    ("ahmedabad-udaipur", 260),
    ("ahmedabad-bhavnagar", 170),
    ("ahmedabad-bhuj", 330),
    ("rajkot-jamnagar", 90),
    ("rajkot-junagadh", 100),
    ("rajkot-dwarka", 225),
    ("rajkot-somnath", 190),
    ("surat-mumbai", 285),
    ("mumbai-pune", 150),
    ("delhi-agra", 230),
    ("delhi-jaipur", 280),
    ("bangalore-mysore", 145),
    ("bangalore-chennai", 345),
];

/// Great-circle distance in km (unrounded).
///
/// `d = 2R·asin(√(sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlng/2)))`
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

// =============================================================================
// Distance Table
// =============================================================================

/// Read-only lookup tables plus the fallback distance.
///
/// `Copy` and free of interior mutability, so one table can serve any
/// number of threads.
#[derive(Debug, Clone, Copy)]
pub struct DistanceTable {
    coordinates: &'static [(&'static str, Coordinate)],
    fixed: &'static [(&'static str, u32)],
    fallback_km: u32,
}

impl Default for DistanceTable {
    fn default() -> Self {
        DistanceTable::builtin()
    }
}

impl DistanceTable {
    /// The tables compiled into the program.
    pub const fn builtin() -> Self {
        DistanceTable {
            coordinates: CITY_COORDINATES,
            fixed: FIXED_DISTANCES,
            fallback_km: FALLBACK_DISTANCE_KM,
        }
    }

    /// Custom tables. Names and keys must already be lowercase.
    pub const fn new(
        coordinates: &'static [(&'static str, Coordinate)],
        fixed: &'static [(&'static str, u32)],
    ) -> Self {
        DistanceTable {
            coordinates,
            fixed,
            fallback_km: FALLBACK_DISTANCE_KM,
        }
    }

    pub const fn with_fallback_km(mut self, fallback_km: u32) -> Self {
        self.fallback_km = fallback_km;
        self
    }

    pub const fn fallback_km(&self) -> u32 {
        self.fallback_km
    }

    /// Coordinates of a city, any case.
    pub fn coordinates_of(&self, city: &str) -> Option<Coordinate> {
        let city = normalize_city(city);
        self.lookup_coordinates(&city)
    }

    /// Curated distance between two cities, in either direction.
    pub fn fixed_distance(&self, from: &str, to: &str) -> Option<u32> {
        self.lookup_fixed(&CityPair::new(from, to))
    }

    /// Every city with known coordinates.
    pub fn known_cities(&self) -> impl Iterator<Item = &'static str> {
        self.coordinates.iter().map(|(name, _)| *name)
    }

    /// Resolves a city pair, reporting which rule was used.
    pub fn resolve(&self, from: &str, to: &str) -> RouteDistance {
        let from = normalize_city(from);
        let to = normalize_city(to);

        if let Some(km) = self.lookup_fixed(&CityPair::new(from.as_str(), to.as_str())) {
            return RouteDistance {
                km,
                source: DistanceSource::FixedRoute,
            };
        }

        if let (Some(a), Some(b)) = (self.lookup_coordinates(&from), self.lookup_coordinates(&to)) {
            // Fixed argument order keeps A→B and B→A bit-identical.
            let (a, b) = if from <= to { (a, b) } else { (b, a) };
            return RouteDistance {
                km: haversine_km(a, b).round() as u32,
                source: DistanceSource::Haversine,
            };
        }

        debug!(
            from = %from,
            to = %to,
            fallback_km = self.fallback_km,
            "City pair not locatable, using fallback distance"
        );
        RouteDistance {
            km: self.fallback_km,
            source: DistanceSource::Fallback,
        }
    }

    fn lookup_coordinates(&self, city: &str) -> Option<Coordinate> {
        self.coordinates
            .iter()
            .find(|(name, _)| *name == city)
            .map(|(_, coordinate)| *coordinate)
    }

    fn lookup_fixed(&self, pair: &CityPair) -> Option<u32> {
        let forward = pair.lookup_key();
        let backward = pair.reversed().lookup_key();
        self.fixed
            .iter()
            .find(|(key, _)| *key == forward)
            .or_else(|| self.fixed.iter().find(|(key, _)| *key == backward))
            .map(|(_, km)| *km)
    }
}

// =============================================================================
// Free Functions
// =============================================================================

/// Distance in km between two cities using the built-in tables.
pub fn resolve_distance(from_city: &str, to_city: &str) -> u32 {
    resolve_route(from_city, to_city).km
}

/// Distance plus the rule that produced it, using the built-in tables.
pub fn resolve_route(from_city: &str, to_city: &str) -> RouteDistance {
    DistanceTable::builtin().resolve(from_city, to_city)
}

/// Coordinates of a city from the built-in table.
pub fn coordinates_of(city: &str) -> Option<Coordinate> {
    DistanceTable::builtin().coordinates_of(city)
}

// =============================================================================
// Unit Tests
// =============================================================================
