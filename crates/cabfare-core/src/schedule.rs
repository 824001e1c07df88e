//! # Fare Schedule
//!
//! The business constants behind every quote, gathered into one value.
//!
//! The discount bands and the toll/state tax percentages are flat
//! heuristics, not real tariff data. They live here as named constants so
//! they are easy to find, and as [`FareSchedule`] fields so a deployment
//! can override them from config without a rebuild.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  journey base price ──┬── × 90% ──► discounted price (cosmetic)        │
//! │                       ├── × 85% ──► best price ── × 5% ──► GST         │
//! │                       ├── ×  3% ──► toll tax                           │
//! │                       └── ×  4% ──► state tax                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Rate, TripType, ROUND_TRIP_MULTIPLIER};

/// Discounted price band: 10% off.
pub const DISCOUNT_RATE: Rate = Rate::from_bps(9_000);

/// Best price band: 15% off. This is the price offered to the rider.
pub const BEST_PRICE_RATE: Rate = Rate::from_bps(8_500);

/// GST on the best price.
pub const GST_RATE: Rate = Rate::from_bps(500);

/// Toll tax on the journey base price.
pub const TOLL_TAX_RATE: Rate = Rate::from_bps(300);

/// State tax on the journey base price.
pub const STATE_TAX_RATE: Rate = Rate::from_bps(400);

/// Default rate for the generic taxes-and-fees helpers.
pub const DEFAULT_TAX_RATE: Rate = Rate::from_bps(500);

/// Average speed including rest stops.
pub const AVERAGE_SPEED_KMH: u32 = 60;

/// Distance used when neither city can be located.
pub const FALLBACK_DISTANCE_KM: u32 = 500;

/// The full set of pricing constants.
///
/// Rates serialize as basis points, so a TOML override reads
/// `gst_bps = 500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct FareSchedule {
    pub discount_bps: Rate,
    pub best_price_bps: Rate,
    pub gst_bps: Rate,
    pub toll_tax_bps: Rate,
    pub state_tax_bps: Rate,
    pub round_trip_bps: Rate,
    pub average_speed_kmh: u32,
    pub fallback_distance_km: u32,
}

impl Default for FareSchedule {
    fn default() -> Self {
        FareSchedule {
            discount_bps: DISCOUNT_RATE,
            best_price_bps: BEST_PRICE_RATE,
            gst_bps: GST_RATE,
            toll_tax_bps: TOLL_TAX_RATE,
            state_tax_bps: STATE_TAX_RATE,
            round_trip_bps: ROUND_TRIP_MULTIPLIER,
            average_speed_kmh: AVERAGE_SPEED_KMH,
            fallback_distance_km: FALLBACK_DISTANCE_KM,
        }
    }
}

impl FareSchedule {
    /// Multiplier for a trip type under this schedule.
    pub fn trip_multiplier(&self, trip: TripType) -> Rate {
        match trip {
            TripType::OneWay => Rate::ONE,
            TripType::RoundTrip => self.round_trip_bps,
        }
    }
}
