//! # Travel Time
//!
//! Coarse travel-time estimates: distance over a constant average speed,
//! rounded up to whole hours. No traffic, no time zones.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::schedule::AVERAGE_SPEED_KMH;

/// Whole hours a journey is expected to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TravelEstimate {
    pub hours: u32,
}

impl TravelEstimate {
    /// Expected arrival for a given departure.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use cabfare_core::travel::estimate_travel;
    ///
    /// let departure = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
    /// let arrival = estimate_travel(220, 60).arrival_after(departure);
    /// assert_eq!(arrival, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
    /// ```
    pub fn arrival_after(&self, departure: DateTime<Utc>) -> DateTime<Utc> {
        departure + Duration::hours(i64::from(self.hours))
    }
}

impl fmt::Display for TravelEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hours {
            1 => write!(f, "1 hour"),
            n => write!(f, "{} hours", n),
        }
    }
}

/// Hours to cover `distance_km` at 60 km/h, rounded up.
pub fn estimate_travel_time(distance_km: u32) -> u32 {
    estimate_travel(distance_km, AVERAGE_SPEED_KMH).hours
}

/// Hours to cover `distance_km` at `average_speed_kmh`, rounded up.
///
/// A zero speed falls back to the 60 km/h default.
pub fn estimate_travel(distance_km: u32, average_speed_kmh: u32) -> TravelEstimate {
    let speed = if average_speed_kmh == 0 {
        AVERAGE_SPEED_KMH
    } else {
        average_speed_kmh
    };
    TravelEstimate {
        hours: distance_km.div_ceil(speed),
    }
}
