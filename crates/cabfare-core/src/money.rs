//! # Money Module
//!
//! Provides the `Money` type for fare amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    1200 × 0.85 = 1019.9999999999999  → depends on rounding luck         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise + Basis Points                             │
//! │    120000 paise × 8500 bps / 10000 = 102000 paise (exactly ₹1020)       │
//! │    Rounding happens once, at the rupee boundary, with a fixed law       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cabfare_core::money::Money;
//! use cabfare_core::types::Rate;
//!
//! let base = Money::from_rupees(1200);
//! let best = base.scale_to_rupee(Rate::from_bps(8500)); // 15% off
//! assert_eq!(best.rupees(), 1020);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::{Rate, BPS_SCALE};

/// Paise in one rupee.
pub const PAISE_PER_RUPEE: i64 = 100;

/// Whole-rupee bounds that still fit in i64 paise.
const MAX_RUPEES: i128 = (i64::MAX / PAISE_PER_RUPEE) as i128;
const MIN_RUPEES: i128 = (i64::MIN / PAISE_PER_RUPEE) as i128;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences between quotes can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as the bare paise integer**: the frontend formats
/// - **Saturating arithmetic**: absurd inputs clamp at the i64 bounds
///   instead of panicking or wrapping
///
/// ## Where Money is Used
/// ```text
/// CabProfile.base_km_price ──► per-km rate ──► base price
///                                                  │
///                          discount bands ◄────────┤
///                          tax components ◄────────┘
///                                  │
///                                  ▼
///                        PriceBreakdown.all_inclusive_price
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use cabfare_core::money::Money;
    ///
    /// let fare = Money::from_paise(125050); // ₹1250.50
    /// assert_eq!(fare.paise(), 125050);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(PAISE_PER_RUPEE))
    }

    /// Creates a Money value from a decimal rupee amount, rounding half up
    /// to the nearest paisa. NaN and infinities become zero.
    ///
    /// ## Example
    /// ```rust
    /// use cabfare_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal_rupees(12.5).paise(), 1250);
    /// assert_eq!(Money::from_decimal_rupees(f64::NAN), Money::zero());
    /// ```
    pub fn from_decimal_rupees(rupees: f64) -> Self {
        if !rupees.is_finite() {
            return Money::zero();
        }
        // `as` saturates at the i64 bounds
        Money((rupees * PAISE_PER_RUPEE as f64 + 0.5).floor() as i64)
    }

    /// Creates a Money value from rupees and paise.
    ///
    /// For negative amounts only the rupee part carries the sign:
    /// `from_major_minor(-5, 50)` is -₹5.50.
    #[inline]
    pub const fn from_major_minor(rupees: i64, paise: i64) -> Self {
        let major = rupees.saturating_mul(PAISE_PER_RUPEE);
        if rupees < 0 {
            Money(major.saturating_sub(paise))
        } else {
            Money(major.saturating_add(paise))
        }
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use cabfare_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(125050).rupees(), 1250);
    /// assert_eq!(Money::from_paise(-550).rupees(), -5);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / PAISE_PER_RUPEE
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % PAISE_PER_RUPEE).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies by a rate and rounds to the nearest whole rupee.
    ///
    /// ## Rounding Law
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF UP (toward +∞): floor(x + 0.5)                          │
    /// │                                                                     │
    /// │    ₹8.50 → ₹9     ₹8.49 → ₹8     -₹8.50 → -₹8                       │
    /// │                                                                     │
    /// │  This is the rounding every quote shown to riders has always used, │
    /// │  so stored booking amounts keep matching re-quoted ones.           │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// Integer only: `floor((paise × bps + D/2) / D)` rupees where
    /// `D = 10000 × 100`. Using i128 keeps large amounts from overflowing;
    /// results beyond the i64 range clamp to the largest whole rupee.
    ///
    /// ## Example
    /// ```rust
    /// use cabfare_core::money::Money;
    /// use cabfare_core::types::Rate;
    ///
    /// let journey = Money::from_rupees(1200);
    /// let toll = journey.scale_to_rupee(Rate::from_bps(300)); // 3%
    /// assert_eq!(toll, Money::from_rupees(36));
    /// ```
    pub fn scale_to_rupee(&self, rate: Rate) -> Money {
        let denominator = BPS_SCALE as i128 * PAISE_PER_RUPEE as i128;
        let numerator = self.0 as i128 * rate.bps() as i128 + denominator / 2;
        let rupees = numerator.div_euclid(denominator).clamp(MIN_RUPEES, MAX_RUPEES);
        Money((rupees * PAISE_PER_RUPEE as i128) as i64)
    }

    /// Rounds to the nearest whole rupee (half up).
    ///
    /// ## Example
    /// ```rust
    /// use cabfare_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(125050).round_to_rupee().rupees(), 1251);
    /// assert_eq!(Money::from_paise(125049).round_to_rupee().rupees(), 1250);
    /// ```
    pub fn round_to_rupee(&self) -> Money {
        self.scale_to_rupee(Rate::ONE)
    }

    /// Multiplies a per-km price by a distance.
    #[inline]
    pub const fn multiply_km(&self, km: u32) -> Self {
        Money(self.0.saturating_mul(km as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display (`₹1155.00`). The frontend does localized
/// formatting for riders.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₹{}.{:02}",
            sign,
            self.rupees().abs(),
            self.paise_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: i64) -> Self {
        Money(self.0.saturating_mul(factor))
    }
}

/// Multiplication by a kilometre count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, km: u32) -> Self {
        self.multiply_km(km)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
