//! # Fare Calculator
//!
//! Two pricing laws live here, deliberately kept apart:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CATEGORY-RATE LAW  (calculate_fare_by_distance)                        │
//! │  ───────────────────────────────────────────────                        │
//! │  distance × category rate ──► base price (one way)                      │
//! │                 × trip multiplier (1.0 / 1.8) ──► journey base price    │
//! │                 ├── discount bands (90%, 85%)                           │
//! │                 └── taxes (GST on best price, toll + state on base)     │
//! │                                                                         │
//! │  TIERED LAW  (calculate_tiered_fare)                                    │
//! │  ──────────────────────────────────                                     │
//! │  min(d, included_km) × base_km_price                                    │
//! │  + max(0, d − included_km) × extra_fare_per_km                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two laws are NOT reconciled. A caller must know which law a cab
//! record expects; nothing here guesses.
//!
//! Every function is pure and total: identical inputs give bit-identical
//! outputs and nothing panics or errors on odd input.
//!
//! ## Usage
//! ```rust
//! use cabfare_core::fare::calculate_fare_by_distance;
//! use cabfare_core::types::{CabCategory, CabProfile, TripType};
//!
//! let sedan = CabProfile::of_category("Dzire", CabCategory::Sedan);
//! let fare = calculate_fare_by_distance(100, &sedan, TripType::OneWay);
//!
//! assert_eq!(fare.base_price.rupees(), 1200);
//! assert_eq!(fare.best_price.rupees(), 1020);
//! assert_eq!(fare.all_inclusive_price.rupees(), 1155);
//! ```

use tracing::debug;

use crate::distance::DistanceTable;
use crate::money::Money;
use crate::schedule::FareSchedule;
use crate::travel::estimate_travel;
use crate::types::{CabProfile, CityPair, FareQuote, PriceBreakdown, Rate, TripType};

// =============================================================================
// Fare Calculator
// =============================================================================

/// Prices journeys under a [`FareSchedule`] with a [`DistanceTable`].
///
/// Holds only `Copy` read-only data, so it can be shared freely across
/// threads or rebuilt per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct FareCalculator {
    schedule: FareSchedule,
    distances: DistanceTable,
}

impl FareCalculator {
    /// A calculator for `schedule`, using the built-in distance tables with
    /// the schedule's fallback distance.
    pub fn new(schedule: FareSchedule) -> Self {
        FareCalculator {
            schedule,
            distances: DistanceTable::builtin().with_fallback_km(schedule.fallback_distance_km),
        }
    }

    pub fn with_distances(mut self, distances: DistanceTable) -> Self {
        self.distances = distances;
        self
    }

    pub fn schedule(&self) -> &FareSchedule {
        &self.schedule
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    /// Category-rate price breakdown for a known distance.
    ///
    /// ## Fixed Routes
    /// When the cab is a fixed route with a price, every price field is that
    /// flat price (scaled by the trip multiplier for round trips) and no
    /// discount or tax is layered on.
    pub fn breakdown(&self, distance_km: u32, cab: &CabProfile, trip: TripType) -> PriceBreakdown {
        let per_km_rate = cab.category.per_km_rate();
        let multiplier = self.schedule.trip_multiplier(trip);
        let estimated_hours = estimate_travel(distance_km, self.schedule.average_speed_kmh).hours;
        let included_km = trip.included_km(distance_km);

        if let Some(price) = cab.fixed_price() {
            let one_way = price.round_to_rupee();
            let journey = one_way.scale_to_rupee(multiplier);
            debug!(cab = %cab.name, %journey, "Fixed route price applied");
            return PriceBreakdown {
                trip_type: trip,
                distance_km,
                one_way_base_price: one_way,
                base_price: journey,
                discounted_price: journey,
                best_price: journey,
                gst_amount: Money::zero(),
                toll_tax_amount: Money::zero(),
                state_tax_amount: Money::zero(),
                tax_inclusive_price: journey,
                all_inclusive_price: journey,
                included_km,
                per_km_rate,
                estimated_hours,
                is_fixed_route: true,
            };
        }

        let one_way = per_km_rate.multiply_km(distance_km).round_to_rupee();
        let base_price = one_way.scale_to_rupee(multiplier);

        let discounted_price = base_price.scale_to_rupee(self.schedule.discount_bps);
        let best_price = base_price.scale_to_rupee(self.schedule.best_price_bps);
        let gst_amount = best_price.scale_to_rupee(self.schedule.gst_bps);
        let toll_tax_amount = base_price.scale_to_rupee(self.schedule.toll_tax_bps);
        let state_tax_amount = base_price.scale_to_rupee(self.schedule.state_tax_bps);

        let tax_inclusive_price = best_price + gst_amount;
        let all_inclusive_price = tax_inclusive_price + toll_tax_amount + state_tax_amount;

        PriceBreakdown {
            trip_type: trip,
            distance_km,
            one_way_base_price: one_way,
            base_price,
            discounted_price,
            best_price,
            gst_amount,
            toll_tax_amount,
            state_tax_amount,
            tax_inclusive_price,
            all_inclusive_price,
            included_km,
            per_km_rate,
            estimated_hours,
            is_fixed_route: false,
        }
    }

    /// Resolves the route and prices it for one cab.
    pub fn quote(&self, from_city: &str, to_city: &str, cab: &CabProfile, trip: TripType) -> FareQuote {
        let distance = self.distances.resolve(from_city, to_city);
        debug!(
            from = from_city,
            to = to_city,
            km = distance.km,
            source = ?distance.source,
            "Route resolved"
        );
        FareQuote {
            route: CityPair::new(from_city, to_city),
            distance,
            cab_name: cab.name.clone(),
            category: cab.category,
            breakdown: self.breakdown(distance.km, cab, trip),
        }
    }

    /// Quotes every cab for one route, cheapest all-inclusive price first.
    ///
    /// The route is resolved once. Cabs with equal prices keep their input
    /// order.
    pub fn quote_catalog(
        &self,
        from_city: &str,
        to_city: &str,
        cabs: &[CabProfile],
        trip: TripType,
    ) -> Vec<FareQuote> {
        let distance = self.distances.resolve(from_city, to_city);
        let route = CityPair::new(from_city, to_city);

        let mut quotes: Vec<FareQuote> = cabs
            .iter()
            .map(|cab| FareQuote {
                route: route.clone(),
                distance,
                cab_name: cab.name.clone(),
                category: cab.category,
                breakdown: self.breakdown(distance.km, cab, trip),
            })
            .collect();

        quotes.sort_by_key(|quote| quote.breakdown.all_inclusive_price);
        quotes
    }
}

// =============================================================================
// Free Functions
// =============================================================================

/// Category-rate price breakdown under the default schedule.
pub fn calculate_fare_by_distance(distance_km: u32, cab: &CabProfile, trip: TripType) -> PriceBreakdown {
    FareCalculator::default().breakdown(distance_km, cab, trip)
}

/// Tiered fare: `base_km_price` up to `included_km`, `extra_fare_per_km`
/// beyond it, rounded to the rupee.
///
/// ## Example
/// ```rust
/// use cabfare_core::fare::calculate_tiered_fare;
/// use cabfare_core::money::Money;
/// use cabfare_core::types::{CabCategory, CabProfile};
///
/// let cab = CabProfile::of_category("Innova", CabCategory::Suv)
///     .with_tiered_rates(Money::from_rupees(14), 80, Money::from_rupees(18));
///
/// // 80 km × ₹14 + 20 km × ₹18
/// assert_eq!(calculate_tiered_fare(&cab, 100).rupees(), 1480);
/// ```
pub fn calculate_tiered_fare(cab: &CabProfile, distance_km: u32) -> Money {
    let within = distance_km.min(cab.included_km);
    let beyond = distance_km.saturating_sub(cab.included_km);
    (cab.base_km_price.multiply_km(within) + cab.extra_fare_per_km.multiply_km(beyond)).round_to_rupee()
}

/// Taxes and fees on an amount, rounded to the rupee.
///
/// Pass [`DEFAULT_TAX_RATE`](crate::schedule::DEFAULT_TAX_RATE) for the
/// standard 5%.
pub fn calculate_taxes_and_fees(base_amount: Money, tax_rate: Rate) -> Money {
    base_amount.scale_to_rupee(tax_rate)
}

/// Amount plus its taxes and fees, rounded to the rupee.
pub fn calculate_total_amount(base_amount: Money, tax_rate: Rate) -> Money {
    (base_amount + calculate_taxes_and_fees(base_amount, tax_rate)).round_to_rupee()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::DEFAULT_TAX_RATE;
    use crate::types::{CabCategory, DistanceSource};
    use proptest::prelude::*;

    fn sedan() -> CabProfile {
        CabProfile::of_category("Dzire", CabCategory::Sedan)
    }

    fn any_category() -> impl Strategy<Value = CabCategory> {
        prop::sample::select(CabCategory::ALL.to_vec())
    }

    #[test]
    fn test_sedan_100km_one_way() {
        let fare = calculate_fare_by_distance(100, &sedan(), TripType::OneWay);

        assert_eq!(fare.per_km_rate.rupees(), 12);
        assert_eq!(fare.one_way_base_price.rupees(), 1200);
        assert_eq!(fare.base_price.rupees(), 1200);
        assert_eq!(fare.discounted_price.rupees(), 1080);
        assert_eq!(fare.best_price.rupees(), 1020);
        assert_eq!(fare.gst_amount.rupees(), 51);
        assert_eq!(fare.toll_tax_amount.rupees(), 36);
        assert_eq!(fare.state_tax_amount.rupees(), 48);
        assert_eq!(fare.tax_inclusive_price.rupees(), 1071);
        assert_eq!(fare.all_inclusive_price.rupees(), 1155);
        assert_eq!(fare.included_km, 100);
        assert_eq!(fare.estimated_hours, 2);
        assert!(!fare.is_fixed_route);
    }

    #[test]
    fn test_sedan_100km_round_trip() {
        let fare = calculate_fare_by_distance(100, &sedan(), TripType::RoundTrip);

        assert_eq!(fare.one_way_base_price.rupees(), 1200);
        assert_eq!(fare.base_price.rupees(), 2160);
        assert_eq!(fare.best_price.rupees(), 1836);
        assert_eq!(fare.included_km, 200);
    }

    #[test]
    fn test_unknown_category_uses_sedan_rate() {
        let cab: CabProfile = serde_json::from_str(r#"{"category":"hatchback"}"#).unwrap();
        let fare = calculate_fare_by_distance(100, &cab, TripType::OneWay);
        assert_eq!(fare.per_km_rate.rupees(), 12);
        assert_eq!(fare, calculate_fare_by_distance(100, &sedan(), TripType::OneWay));
    }

    #[test]
    fn test_category_rates_flow_through() {
        for (category, rate) in [
            (CabCategory::Mini, 10),
            (CabCategory::Sedan, 12),
            (CabCategory::Suv, 16),
            (CabCategory::Luxury, 25),
        ] {
            let cab = CabProfile::of_category("cab", category);
            let fare = calculate_fare_by_distance(10, &cab, TripType::OneWay);
            assert_eq!(fare.base_price.rupees(), rate * 10);
        }
    }

    #[test]
    fn test_zero_distance_is_all_zero() {
        let fare = calculate_fare_by_distance(0, &sedan(), TripType::RoundTrip);
        assert!(fare.all_inclusive_price.is_zero());
        assert_eq!(fare.estimated_hours, 0);
        assert_eq!(fare.included_km, 0);
    }

    #[test]
    fn test_fixed_route_collapses_to_flat_price() {
        let cab = sedan().with_fixed_price(Money::from_rupees(2500));
        let fare = calculate_fare_by_distance(220, &cab, TripType::OneWay);

        assert!(fare.is_fixed_route);
        assert_eq!(fare.base_price.rupees(), 2500);
        assert_eq!(fare.discounted_price.rupees(), 2500);
        assert_eq!(fare.best_price.rupees(), 2500);
        assert_eq!(fare.all_inclusive_price.rupees(), 2500);
        assert!(fare.total_taxes().is_zero());
        assert_eq!(fare.included_km, 220);
    }

    #[test]
    fn test_fixed_route_round_trip_uses_multiplier() {
        let cab = sedan().with_fixed_price(Money::from_rupees(2500));
        let fare = calculate_fare_by_distance(220, &cab, TripType::RoundTrip);
        assert_eq!(fare.base_price.rupees(), 4500);
        assert_eq!(fare.all_inclusive_price.rupees(), 4500);
    }

    #[test]
    fn test_fixed_flag_without_price_is_priced_normally() {
        let mut cab = sedan();
        cab.is_fixed_route = true;
        let fare = calculate_fare_by_distance(100, &cab, TripType::OneWay);
        assert!(!fare.is_fixed_route);
        assert_eq!(fare.all_inclusive_price.rupees(), 1155);
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = FareSchedule {
            gst_bps: Rate::from_bps(1200),
            ..FareSchedule::default()
        };
        let fare = FareCalculator::new(schedule).breakdown(100, &sedan(), TripType::OneWay);
        // 12% of ₹1020 = ₹122.40
        assert_eq!(fare.gst_amount.rupees(), 122);
    }

    #[test]
    fn test_tiered_fare_within_included_km() {
        let cab = sedan().with_tiered_rates(Money::from_rupees(11), 300, Money::from_rupees(13));
        assert_eq!(calculate_tiered_fare(&cab, 250).rupees(), 2750);
        assert_eq!(calculate_tiered_fare(&cab, 300).rupees(), 3300);
    }

    #[test]
    fn test_tiered_fare_beyond_included_km() {
        let cab = sedan().with_tiered_rates(Money::from_rupees(11), 300, Money::from_rupees(13));
        assert_eq!(calculate_tiered_fare(&cab, 350).rupees(), 3300 + 650);
    }

    #[test]
    fn test_tiered_fare_rounds_to_rupee() {
        let cab = sedan().with_tiered_rates(Money::from_paise(1250), 100, Money::zero());
        // 3 km × ₹12.50 = ₹37.50 → ₹38
        assert_eq!(calculate_tiered_fare(&cab, 3), Money::from_rupees(38));
    }

    #[test]
    fn test_tiered_fare_huge_rates_saturate() {
        let cab: CabProfile =
            serde_json::from_str(r#"{"baseKmPrice":9223372036854775807,"includedKm":100,"extraFarePerKm":9e18}"#)
                .unwrap();
        let fare = calculate_tiered_fare(&cab, 200);
        assert!(fare.is_positive());
        assert_eq!(fare.paise_part(), 0);
    }

    #[test]
    fn test_huge_fixed_price_round_trip_saturates() {
        let cab = sedan().with_fixed_price(Money::from_rupees(i64::MAX));
        let fare = calculate_fare_by_distance(u32::MAX, &cab, TripType::RoundTrip);
        assert!(fare.all_inclusive_price.is_positive());
        assert_eq!(fare.all_inclusive_price.paise_part(), 0);
        assert_eq!(fare.included_km, u32::MAX);
    }

    #[test]
    fn test_huge_distance_does_not_panic() {
        let fare = calculate_fare_by_distance(u32::MAX, &sedan(), TripType::RoundTrip);
        assert!(fare.all_inclusive_price.is_positive());
    }

    #[test]
    fn test_tiered_fare_missing_fields_is_zero() {
        let cab: CabProfile = serde_json::from_str(r#"{"baseKmPrice": null}"#).unwrap();
        assert!(calculate_tiered_fare(&cab, 120).is_zero());
    }

    #[test]
    fn test_tiered_fare_ignores_category() {
        let luxury = CabProfile::of_category("S-Class", CabCategory::Luxury)
            .with_tiered_rates(Money::from_rupees(10), 0, Money::from_rupees(10));
        assert_eq!(calculate_tiered_fare(&luxury, 100).rupees(), 1000);
    }

    #[test]
    fn test_taxes_and_total() {
        let base = Money::from_rupees(1000);
        assert_eq!(calculate_taxes_and_fees(base, DEFAULT_TAX_RATE).rupees(), 50);
        assert_eq!(calculate_total_amount(base, DEFAULT_TAX_RATE).rupees(), 1050);
        assert_eq!(calculate_total_amount(base, Rate::from_bps(1800)).rupees(), 1180);
        assert_eq!(calculate_total_amount(base, Rate::zero()), base);
    }

    #[test]
    fn test_total_rounds_to_rupee() {
        // ₹1250.50 + ₹63 = ₹1313.50 → ₹1314
        let total = calculate_total_amount(Money::from_paise(125_050), DEFAULT_TAX_RATE);
        assert_eq!(total, Money::from_rupees(1314));
        assert_eq!(calculate_total_amount(Money::from_paise(i64::MAX), DEFAULT_TAX_RATE).paise_part(), 0);
    }

    #[test]
    fn test_quote_resolves_route() {
        let quote = FareCalculator::default().quote("Rajkot", "Ahmedabad", &sedan(), TripType::OneWay);
        assert_eq!(quote.distance.km, 220);
        assert_eq!(quote.distance.source, DistanceSource::FixedRoute);
        assert_eq!(quote.breakdown.base_price.rupees(), 2640);
        assert_eq!(quote.cab_name, "Dzire");
        assert_eq!(quote.route, CityPair::new("Rajkot", "Ahmedabad"));
    }

    #[test]
    fn test_quote_uses_schedule_fallback() {
        let schedule = FareSchedule {
            fallback_distance_km: 100,
            ..FareSchedule::default()
        };
        let quote = FareCalculator::new(schedule).quote("Atlantis", "Rajkot", &sedan(), TripType::OneWay);
        assert_eq!(quote.distance.km, 100);
        assert!(quote.distance.is_guess());
        assert_eq!(quote.breakdown.all_inclusive_price.rupees(), 1155);
    }

    #[test]
    fn test_catalog_sorted_cheapest_first() {
        let cabs = vec![
            CabProfile::of_category("S-Class", CabCategory::Luxury),
            CabProfile::of_category("Alto", CabCategory::Mini),
            CabProfile::of_category("Ertiga", CabCategory::Suv),
            sedan().with_fixed_price(Money::from_rupees(1)),
        ];
        let quotes = FareCalculator::default().quote_catalog("Mumbai", "Pune", &cabs, TripType::OneWay);

        let names: Vec<&str> = quotes.iter().map(|q| q.cab_name.as_str()).collect();
        assert_eq!(names, ["Dzire", "Alto", "Ertiga", "S-Class"]);
        assert!(quotes.iter().all(|q| q.distance.km == 150));
    }

    #[test]
    fn test_catalog_empty() {
        let quotes = FareCalculator::default().quote_catalog("Mumbai", "Pune", &[], TripType::OneWay);
        assert!(quotes.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_agree() {
        let expected = calculate_fare_by_distance(345, &sedan(), TripType::RoundTrip);

        let handles: Vec<_> = (0..64)
            .map(|_| {
                tokio::spawn(async move {
                    let calculator = FareCalculator::default();
                    let quote = calculator.quote("Bangalore", "Chennai", &sedan(), TripType::RoundTrip);
                    quote.breakdown
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), expected);
        }
    }

    proptest! {
        #[test]
        fn prop_round_trip_is_scaled_one_way(d in 0u32..5_000, category in any_category()) {
            let cab = CabProfile::of_category("cab", category);
            let one_way = calculate_fare_by_distance(d, &cab, TripType::OneWay);
            let round_trip = calculate_fare_by_distance(d, &cab, TripType::RoundTrip);

            prop_assert_eq!(
                round_trip.base_price,
                one_way.base_price.scale_to_rupee(Rate::from_bps(18_000))
            );
            prop_assert_eq!(round_trip.included_km, one_way.included_km * 2);
        }

        #[test]
        fn prop_fixed_round_trip_is_scaled_one_way(d in 0u32..5_000, price in 0i64..100_000) {
            let cab = sedan().with_fixed_price(Money::from_rupees(price));
            let one_way = calculate_fare_by_distance(d, &cab, TripType::OneWay);
            let round_trip = calculate_fare_by_distance(d, &cab, TripType::RoundTrip);
            prop_assert_eq!(
                round_trip.base_price,
                one_way.base_price.scale_to_rupee(Rate::from_bps(18_000))
            );
        }

        #[test]
        fn prop_discount_bands(d in 0u32..5_000, category in any_category(), round in any::<bool>()) {
            let trip = if round { TripType::RoundTrip } else { TripType::OneWay };
            let fare = calculate_fare_by_distance(d, &CabProfile::of_category("cab", category), trip);

            prop_assert_eq!(fare.best_price, fare.base_price.scale_to_rupee(Rate::from_bps(8_500)));
            prop_assert_eq!(fare.discounted_price, fare.base_price.scale_to_rupee(Rate::from_bps(9_000)));
        }

        #[test]
        fn prop_all_inclusive_is_exact_sum(d in 0u32..5_000, category in any_category()) {
            let fare = calculate_fare_by_distance(d, &CabProfile::of_category("cab", category), TripType::OneWay);
            prop_assert_eq!(
                fare.all_inclusive_price,
                fare.tax_inclusive_price + fare.toll_tax_amount + fare.state_tax_amount
            );
            prop_assert_eq!(fare.tax_inclusive_price, fare.best_price + fare.gst_amount);
        }

        #[test]
        fn prop_money_fields_are_whole_rupees(
            d in 0u32..5_000,
            category in any_category(),
            base_paise in 0i64..100_000,
            included in 0u32..1_000,
            extra_paise in 0i64..100_000,
            sample_paise in -10_000_000i64..10_000_000,
            tax_bps in 0u32..=10_000,
        ) {
            let cab = CabProfile::of_category("cab", category).with_tiered_rates(
                Money::from_paise(base_paise),
                included,
                Money::from_paise(extra_paise),
            );
            let fare = calculate_fare_by_distance(d, &cab, TripType::RoundTrip);
            let sample = Money::from_paise(sample_paise);
            let rate = Rate::from_bps(tax_bps);
            for amount in [
                calculate_tiered_fare(&cab, d),
                calculate_taxes_and_fees(sample, rate),
                calculate_total_amount(sample, rate),
                fare.base_price,
                fare.discounted_price,
                fare.best_price,
                fare.gst_amount,
                fare.toll_tax_amount,
                fare.state_tax_amount,
                fare.all_inclusive_price,
            ] {
                prop_assert_eq!(amount.paise_part(), 0);
            }
        }

        #[test]
        fn prop_idempotent(d in 0u32..5_000, category in any_category(), included in 0u32..1_000) {
            let cab = CabProfile::of_category("cab", category)
                .with_tiered_rates(Money::from_rupees(9), included, Money::from_rupees(14));
            prop_assert_eq!(
                calculate_fare_by_distance(d, &cab, TripType::RoundTrip),
                calculate_fare_by_distance(d, &cab, TripType::RoundTrip)
            );
            prop_assert_eq!(calculate_tiered_fare(&cab, d), calculate_tiered_fare(&cab, d));
        }
    }
}
