//! Property-based tests for domain value objects and the price table
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{DomainError, Fare, PriceTable, Route, StopId};
use proptest::prelude::*;

fn stop_id() -> impl Strategy<Value = StopId> {
    "[A-Z][A-Z0-9]{0,7}".prop_map(|s| StopId::new(s).unwrap())
}

fn fare() -> impl Strategy<Value = Fare> {
    (0u32..100_000).prop_map(Fare::from_cents)
}

// ============================================================================
// Route Property Tests
// ============================================================================

mod route_tests {
    use super::*;

    proptest! {
        #[test]
        fn route_is_symmetric(a in stop_id(), b in stop_id()) {
            prop_assume!(a != b);
            let forward = Route::new(a.clone(), b.clone()).unwrap();
            let backward = Route::new(b, a).unwrap();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn route_endpoints_are_sorted(a in stop_id(), b in stop_id()) {
            prop_assume!(a != b);
            let route = Route::new(a, b).unwrap();
            let (low, high) = route.endpoints();
            prop_assert!(low < high);
        }

        #[test]
        fn identical_stops_never_form_a_route(a in stop_id()) {
            prop_assert!(Route::new(a.clone(), a).is_err());
        }
    }
}

// ============================================================================
// Fare Property Tests
// ============================================================================

mod fare_tests {
    use super::*;

    proptest! {
        #[test]
        fn fare_always_renders_two_decimals(cents in 0u32..10_000_000) {
            let rendered = Fare::from_cents(cents).to_string();
            let (_, decimals) = rendered.split_once('.').unwrap();
            prop_assert_eq!(decimals.len(), 2);
        }

        #[test]
        fn rendered_fare_parses_back(cents in 0u32..10_000_000) {
            let fare = Fare::from_cents(cents);
            let parsed: Fare = fare.to_string().parse().unwrap();
            prop_assert_eq!(parsed, fare);
        }

        #[test]
        fn negative_amounts_rejected(cents in 1i64..10_000_000) {
            let amount = rust_decimal::Decimal::new(-cents, 2);
            let result = Fare::new(amount);
            prop_assert!(matches!(result, Err(DomainError::InvalidFare(_))));
        }
    }
}

// ============================================================================
// Price Table Property Tests
// ============================================================================

mod price_table_tests {
    use super::*;

    proptest! {
        #[test]
        fn seeded_fare_is_found_in_both_directions(a in stop_id(), b in stop_id(), f in fare()) {
            prop_assume!(a != b);
            let table = PriceTable::from_entries([(Route::new(a.clone(), b.clone()).unwrap(), f)]).unwrap();

            prop_assert_eq!(table.fare_between(&a, &b).unwrap(), f);
            prop_assert_eq!(table.fare_between(&b, &a).unwrap(), f);
        }

        #[test]
        fn max_fare_is_the_maximum_touching_the_stop(
            hub in stop_id(),
            spokes in prop::collection::btree_map(stop_id(), fare(), 1..8),
        ) {
            let entries: Vec<(Route, Fare)> = spokes
                .iter()
                .filter(|(spoke, _)| **spoke != hub)
                .map(|(spoke, f)| (Route::new(hub.clone(), spoke.clone()).unwrap(), *f))
                .collect();
            prop_assume!(!entries.is_empty());
            let expected = entries.iter().map(|(_, f)| *f).max().unwrap();
            let table = PriceTable::from_entries(entries).unwrap();

            let (route, max) = table.max_fare_touching(&hub).unwrap();
            prop_assert_eq!(max, expected);
            prop_assert!(route.contains(&hub));
            prop_assert_ne!(route.other_end(&hub).unwrap(), &hub);
        }
    }
}
