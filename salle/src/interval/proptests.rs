//! Property-based tests for `Timestamp` and `TimeSlot`.

use super::TimeSlot;
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

// Strategy for generating datetimes within a few days of a fixed base,
// at minute granularity so boundary collisions actually happen.
fn datetime_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..(4 * 24 * 60)).prop_map(|minutes| {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + chrono::Duration::minutes(minutes)
    })
}

// Strategy for generating valid (non-degenerate) slots.
fn slot_strategy() -> impl Strategy<Value = TimeSlot> {
    (datetime_strategy(), 1i64..600).prop_map(|(start, minutes)| {
        TimeSlot::from_naive(start, start + chrono::Duration::minutes(minutes)).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Overlap is symmetric
    #[test]
    fn overlap_is_symmetric(a in slot_strategy(), b in slot_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    // Every slot overlaps itself (slots are non-empty by construction)
    #[test]
    fn slot_overlaps_itself(a in slot_strategy()) {
        prop_assert!(a.overlaps(&a));
    }

    // Slots that merely share a boundary never overlap
    #[test]
    fn touching_slots_never_overlap(start in datetime_strategy(), left in 1i64..300, right in 1i64..300) {
        let a = TimeSlot::from_naive(start - chrono::Duration::minutes(left), start).unwrap();
        let b = TimeSlot::from_naive(start, start + chrono::Duration::minutes(right)).unwrap();
        prop_assert!(!a.overlaps(&b));
        prop_assert!(!b.overlaps(&a));
    }

    // The overlap predicate agrees with the definitional form
    #[test]
    fn overlap_matches_definition(a in slot_strategy(), b in slot_strategy()) {
        let expected = a.start() < b.end() && b.start() < a.end();
        prop_assert_eq!(a.overlaps(&b), expected);
    }

    // Construction rejects exactly the degenerate orderings
    #[test]
    fn construction_requires_strict_ordering(a in datetime_strategy(), b in datetime_strategy()) {
        let result = TimeSlot::from_naive(a, b);
        if a < b {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }
}
