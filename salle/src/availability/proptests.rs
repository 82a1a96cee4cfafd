//! Property-based tests for the free-interval sweep.

use super::{day_bounds, free_intervals};
use crate::booking::{Booking, BookingId, RoomId, UserId};
use crate::interval::TimeSlot;
use chrono::NaiveDate;
use proptest::prelude::*;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

// Strategy for a set of bookings inside one day (possibly overlapping each
// other, which the sweep must tolerate).
fn bookings_strategy() -> impl Strategy<Value = Vec<Booking>> {
    prop::collection::vec((0i64..1320, 1i64..=60), 0..12).prop_map(|windows| {
        let day_start = day_bounds(day()).0;
        windows
            .into_iter()
            .enumerate()
            .map(|(index, (offset, minutes))| {
                let start = day_start + chrono::Duration::minutes(offset);
                let end = start + chrono::Duration::minutes(minutes);
                Booking::new(
                    BookingId::new(i64::try_from(index).unwrap() + 1),
                    RoomId::try_from(1).unwrap(),
                    UserId::try_from(1).unwrap(),
                    TimeSlot::from_naive(start, end).unwrap(),
                    day_start,
                )
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // The computation holds no hidden state
    #[test]
    fn recomputation_is_idempotent(bookings in bookings_strategy()) {
        prop_assert_eq!(
            free_intervals(&bookings, day()),
            free_intervals(&bookings, day())
        );
    }

    // Free intervals are strictly ordered and pairwise disjoint
    #[test]
    fn free_intervals_are_ordered_and_disjoint(bookings in bookings_strategy()) {
        let free = free_intervals(&bookings, day());
        for pair in free.windows(2) {
            prop_assert!(pair[0].end() <= pair[1].start());
            prop_assert!(!pair[0].overlaps(&pair[1]));
        }
    }

    // No free interval overlaps any booking that participated in the sweep
    #[test]
    fn free_intervals_avoid_all_bookings(bookings in bookings_strategy()) {
        let free = free_intervals(&bookings, day());
        for slot in &free {
            for booking in &bookings {
                prop_assert!(!slot.overlaps(&booking.slot()));
            }
        }
    }

    // Everything emitted stays inside the day window
    #[test]
    fn free_intervals_stay_inside_the_day(bookings in bookings_strategy()) {
        let (day_start, day_end) = day_bounds(day());
        for slot in free_intervals(&bookings, day()) {
            prop_assert!(slot.start() >= day_start);
            prop_assert!(slot.end() <= day_end);
        }
    }

    // Input order never changes the result
    #[test]
    fn input_order_is_irrelevant(bookings in bookings_strategy()) {
        let mut reversed = bookings.clone();
        reversed.reverse();
        prop_assert_eq!(
            free_intervals(&bookings, day()),
            free_intervals(&reversed, day())
        );
    }
}
