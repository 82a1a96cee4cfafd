//! Free-interval computation for a room's day.
//!
//! Pure calendar math over already-fetched bookings: no storage access, no
//! retained state, recomputed fresh on every call.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::booking::Booking;
use crate::interval::TimeSlot;

/// Returns the accounting window of a calendar day.
///
/// The window runs from midnight to `23:59:59.999999`, matching the
/// behavior of the availability views this engine replaces.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use salle::availability::day_bounds;
///
/// let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// let (start, end) = day_bounds(day);
/// assert_eq!(start.to_string(), "2026-03-01 00:00:00");
/// assert!(end > start);
/// ```
#[must_use]
pub fn day_bounds(day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let end_of_day = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
        .unwrap_or(NaiveTime::MIN);
    (day.and_time(NaiveTime::MIN), day.and_time(end_of_day))
}

fn gap(start: NaiveDateTime, end: NaiveDateTime) -> Option<TimeSlot> {
    TimeSlot::from_naive(start, end).ok()
}

/// Computes the ordered free intervals of a room's day.
///
/// Only bookings lying entirely within the day participate; a booking that
/// crosses midnight is excluded from both days' accounting rather than
/// split. Participating bookings are sorted by start time with the booking
/// id as tie-break, then a single sweep from the start of the day emits the
/// gaps between them and the trailing gap to the end of the day.
///
/// The result is empty when the room is booked wall to wall, and contains
/// exactly the full day window when nothing is booked.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use salle::availability::free_intervals;
///
/// let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
/// let free = free_intervals(&[], day);
/// assert_eq!(free.len(), 1);
/// ```
#[must_use]
pub fn free_intervals(bookings: &[Booking], day: NaiveDate) -> Vec<TimeSlot> {
    let (day_start, day_end) = day_bounds(day);

    let mut todays: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.slot().within_day(day))
        .collect();
    todays.sort_by_key(|b| (b.slot().start(), b.id()));

    let mut free = Vec::new();
    let mut cursor = day_start;

    for booking in todays {
        let slot = booking.slot();
        if slot.start() > cursor {
            free.extend(gap(cursor, slot.start()));
        }
        cursor = cursor.max(slot.end());
    }

    if cursor < day_end {
        free.extend(gap(cursor, day_end));
    }

    free
}

#[cfg(test)]
mod proptests;
