//! Read-only queries: availability checks, free intervals, and listings.

use chrono::NaiveDate;

use crate::access::{BookingAction, Identity};
use crate::availability;
use crate::booking::{Booking, BookingId, RoomId};
use crate::error::{Error, Result};
use crate::interval::{TimeSlot, Timestamp};
use crate::store::{BookingStore, RoomCatalog};

use super::scheduler::Scheduler;

impl<S> Scheduler<'_, S>
where
    S: BookingStore + RoomCatalog,
{
    /// Tests whether a room is free over the given window.
    ///
    /// Past ranges are allowed; only the window ordering and the room's
    /// existence are validated. The answer is advisory — a later create
    /// still runs its own conflict check inside the commit transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] / [`Error::Malformed`] for a bad
    /// window and [`Error::RoomNotFound`] for an unknown room.
    pub fn slot_available(&self, room: RoomId, start: Timestamp, end: Timestamp) -> Result<bool> {
        let slot = TimeSlot::new(start, end)?;
        self.ensure_room_exists(room)?;
        Ok(!self.store.slot_taken(room, &slot, None)?)
    }

    /// Computes the ordered free intervals of a room's day.
    ///
    /// With a cache installed, a fresh cached answer is served directly;
    /// otherwise the result is computed from the room's bookings and
    /// cached. Writes to the room invalidate its entries, so a cached
    /// answer is never older than the last write plus the TTL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RoomNotFound`] for an unknown room.
    pub fn free_slots(&mut self, room: RoomId, day: NaiveDate) -> Result<Vec<TimeSlot>> {
        self.ensure_room_exists(room)?;

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.lookup(room, day) {
                log::debug!("availability cache hit for room {room} on {day}");
                return Ok(hit);
            }
        }

        let bookings = self.store.bookings_for_room(room)?;
        let free = availability::free_intervals(&bookings, day);

        if let Some(cache) = &mut self.cache {
            cache.store(room, day, free.clone());
        }

        Ok(free)
    }

    /// Fetches a single booking.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    pub fn booking(&self, id: BookingId) -> Result<Option<Booking>> {
        self.store.booking(id)
    }

    /// Lists the actor's own bookings, ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    pub fn bookings_for_requester(&self, actor: &Identity) -> Result<Vec<Booking>> {
        self.store.bookings_for_user(actor.user)
    }

    /// Lists every booking in the system, ordered by start time.
    ///
    /// Requires the `ViewAll` action from the policy gate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Forbidden`] when the gate denies the actor.
    pub fn all_bookings(&self, actor: &Identity) -> Result<Vec<Booking>> {
        if !self.policy.allows(actor, BookingAction::ViewAll) {
            return Err(Error::Forbidden {
                details: format!("role {} may not list all bookings", actor.role),
            });
        }
        self.store.all_bookings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{Role, RolePolicy};
    use crate::booking::UserId;
    use crate::cache::AvailabilityCache;
    use crate::database::test_util::{open_test_database, seed_room};
    use crate::notify::NoopNotifier;
    use crate::operations::{CreateBooking, UpdateBooking};
    use chrono::{Duration, NaiveDateTime, Utc};

    fn identity(user: i64, role: Role) -> Identity {
        Identity::new(UserId::try_from(user).unwrap(), role)
    }

    fn ts(value: NaiveDateTime) -> Timestamp {
        Timestamp::from_naive(value)
    }

    // Midnight ten days out, so windows derived from it stay inside one
    // future day
    fn future_day_start() -> NaiveDateTime {
        let day = (Utc::now().naive_utc() + Duration::days(10)).date();
        day.and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_slot_available_empty_room() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let scheduler = Scheduler::new(&mut db, &policy, &notifier);

        let base = future_day_start() + Duration::hours(10);
        assert!(scheduler
            .slot_available(room, ts(base), ts(base + Duration::hours(1)))
            .unwrap());
    }

    #[test]
    fn test_slot_available_sees_conflict() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let mut scheduler = Scheduler::new(&mut db, &policy, &notifier);

        let base = future_day_start() + Duration::hours(10);
        scheduler
            .create_booking(&CreateBooking::new(
                identity(1, Role::Regular),
                room,
                ts(base),
                ts(base + Duration::hours(1)),
            ))
            .unwrap();

        assert!(!scheduler
            .slot_available(
                room,
                ts(base + Duration::minutes(30)),
                ts(base + Duration::minutes(45))
            )
            .unwrap());
        // Touching window is free
        assert!(scheduler
            .slot_available(
                room,
                ts(base + Duration::hours(1)),
                ts(base + Duration::hours(2))
            )
            .unwrap());
    }

    #[test]
    fn test_slot_available_allows_past_ranges() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let scheduler = Scheduler::new(&mut db, &policy, &notifier);

        let past = Utc::now().naive_utc() - Duration::days(30);
        assert!(scheduler
            .slot_available(room, ts(past), ts(past + Duration::hours(1)))
            .unwrap());
    }

    #[test]
    fn test_slot_available_validates_ordering_and_room() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let scheduler = Scheduler::new(&mut db, &policy, &notifier);

        let base = future_day_start();
        let err = scheduler
            .slot_available(room, ts(base + Duration::hours(1)), ts(base))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInterval { .. }));

        let err = scheduler
            .slot_available(
                RoomId::try_from(999).unwrap(),
                ts(base),
                ts(base + Duration::hours(1)),
            )
            .unwrap_err();
        assert!(matches!(err, Error::RoomNotFound { .. }));
    }

    #[test]
    fn test_free_slots_empty_room_is_whole_day() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let mut scheduler = Scheduler::new(&mut db, &policy, &notifier);

        let day = future_day_start().date();
        let free = scheduler.free_slots(room, day).unwrap();
        assert_eq!(free.len(), 1);

        let (day_start, day_end) = availability::day_bounds(day);
        assert_eq!(free[0].start(), day_start);
        assert_eq!(free[0].end(), day_end);
    }

    #[test]
    fn test_free_slots_reflect_bookings() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let mut scheduler = Scheduler::new(&mut db, &policy, &notifier);

        let start = future_day_start() + Duration::hours(10);
        scheduler
            .create_booking(&CreateBooking::new(
                identity(1, Role::Regular),
                room,
                ts(start),
                ts(start + Duration::hours(1)),
            ))
            .unwrap();

        let free = scheduler.free_slots(room, start.date()).unwrap();
        assert_eq!(free.len(), 2);
        assert_eq!(free[0].end(), start);
        assert_eq!(free[1].start(), start + Duration::hours(1));
    }

    #[test]
    fn test_free_slots_twice_are_identical() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let mut scheduler = Scheduler::new(&mut db, &policy, &notifier);

        let day = future_day_start().date();
        let first = scheduler.free_slots(room, day).unwrap();
        let second = scheduler.free_slots(room, day).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cached_free_slots_invalidate_on_write() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let mut scheduler = Scheduler::new(&mut db, &policy, &notifier)
            .with_cache(AvailabilityCache::new(std::time::Duration::from_secs(60)));

        let day = future_day_start().date();
        let before = scheduler.free_slots(room, day).unwrap();
        assert_eq!(before.len(), 1);

        // A write lands; the cached whole-day answer must not survive it
        let start = future_day_start() + Duration::hours(10);
        scheduler
            .create_booking(&CreateBooking::new(
                identity(1, Role::Regular),
                room,
                ts(start),
                ts(start + Duration::hours(1)),
            ))
            .unwrap();

        let after = scheduler.free_slots(room, day).unwrap();
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn test_cache_invalidation_covers_both_rooms_of_a_move() {
        let mut db = open_test_database();
        let room_a = seed_room(&mut db, "A");
        let room_b = seed_room(&mut db, "B");
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let mut scheduler = Scheduler::new(&mut db, &policy, &notifier)
            .with_cache(AvailabilityCache::new(std::time::Duration::from_secs(60)));

        let start = future_day_start() + Duration::hours(10);
        let day = start.date();
        let booking = scheduler
            .create_booking(&CreateBooking::new(
                identity(1, Role::Regular),
                room_a,
                ts(start),
                ts(start + Duration::hours(1)),
            ))
            .unwrap();

        // Warm both rooms' cache entries
        assert_eq!(scheduler.free_slots(room_a, day).unwrap().len(), 2);
        assert_eq!(scheduler.free_slots(room_b, day).unwrap().len(), 1);

        // Move the booking from A to B
        scheduler
            .update_booking(
                &UpdateBooking::new(identity(1, Role::Regular), booking.id()).with_room(room_b),
            )
            .unwrap();

        assert_eq!(scheduler.free_slots(room_a, day).unwrap().len(), 1);
        assert_eq!(scheduler.free_slots(room_b, day).unwrap().len(), 2);
    }

    #[test]
    fn test_bookings_for_requester_lists_own_only() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let mut scheduler = Scheduler::new(&mut db, &policy, &notifier);

        let base = future_day_start() + Duration::hours(9);
        scheduler
            .create_booking(&CreateBooking::new(
                identity(1, Role::Regular),
                room,
                ts(base),
                ts(base + Duration::hours(1)),
            ))
            .unwrap();
        scheduler
            .create_booking(&CreateBooking::new(
                identity(2, Role::Regular),
                room,
                ts(base + Duration::hours(1)),
                ts(base + Duration::hours(2)),
            ))
            .unwrap();

        let mine = scheduler
            .bookings_for_requester(&identity(1, Role::Regular))
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].requester().value(), 1);
    }

    #[test]
    fn test_all_bookings_requires_view_all() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let mut scheduler = Scheduler::new(&mut db, &policy, &notifier);

        let base = future_day_start() + Duration::hours(9);
        scheduler
            .create_booking(&CreateBooking::new(
                identity(1, Role::Regular),
                room,
                ts(base),
                ts(base + Duration::hours(1)),
            ))
            .unwrap();

        let err = scheduler
            .all_bookings(&identity(1, Role::Regular))
            .unwrap_err();
        assert!(err.is_forbidden());

        let listed = scheduler
            .all_bookings(&identity(99, Role::Auditor))
            .unwrap();
        assert_eq!(listed.len(), 1);
    }
}
