//! Database read operations and the conflict predicate.
//!
//! This module implements row mapping, the ordered listing queries, the
//! overlap probe, and the room catalog queries. The conflict-checked write
//! paths live in the transaction module so the overlap test and the write
//! share one transaction.

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::booking::{Booking, BookingId, RoomId, UserId};
use crate::error::Result;
use crate::interval::TimeSlot;
use crate::store::RoomDetails;

use super::connection::Database;
use super::schema::DELETE_BOOKING;

/// Storage layout for timestamps: fixed-width ISO-8601 text with
/// microseconds, so lexicographic comparison in SQL equals chronological
/// comparison.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Formats a datetime for storage.
pub(super) fn format_datetime(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored datetime.
pub(super) fn parse_datetime(text: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Helper function to deserialize a booking from a database row.
///
/// Expects row fields in this order: `booking_id`, `room_id`, `user_id`,
/// `start_time`, `end_time`, `created_at`.
pub(super) fn row_to_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    let id: i64 = row.get(0)?;
    let room_value: i64 = row.get(1)?;
    let user_value: i64 = row.get(2)?;
    let start_text: String = row.get(3)?;
    let end_text: String = row.get(4)?;
    let created_text: String = row.get(5)?;

    let room = RoomId::try_from(room_value)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let user = UserId::try_from(user_value)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let slot = TimeSlot::from_naive(parse_datetime(&start_text)?, parse_datetime(&end_text)?)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Booking::new(
        BookingId::new(id),
        room,
        user,
        slot,
        parse_datetime(&created_text)?,
    ))
}

// SQL statements for read operations

const SELECT_BOOKING: &str = r"
    SELECT booking_id, room_id, user_id, start_time, end_time, created_at
    FROM bookings
    WHERE booking_id = ?
";

const LIST_FOR_ROOM: &str = r"
    SELECT booking_id, room_id, user_id, start_time, end_time, created_at
    FROM bookings
    WHERE room_id = ?
    ORDER BY start_time, booking_id
";

const LIST_FOR_USER: &str = r"
    SELECT booking_id, room_id, user_id, start_time, end_time, created_at
    FROM bookings
    WHERE user_id = ?
    ORDER BY start_time, booking_id
";

const LIST_ALL: &str = r"
    SELECT booking_id, room_id, user_id, start_time, end_time, created_at
    FROM bookings
    ORDER BY start_time, booking_id
";

// Half-open overlap: NOT (existing.end <= candidate.start OR
// existing.start >= candidate.end). Boundary touch is not a conflict.
const CONFLICT_EXISTS: &str = r"
    SELECT 1
    FROM bookings
    WHERE room_id = ?
      AND NOT (end_time <= ? OR start_time >= ?)
    LIMIT 1
";

const CONFLICT_EXISTS_EXCLUDING: &str = r"
    SELECT 1
    FROM bookings
    WHERE room_id = ?
      AND booking_id <> ?
      AND NOT (end_time <= ? OR start_time >= ?)
    LIMIT 1
";

const ROOM_EXISTS: &str = "SELECT 1 FROM rooms WHERE room_id = ?";

const SELECT_ROOM: &str = "SELECT name, location FROM rooms WHERE room_id = ?";

const INSERT_ROOM: &str = "INSERT INTO rooms (name, location) VALUES (?, ?)";

impl Database {
    /// Retrieves a booking by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(booking))` if the booking exists
    /// - `Ok(None)` if the booking doesn't exist
    /// - `Err(_)` if a database error occurs
    pub fn get_booking(conn: &Connection, id: BookingId) -> Result<Option<Booking>> {
        let mut stmt = conn.prepare(SELECT_BOOKING)?;
        let booking = stmt
            .query_row(params![id.value()], row_to_booking)
            .optional()?;
        Ok(booking)
    }

    /// Lists a room's bookings ordered by start time, then booking id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be deserialized.
    pub fn list_room_bookings(conn: &Connection, room: RoomId) -> Result<Vec<Booking>> {
        let mut stmt = conn.prepare(LIST_FOR_ROOM)?;
        let bookings = stmt
            .query_map(params![room.value()], row_to_booking)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(bookings)
    }

    /// Lists a user's bookings ordered by start time, then booking id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be deserialized.
    pub fn list_user_bookings(conn: &Connection, user: UserId) -> Result<Vec<Booking>> {
        let mut stmt = conn.prepare(LIST_FOR_USER)?;
        let bookings = stmt
            .query_map(params![user.value()], row_to_booking)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(bookings)
    }

    /// Lists every booking ordered by start time, then booking id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be deserialized.
    pub fn list_all_bookings(conn: &Connection) -> Result<Vec<Booking>> {
        let mut stmt = conn.prepare(LIST_ALL)?;
        let bookings = stmt
            .query_map([], row_to_booking)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(bookings)
    }

    /// Tests whether any booking for the room overlaps the candidate slot.
    ///
    /// With `exclude` set, that booking is ignored, which lets an update
    /// validate against every booking except its own prior state. The
    /// probe stops at the first match; callers only get the boolean.
    ///
    /// This function is also called inside the write transactions in the
    /// transaction module, where it shares the transaction's snapshot and
    /// write lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn conflict_exists(
        conn: &Connection,
        room: RoomId,
        slot: &TimeSlot,
        exclude: Option<BookingId>,
    ) -> Result<bool> {
        let start = format_datetime(slot.start());
        let end = format_datetime(slot.end());

        let found = match exclude {
            None => conn
                .prepare(CONFLICT_EXISTS)?
                .query_row(params![room.value(), start, end], |_| Ok(()))
                .optional()?,
            Some(id) => conn
                .prepare(CONFLICT_EXISTS_EXCLUDING)?
                .query_row(params![room.value(), id.value(), start, end], |_| Ok(()))
                .optional()?,
        };

        Ok(found.is_some())
    }

    /// Tests whether a room exists in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn catalog_room_exists(conn: &Connection, room: RoomId) -> Result<bool> {
        let found = conn
            .prepare(ROOM_EXISTS)?
            .query_row(params![room.value()], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    /// Returns a room's display details, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn catalog_room_details(conn: &Connection, room: RoomId) -> Result<Option<RoomDetails>> {
        let details = conn
            .prepare(SELECT_ROOM)?
            .query_row(params![room.value()], |row| {
                Ok(RoomDetails {
                    name: row.get(0)?,
                    location: row.get(1)?,
                })
            })
            .optional()?;
        Ok(details)
    }

    /// Adds a room to the catalog and returns its assigned id.
    ///
    /// Intended for seeding and tests; full room management belongs to the
    /// surrounding service.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or insert fails (including a
    /// duplicate room name).
    pub fn add_room(&mut self, name: &str, location: Option<&str>) -> Result<RoomId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(INSERT_ROOM, params![name, location])?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(RoomId::try_from(id)?)
    }

    /// Hard-deletes a booking from the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the booking was found and deleted
    /// - `Ok(false)` if the booking was not found
    pub fn remove_booking(&mut self, id: BookingId) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows_affected = tx.execute(DELETE_BOOKING, params![id.value()])?;

        tx.commit()?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_util::{open_test_database, sample_slot, seed_room};
    use super::*;
    use crate::store::BookingStore;

    #[test]
    fn test_get_booking_missing() {
        let db = open_test_database();
        let found = Database::get_booking(db.connection(), BookingId::new(1)).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_get_booking_roundtrip() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let user = UserId::try_from(8).unwrap();
        let slot = sample_slot("2026-03-01T10:00:00", "2026-03-01T11:00:00");

        let committed = db.commit_booking(room, user, &slot).unwrap();
        let loaded = Database::get_booking(db.connection(), committed.id())
            .unwrap()
            .unwrap();

        assert_eq!(loaded, committed);
        assert_eq!(loaded.slot(), slot);
    }

    #[test]
    fn test_listings_are_ordered_by_start_then_id() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let user = UserId::try_from(8).unwrap();

        let late = sample_slot("2026-03-01T15:00:00", "2026-03-01T16:00:00");
        let early = sample_slot("2026-03-01T09:00:00", "2026-03-01T10:00:00");

        let b_late = db.commit_booking(room, user, &late).unwrap();
        let b_early = db.commit_booking(room, user, &early).unwrap();

        let listed = Database::list_room_bookings(db.connection(), room).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id(), b_early.id());
        assert_eq!(listed[1].id(), b_late.id());
    }

    #[test]
    fn test_bookings_for_user_filters_by_user() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let alice = UserId::try_from(1).unwrap();
        let bob = UserId::try_from(2).unwrap();

        db.commit_booking(room, alice, &sample_slot("2026-03-01T09:00:00", "2026-03-01T10:00:00"))
            .unwrap();
        db.commit_booking(room, bob, &sample_slot("2026-03-01T10:00:00", "2026-03-01T11:00:00"))
            .unwrap();

        let mine = Database::list_user_bookings(db.connection(), alice).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].requester(), alice);
    }

    #[test]
    fn test_conflict_exists_detects_overlap() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let user = UserId::try_from(8).unwrap();
        db.commit_booking(room, user, &sample_slot("2026-03-01T14:00:00", "2026-03-01T15:00:00"))
            .unwrap();

        let inside = sample_slot("2026-03-01T14:30:00", "2026-03-01T14:45:00");
        assert!(Database::conflict_exists(db.connection(), room, &inside, None).unwrap());

        let touching = sample_slot("2026-03-01T15:00:00", "2026-03-01T16:00:00");
        assert!(!Database::conflict_exists(db.connection(), room, &touching, None).unwrap());
    }

    #[test]
    fn test_conflict_exists_scopes_by_room() {
        let mut db = open_test_database();
        let room_a = seed_room(&mut db, "A");
        let room_b = seed_room(&mut db, "B");
        let user = UserId::try_from(8).unwrap();
        let slot = sample_slot("2026-03-01T14:00:00", "2026-03-01T15:00:00");

        db.commit_booking(room_a, user, &slot).unwrap();
        assert!(!Database::conflict_exists(db.connection(), room_b, &slot, None).unwrap());
    }

    #[test]
    fn test_conflict_exists_honors_exclusion() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let user = UserId::try_from(8).unwrap();
        let slot = sample_slot("2026-03-01T14:00:00", "2026-03-01T15:00:00");
        let committed = db.commit_booking(room, user, &slot).unwrap();

        // The booking conflicts with itself unless excluded
        assert!(Database::conflict_exists(db.connection(), room, &slot, None).unwrap());
        assert!(
            !Database::conflict_exists(db.connection(), room, &slot, Some(committed.id()))
                .unwrap()
        );
    }

    #[test]
    fn test_room_catalog_queries() {
        let mut db = open_test_database();
        let room = db.add_room("Boardroom", Some("4th floor")).unwrap();

        assert!(Database::catalog_room_exists(db.connection(), room).unwrap());
        assert!(!Database::catalog_room_exists(
            db.connection(),
            RoomId::try_from(999).unwrap()
        )
        .unwrap());

        let details = Database::catalog_room_details(db.connection(), room)
            .unwrap()
            .unwrap();
        assert_eq!(details.name, "Boardroom");
        assert_eq!(details.location.as_deref(), Some("4th floor"));
    }

    #[test]
    fn test_add_room_rejects_duplicate_name() {
        let mut db = open_test_database();
        db.add_room("Boardroom", None).unwrap();
        assert!(db.add_room("Boardroom", None).is_err());
    }

    #[test]
    fn test_remove_booking() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let user = UserId::try_from(8).unwrap();
        let committed = db
            .commit_booking(room, user, &sample_slot("2026-03-01T10:00:00", "2026-03-01T11:00:00"))
            .unwrap();

        assert!(db.remove_booking(committed.id()).unwrap());
        // Second delete finds nothing
        assert!(!db.remove_booking(committed.id()).unwrap());
    }

    #[test]
    fn test_timestamp_format_roundtrip() {
        let value: NaiveDateTime = "2026-03-01T10:00:00.250000".parse().unwrap();
        let text = format_datetime(value);
        assert_eq!(text, "2026-03-01T10:00:00.250000");
        assert_eq!(parse_datetime(&text).unwrap(), value);
    }
}
