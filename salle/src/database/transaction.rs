//! Conflict-checked write transactions.
//!
//! "Check for overlap, then write" is a check-then-act race unless both
//! steps share one transaction. The operations here open an IMMEDIATE
//! transaction, which takes `SQLite`'s write lock up front: a racing writer
//! blocks until the first transaction commits and then sees its rows, so at
//! most one of two overlapping writes can ever succeed.

use chrono::{NaiveDateTime, Timelike, Utc};
use rusqlite::{params, ToSql, TransactionBehavior};

use crate::booking::{Booking, BookingId, RoomId, UserId};
use crate::error::{Error, Result};
use crate::interval::TimeSlot;
use crate::store::BookingPatch;

use super::connection::Database;
use super::operations::format_datetime;
use super::schema::INSERT_BOOKING;

/// Returns the current UTC time truncated to microseconds, the precision
/// the storage layout keeps.
fn now_micros() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

impl Database {
    /// Atomically checks for conflicts and inserts a new booking.
    ///
    /// The overlap probe and the insert run inside one IMMEDIATE
    /// transaction. The assigned booking id and the server-side creation
    /// timestamp are returned on the committed booking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BookingConflict`] if the slot overlaps an existing
    /// booking for the room, or a database error if the transaction fails.
    /// On any error nothing is written.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use salle::database::{Database, DatabaseConfig};
    /// use salle::{TimeSlot, Timestamp, UserId};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/salle.db")).unwrap();
    /// let room = db.add_room("Boardroom", None).unwrap();
    /// let slot = TimeSlot::new(
    ///     Timestamp::parse("2026-03-01T10:00:00").unwrap(),
    ///     Timestamp::parse("2026-03-01T11:00:00").unwrap(),
    /// )
    /// .unwrap();
    ///
    /// let booking = db
    ///     .insert_booking_checked(room, UserId::try_from(8).unwrap(), &slot)
    ///     .unwrap();
    /// println!("booked as {}", booking.id());
    /// ```
    pub fn insert_booking_checked(
        &mut self,
        room: RoomId,
        requester: UserId,
        slot: &TimeSlot,
    ) -> Result<Booking> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if Self::conflict_exists(&tx, room, slot, None)? {
            return Err(Error::BookingConflict { room });
        }

        let created_at = now_micros();
        tx.execute(
            INSERT_BOOKING,
            params![
                room.value(),
                requester.value(),
                format_datetime(slot.start()),
                format_datetime(slot.end()),
                format_datetime(created_at),
            ],
        )?;
        let id = tx.last_insert_rowid();

        tx.commit()?;

        Ok(Booking::new(
            BookingId::new(id),
            room,
            requester,
            *slot,
            created_at,
        ))
    }

    /// Atomically re-checks conflicts and writes the supplied fields of a
    /// booking.
    ///
    /// The conflict probe runs against the *effective* room and window
    /// (supplied fields merged over stored values by the caller), excluding
    /// the booking's own row so a booking may be moved within or onto its
    /// prior window. Only the fields present in `patch` are written, in the
    /// same transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BookingConflict`] if the effective window overlaps
    /// another booking for the effective room, or a database error if the
    /// transaction fails. On any error nothing is written.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(booking))` with the row as committed
    /// - `Ok(None)` if the booking disappeared before the write
    pub fn update_booking_checked(
        &mut self,
        id: BookingId,
        patch: &BookingPatch,
        effective_room: RoomId,
        effective_slot: &TimeSlot,
    ) -> Result<Option<Booking>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if Self::conflict_exists(&tx, effective_room, effective_slot, Some(id))? {
            return Err(Error::BookingConflict {
                room: effective_room,
            });
        }

        if patch.is_empty() {
            // Nothing to write; report the stored row
            let existing = Self::get_booking(&tx, id)?;
            return Ok(existing);
        }

        let room_value = patch.room.map(|room| room.value());
        let start_text = patch.start.map(format_datetime);
        let end_text = patch.end.map(format_datetime);
        let id_value = id.value();

        let mut fields: Vec<&str> = Vec::new();
        let mut values: Vec<&dyn ToSql> = Vec::new();

        if let Some(ref value) = room_value {
            fields.push("room_id = ?");
            values.push(value);
        }
        if let Some(ref value) = start_text {
            fields.push("start_time = ?");
            values.push(value);
        }
        if let Some(ref value) = end_text {
            fields.push("end_time = ?");
            values.push(value);
        }
        values.push(&id_value);

        let sql = format!(
            "UPDATE bookings SET {} WHERE booking_id = ?",
            fields.join(", ")
        );
        let rows_affected = tx.execute(&sql, &values[..])?;
        if rows_affected == 0 {
            // Lost a race with a cancellation; nothing was written
            return Ok(None);
        }

        let updated = Self::get_booking(&tx, id)?;
        tx.commit()?;
        Ok(updated)
    }
}
