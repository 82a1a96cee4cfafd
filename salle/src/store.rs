//! Storage boundary traits.
//!
//! The scheduler talks to durable storage only through [`BookingStore`] and
//! answers room-existence questions only through [`RoomCatalog`]. The SQLite
//! implementation in [`crate::database`] backs both; a deployment with a
//! separate rooms service supplies its own [`RoomCatalog`].

use chrono::NaiveDateTime;

use crate::booking::{Booking, BookingId, RoomId, UserId};
use crate::error::Result;
use crate::interval::TimeSlot;

/// Display information about a room, used to enrich notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetails {
    /// Human-readable room name.
    pub name: String,
    /// Optional location description.
    pub location: Option<String>,
}

/// The fields a reschedule may change.
///
/// `None` means "keep the stored value"; the store writes only the supplied
/// fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingPatch {
    /// New room, if the booking is moving.
    pub room: Option<RoomId>,
    /// New window start, normalized to UTC.
    pub start: Option<NaiveDateTime>,
    /// New window end, normalized to UTC.
    pub end: Option<NaiveDateTime>,
}

impl BookingPatch {
    /// Returns whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.room.is_none() && self.start.is_none() && self.end.is_none()
    }
}

/// Transactional storage for bookings.
///
/// The write operations carry the conflict check with them: the overlap
/// test and the row write happen inside one storage transaction, so two
/// racing writers for the same room cannot both observe a clear schedule.
pub trait BookingStore {
    /// Atomically checks for conflicts and inserts a new booking.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BookingConflict`] if the slot overlaps an
    /// active booking for the room, or [`crate::Error::Database`] on
    /// storage failure.
    fn commit_booking(
        &mut self,
        room: RoomId,
        requester: UserId,
        slot: &TimeSlot,
    ) -> Result<Booking>;

    /// Atomically re-checks conflicts (excluding the booking itself) and
    /// writes the supplied fields.
    ///
    /// Returns `Ok(None)` if the booking vanished before the write (a lost
    /// race with a cancellation).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BookingConflict`] if the effective window
    /// overlaps another active booking for the effective room, or
    /// [`crate::Error::Database`] on storage failure.
    fn reschedule_booking(
        &mut self,
        id: BookingId,
        patch: &BookingPatch,
        effective_room: RoomId,
        effective_slot: &TimeSlot,
    ) -> Result<Option<Booking>>;

    /// Hard-deletes a booking. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    fn delete_booking(&mut self, id: BookingId) -> Result<bool>;

    /// Fetches a booking by id.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    fn booking(&self, id: BookingId) -> Result<Option<Booking>>;

    /// Lists a room's bookings ordered by start time, then id.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    fn bookings_for_room(&self, room: RoomId) -> Result<Vec<Booking>>;

    /// Lists a user's bookings ordered by start time, then id.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    fn bookings_for_user(&self, user: UserId) -> Result<Vec<Booking>>;

    /// Lists every booking ordered by start time, then id.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    fn all_bookings(&self) -> Result<Vec<Booking>>;

    /// Read-only overlap probe for availability queries.
    ///
    /// Not a substitute for the transactional check inside
    /// [`BookingStore::commit_booking`]; callers use this only on read
    /// paths.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    fn slot_taken(
        &self,
        room: RoomId,
        slot: &TimeSlot,
        exclude: Option<BookingId>,
    ) -> Result<bool>;
}

/// Source of room-existence facts and display details.
pub trait RoomCatalog {
    /// Returns whether the room exists.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    fn room_exists(&self, room: RoomId) -> Result<bool>;

    /// Returns display details for a room, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    fn room_details(&self, room: RoomId) -> Result<Option<RoomDetails>>;
}
