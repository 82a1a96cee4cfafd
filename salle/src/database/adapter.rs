//! Store trait implementations for the SQLite database.
//!
//! The scheduler depends on the [`BookingStore`] and [`RoomCatalog`] traits;
//! this module wires them to the SQLite operations. The write methods carry
//! their conflict checks transactionally (see the transaction module).

use crate::booking::{Booking, BookingId, RoomId, UserId};
use crate::error::Result;
use crate::interval::TimeSlot;
use crate::store::{BookingPatch, BookingStore, RoomCatalog, RoomDetails};

use super::connection::Database;

impl BookingStore for Database {
    fn commit_booking(
        &mut self,
        room: RoomId,
        requester: UserId,
        slot: &TimeSlot,
    ) -> Result<Booking> {
        self.insert_booking_checked(room, requester, slot)
    }

    fn reschedule_booking(
        &mut self,
        id: BookingId,
        patch: &BookingPatch,
        effective_room: RoomId,
        effective_slot: &TimeSlot,
    ) -> Result<Option<Booking>> {
        self.update_booking_checked(id, patch, effective_room, effective_slot)
    }

    fn delete_booking(&mut self, id: BookingId) -> Result<bool> {
        self.remove_booking(id)
    }

    fn booking(&self, id: BookingId) -> Result<Option<Booking>> {
        Self::get_booking(self.connection(), id)
    }

    fn bookings_for_room(&self, room: RoomId) -> Result<Vec<Booking>> {
        Self::list_room_bookings(self.connection(), room)
    }

    fn bookings_for_user(&self, user: UserId) -> Result<Vec<Booking>> {
        Self::list_user_bookings(self.connection(), user)
    }

    fn all_bookings(&self) -> Result<Vec<Booking>> {
        Self::list_all_bookings(self.connection())
    }

    fn slot_taken(
        &self,
        room: RoomId,
        slot: &TimeSlot,
        exclude: Option<BookingId>,
    ) -> Result<bool> {
        Self::conflict_exists(self.connection(), room, slot, exclude)
    }
}

impl RoomCatalog for Database {
    fn room_exists(&self, room: RoomId) -> Result<bool> {
        Self::catalog_room_exists(self.connection(), room)
    }

    fn room_details(&self, room: RoomId) -> Result<Option<RoomDetails>> {
        Self::catalog_room_details(self.connection(), room)
    }
}
