//! Booking updates: reschedules and room moves.

use crate::access::Identity;
use crate::booking::{Booking, BookingId, RoomId};
use crate::error::{Error, Result};
use crate::interval::{TimeSlot, Timestamp};
use crate::store::{BookingPatch, BookingStore, RoomCatalog};

use super::scheduler::Scheduler;

/// A request to update an existing booking.
///
/// All fields except the target booking are optional; unspecified fields
/// keep their stored values and are not rewritten in storage.
///
/// # Examples
///
/// ```
/// use salle::operations::UpdateBooking;
/// use salle::{BookingId, Identity, Role, Timestamp, UserId};
///
/// let actor = Identity::new(UserId::try_from(8).unwrap(), Role::Regular);
/// let request = UpdateBooking::new(actor, BookingId::new(4))
///     .with_start(Timestamp::parse("2027-03-01T12:00:00").unwrap())
///     .with_end(Timestamp::parse("2027-03-01T13:00:00").unwrap());
/// assert!(request.room.is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UpdateBooking {
    /// The acting identity; must be the owner or pass the privilege gate.
    pub actor: Identity,
    /// The booking to update.
    pub booking: BookingId,
    /// New room, if the booking is moving.
    pub room: Option<RoomId>,
    /// New window start.
    pub start: Option<Timestamp>,
    /// New window end.
    pub end: Option<Timestamp>,
}

impl UpdateBooking {
    /// Creates an update request changing nothing yet.
    #[must_use]
    pub const fn new(actor: Identity, booking: BookingId) -> Self {
        Self {
            actor,
            booking,
            room: None,
            start: None,
            end: None,
        }
    }

    /// Sets the target room.
    #[must_use]
    pub const fn with_room(mut self, room: RoomId) -> Self {
        self.room = Some(room);
        self
    }

    /// Sets the new window start.
    #[must_use]
    pub const fn with_start(mut self, start: Timestamp) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the new window end.
    #[must_use]
    pub const fn with_end(mut self, end: Timestamp) -> Self {
        self.end = Some(end);
        self
    }
}

impl<S> Scheduler<'_, S>
where
    S: BookingStore + RoomCatalog,
{
    /// Updates a booking's room and/or time window.
    ///
    /// The effective room and window are the supplied fields merged over
    /// the stored values, and the whole create-path validation runs against
    /// them: window ordering, strictly-future start, room existence (only
    /// when the room actually changes), and the conflict check excluding
    /// this booking's own row. Only the supplied fields are written.
    ///
    /// A reschedule notification naming the actor is sent best-effort after
    /// the commit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BookingNotFound`] for an unknown booking id (or one
    /// cancelled concurrently), [`Error::Forbidden`] when the actor is
    /// neither owner nor privileged, and the create-path errors
    /// ([`Error::InvalidInterval`], [`Error::Malformed`],
    /// [`Error::PastStart`], [`Error::RoomNotFound`],
    /// [`Error::BookingConflict`]) for the re-validation.
    pub fn update_booking(&mut self, request: &UpdateBooking) -> Result<Booking> {
        let existing = self
            .store
            .booking(request.booking)?
            .ok_or(Error::BookingNotFound {
                booking: request.booking,
            })?;

        self.authorize_manage(
            &request.actor,
            existing.requester(),
            "update",
            request.booking,
        )?;

        let effective_slot = match (request.start, request.end) {
            (Some(start), Some(end)) => TimeSlot::new(start, end)?,
            (Some(start), None) => TimeSlot::from_naive(start.naive_utc(), existing.slot().end())?,
            (None, Some(end)) => TimeSlot::from_naive(existing.slot().start(), end.naive_utc())?,
            (None, None) => existing.slot(),
        };
        Self::ensure_future_start(&effective_slot)?;

        let effective_room = request.room.unwrap_or(existing.room());
        if request.room.is_some() {
            self.ensure_room_exists(effective_room)?;
        }

        let patch = BookingPatch {
            room: request.room,
            start: request.start.map(|t| t.naive_utc()),
            end: request.end.map(|t| t.naive_utc()),
        };

        let updated = self
            .store
            .reschedule_booking(request.booking, &patch, effective_room, &effective_slot)?
            .ok_or(Error::BookingNotFound {
                booking: request.booking,
            })?;

        self.invalidate_cache(existing.room());
        if effective_room != existing.room() {
            self.invalidate_cache(effective_room);
        }

        let details = self.room_details_for_notice(updated.room());
        if let Err(err) = self
            .notifier
            .booking_rescheduled(&updated, &request.actor, &details)
        {
            self.logger.warn(&format!(
                "reschedule notice for booking {} failed: {err}",
                updated.id()
            ));
        }

        Ok(updated)
    }
}
