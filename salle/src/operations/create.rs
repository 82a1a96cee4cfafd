//! Booking creation.

use crate::access::{BookingAction, Identity};
use crate::booking::{Booking, RoomId};
use crate::error::{Error, Result};
use crate::interval::{TimeSlot, Timestamp};
use crate::store::{BookingStore, RoomCatalog};

use super::scheduler::Scheduler;

/// A request to create a booking.
///
/// The requester is the acting identity; bookings are always created on
/// one's own behalf.
///
/// # Examples
///
/// ```
/// use salle::operations::CreateBooking;
/// use salle::{Identity, Role, RoomId, Timestamp, UserId};
///
/// let actor = Identity::new(UserId::try_from(8).unwrap(), Role::Regular);
/// let request = CreateBooking::new(
///     actor,
///     RoomId::try_from(3).unwrap(),
///     Timestamp::parse("2027-03-01T10:00:00").unwrap(),
///     Timestamp::parse("2027-03-01T11:00:00").unwrap(),
/// );
/// assert_eq!(request.room.value(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CreateBooking {
    /// The acting identity; becomes the booking's requester.
    pub actor: Identity,
    /// The room to reserve.
    pub room: RoomId,
    /// Requested window start.
    pub start: Timestamp,
    /// Requested window end.
    pub end: Timestamp,
}

impl CreateBooking {
    /// Creates a request with the given actor, room, and window.
    #[must_use]
    pub const fn new(actor: Identity, room: RoomId, start: Timestamp, end: Timestamp) -> Self {
        Self {
            actor,
            room,
            start,
            end,
        }
    }
}

impl<S> Scheduler<'_, S>
where
    S: BookingStore + RoomCatalog,
{
    /// Creates a booking.
    ///
    /// Validation order: policy gate, window ordering, strictly-future
    /// start, room existence, then the conflict-checked commit. Nothing is
    /// written unless every step passes; the conflict check itself runs
    /// inside the commit transaction.
    ///
    /// A confirmation notification is sent best-effort after the commit;
    /// its failure is logged and never affects the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Forbidden`] when the gate denies the actor,
    /// [`Error::InvalidInterval`] / [`Error::Malformed`] for a bad window,
    /// [`Error::PastStart`] for a window that does not start in the future,
    /// [`Error::RoomNotFound`] for an unknown room, and
    /// [`Error::BookingConflict`] when the window overlaps an existing
    /// booking.
    pub fn create_booking(&mut self, request: &CreateBooking) -> Result<Booking> {
        if !self.policy.allows(&request.actor, BookingAction::Create) {
            return Err(Error::Forbidden {
                details: format!(
                    "role {} may not create bookings",
                    request.actor.role
                ),
            });
        }

        let slot = TimeSlot::new(request.start, request.end)?;
        Self::ensure_future_start(&slot)?;
        self.ensure_room_exists(request.room)?;

        let booking = self
            .store
            .commit_booking(request.room, request.actor.user, &slot)?;
        self.invalidate_cache(request.room);

        let details = self.room_details_for_notice(request.room);
        if let Err(err) = self.notifier.booking_confirmed(&booking, &details) {
            self.logger.warn(&format!(
                "confirmation notice for booking {} failed: {err}",
                booking.id()
            ));
        }

        Ok(booking)
    }
}
