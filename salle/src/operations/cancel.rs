//! Booking cancellation.

use crate::access::Identity;
use crate::booking::BookingId;
use crate::error::{Error, Result};
use crate::store::{BookingStore, RoomCatalog};

use super::scheduler::Scheduler;

impl<S> Scheduler<'_, S>
where
    S: BookingStore + RoomCatalog,
{
    /// Cancels a booking by hard-deleting its row.
    ///
    /// Only the owner or a privileged actor may cancel. If the delete
    /// affects no row because the booking vanished between the fetch and
    /// the delete, the lost race is reported as [`Error::BookingNotFound`].
    ///
    /// A cancellation notification for the original requester is sent
    /// best-effort afterwards, built from the row as it was before the
    /// delete.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BookingNotFound`] for an unknown or concurrently
    /// deleted booking and [`Error::Forbidden`] when the actor is neither
    /// owner nor privileged.
    pub fn cancel_booking(&mut self, actor: &Identity, id: BookingId) -> Result<()> {
        let existing = self
            .store
            .booking(id)?
            .ok_or(Error::BookingNotFound { booking: id })?;

        self.authorize_manage(actor, existing.requester(), "cancel", id)?;

        // Resolve display details before the row disappears
        let details = self.room_details_for_notice(existing.room());

        if !self.store.delete_booking(id)? {
            return Err(Error::BookingNotFound { booking: id });
        }
        self.invalidate_cache(existing.room());

        if let Err(err) = self.notifier.booking_cancelled(&existing, &details) {
            self.logger
                .warn(&format!("cancellation notice for booking {id} failed: {err}"));
        }

        Ok(())
    }
}
