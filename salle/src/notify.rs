//! Notification seam for booking lifecycle events.
//!
//! Delivery (email, chat, webhooks) is an external collaborator. The
//! scheduler calls the [`Notifier`] after every successful commit and treats
//! failures as best-effort: they are logged and swallowed, never propagated
//! as booking failures, and never roll anything back.

use serde_json::json;
use thiserror::Error;

use crate::access::Identity;
use crate::booking::Booking;
use crate::store::RoomDetails;

/// Error type for notification delivery failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("notification failed: {message}")]
pub struct NotifyError {
    /// What went wrong during delivery.
    pub message: String,
}

/// Receiver of booking lifecycle events.
///
/// Implementations reconstruct message content from the committed booking
/// row plus the room display details resolved by the caller; the engine
/// itself renders nothing.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// A booking was created.
    fn booking_confirmed(
        &self,
        booking: &Booking,
        room: &Option<RoomDetails>,
    ) -> Result<(), NotifyError>;

    /// A booking was rescheduled or moved, by `actor`.
    fn booking_rescheduled(
        &self,
        booking: &Booking,
        actor: &Identity,
        room: &Option<RoomDetails>,
    ) -> Result<(), NotifyError>;

    /// A booking was cancelled; the original requester is the recipient.
    fn booking_cancelled(
        &self,
        booking: &Booking,
        room: &Option<RoomDetails>,
    ) -> Result<(), NotifyError>;
}

/// A notifier that emits structured payloads through the `log` crate.
///
/// Useful as a development default and as a template for real delivery
/// backends.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    fn payload(booking: &Booking, room: &Option<RoomDetails>) -> String {
        json!({
            "booking_id": booking.id().value(),
            "room_id": booking.room().value(),
            "room_name": room.as_ref().map(|r| r.name.clone()),
            "room_location": room.as_ref().and_then(|r| r.location.clone()),
            "requester_id": booking.requester().value(),
            "start_time": booking.slot().start().to_string(),
            "end_time": booking.slot().end().to_string(),
            "created_at": booking.created_at().to_string(),
        })
        .to_string()
    }
}

impl Notifier for LogNotifier {
    fn booking_confirmed(
        &self,
        booking: &Booking,
        room: &Option<RoomDetails>,
    ) -> Result<(), NotifyError> {
        log::info!("booking confirmed: {}", Self::payload(booking, room));
        Ok(())
    }

    fn booking_rescheduled(
        &self,
        booking: &Booking,
        actor: &Identity,
        room: &Option<RoomDetails>,
    ) -> Result<(), NotifyError> {
        log::info!(
            "booking rescheduled by user {}: {}",
            actor.user,
            Self::payload(booking, room)
        );
        Ok(())
    }

    fn booking_cancelled(
        &self,
        booking: &Booking,
        room: &Option<RoomDetails>,
    ) -> Result<(), NotifyError> {
        log::info!("booking cancelled: {}", Self::payload(booking, room));
        Ok(())
    }
}

/// A notifier that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn booking_confirmed(&self, _: &Booking, _: &Option<RoomDetails>) -> Result<(), NotifyError> {
        Ok(())
    }

    fn booking_rescheduled(
        &self,
        _: &Booking,
        _: &Identity,
        _: &Option<RoomDetails>,
    ) -> Result<(), NotifyError> {
        Ok(())
    }

    fn booking_cancelled(&self, _: &Booking, _: &Option<RoomDetails>) -> Result<(), NotifyError> {
        Ok(())
    }
}
