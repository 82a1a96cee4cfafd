//! Booking entity and identifier types.
//!
//! This module provides the central [`Booking`] entity plus the validated
//! identifier newtypes for rooms, users, and bookings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::interval::TimeSlot;

/// Error type for invalid identifier values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for InvalidIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for InvalidIdError {}

/// Identifier of a bookable room.
///
/// Room ids are positive integers assigned by the room catalog.
///
/// # Examples
///
/// ```
/// use salle::RoomId;
///
/// let room = RoomId::try_from(3).unwrap();
/// assert_eq!(room.value(), 3);
///
/// assert!(RoomId::try_from(0).is_err());
/// assert!(RoomId::try_from(-2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(i64);

impl RoomId {
    /// Returns the numeric value of the id.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for RoomId {
    type Error = InvalidIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(InvalidIdError {
                field: "room_id".into(),
                message: format!("must be a positive integer, got {value}"),
            });
        }
        Ok(Self(value))
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a requesting user.
///
/// User ids are positive integers minted by the external identity provider;
/// the engine never creates them itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    /// Returns the numeric value of the id.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = InvalidIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(InvalidIdError {
                field: "user_id".into(),
                message: format!("must be a positive integer, got {value}"),
            });
        }
        Ok(Self(value))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a committed booking.
///
/// Booking ids are assigned by the store at commit time, are never reused,
/// and grow monotonically, which makes them the ordering tie-break for
/// listings sorted by start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookingId(i64);

impl BookingId {
    /// Wraps a store-assigned id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric value of the id.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed, non-overlapping time claim on a room by a requester.
///
/// Bookings are produced by the store at commit time; the `created_at`
/// timestamp is set server-side once and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use salle::{Booking, BookingId, RoomId, TimeSlot, Timestamp, UserId};
///
/// let slot = TimeSlot::new(
///     Timestamp::parse("2026-03-01T10:00:00").unwrap(),
///     Timestamp::parse("2026-03-01T11:00:00").unwrap(),
/// )
/// .unwrap();
///
/// let booking = Booking::new(
///     BookingId::new(1),
///     RoomId::try_from(3).unwrap(),
///     UserId::try_from(8).unwrap(),
///     slot,
///     "2026-02-20T09:00:00".parse().unwrap(),
/// );
///
/// assert_eq!(booking.room().value(), 3);
/// assert_eq!(booking.slot(), slot);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    room: RoomId,
    requester: UserId,
    slot: TimeSlot,
    created_at: NaiveDateTime,
}

impl Booking {
    /// Assembles a booking from its committed parts.
    #[must_use]
    pub const fn new(
        id: BookingId,
        room: RoomId,
        requester: UserId,
        slot: TimeSlot,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            room,
            requester,
            slot,
            created_at,
        }
    }

    /// Returns the booking id.
    #[must_use]
    pub const fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the booked room.
    #[must_use]
    pub const fn room(&self) -> RoomId {
        self.room
    }

    /// Returns the requesting user.
    #[must_use]
    pub const fn requester(&self) -> UserId {
        self.requester
    }

    /// Returns the reserved time window.
    #[must_use]
    pub const fn slot(&self) -> TimeSlot {
        self.slot
    }

    /// Returns the server-side creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}
