//! Error types for the salle library.
//!
//! This module provides a comprehensive error hierarchy for all operations
//! in the salle library, using `thiserror` for ergonomic error handling.

use chrono::NaiveDateTime;

use thiserror::Error;

use crate::booking::{BookingId, RoomId};

/// Result type alias for operations that may fail with a salle error.
///
/// # Examples
///
/// ```
/// use salle::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the salle library.
///
/// This enum encompasses all possible error conditions that can occur
/// during booking operations. Domain rejections (conflicts, authorization,
/// validation) are distinct variants; storage failures surface as
/// [`Error::Database`].
#[derive(Debug, Error)]
pub enum Error {
    /// A request carried data that could not be parsed or was missing.
    #[error("malformed {field}: {reason}")]
    Malformed {
        /// The field that could not be interpreted.
        field: String,
        /// The reason the value was rejected.
        reason: String,
    },

    /// A time window whose end does not come strictly after its start.
    #[error("invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        /// The requested start of the window.
        start: NaiveDateTime,
        /// The requested end of the window.
        end: NaiveDateTime,
    },

    /// A booking whose start is not strictly in the future.
    #[error("booking start {start} is not in the future")]
    PastStart {
        /// The rejected start timestamp.
        start: NaiveDateTime,
    },

    /// The referenced room does not exist.
    #[error("room {room} not found")]
    RoomNotFound {
        /// The room that was looked up.
        room: RoomId,
    },

    /// The referenced booking does not exist.
    #[error("booking {booking} not found")]
    BookingNotFound {
        /// The booking that was looked up.
        booking: BookingId,
    },

    /// The requested window overlaps an existing active booking.
    #[error("room {room} is already booked for the requested time range")]
    BookingConflict {
        /// The room whose schedule conflicted.
        room: RoomId,
    },

    /// The acting identity is neither the owner nor privileged.
    #[error("forbidden: {details}")]
    Forbidden {
        /// What was attempted and by whom.
        details: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

// Additional conversions for better ergonomics

impl From<crate::interval::TimestampParseError> for Error {
    fn from(err: crate::interval::TimestampParseError) -> Self {
        Self::Malformed {
            field: "timestamp".into(),
            reason: err.to_string(),
        }
    }
}

impl From<crate::interval::IntervalError> for Error {
    fn from(err: crate::interval::IntervalError) -> Self {
        match err {
            crate::interval::IntervalError::Degenerate { start, end } => {
                Self::InvalidInterval { start, end }
            }
            crate::interval::IntervalError::MixedAwareness => Self::Malformed {
                field: "interval".into(),
                reason: "cannot mix timezone-aware and naive timestamps in one interval".into(),
            },
        }
    }
}

impl From<crate::booking::InvalidIdError> for Error {
    fn from(err: crate::booking::InvalidIdError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if error indicates a scheduling conflict.
    ///
    /// # Examples
    ///
    /// ```
    /// use salle::{Error, RoomId};
    ///
    /// let err = Error::BookingConflict { room: RoomId::try_from(1).unwrap() };
    /// assert!(err.is_conflict());
    /// ```
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::BookingConflict { .. })
    }

    /// Check if error indicates a missing room or booking.
    ///
    /// # Examples
    ///
    /// ```
    /// use salle::{Error, RoomId};
    ///
    /// let err = Error::RoomNotFound { room: RoomId::try_from(7).unwrap() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RoomNotFound { .. } | Self::BookingNotFound { .. })
    }

    /// Check if error is an authorization rejection.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }
}
