//! Time interval types for booking windows.
//!
//! This module provides the half-open interval model used everywhere in the
//! library: [`Timestamp`] for parsing ISO-8601 boundary input and [`TimeSlot`]
//! for validated `[start, end)` windows with the overlap predicate.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepted layouts for naive (offset-free) timestamps.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// A point in time parsed from ISO-8601 text.
///
/// Offset-aware input (RFC 3339) is normalized to UTC at parse time. Naive
/// input is interpreted as UTC, matching how the engine compares booking
/// starts against the current UTC time. The original awareness is retained
/// so that [`TimeSlot::new`] can reject intervals that mix an aware endpoint
/// with a naive one.
///
/// # Examples
///
/// ```
/// use salle::Timestamp;
///
/// let naive = Timestamp::parse("2026-03-01T10:00:00").unwrap();
/// assert!(!naive.is_aware());
///
/// let aware = Timestamp::parse("2026-03-01T12:00:00+02:00").unwrap();
/// assert!(aware.is_aware());
/// // Normalized to UTC: both name the same instant.
/// assert_eq!(naive.naive_utc(), aware.naive_utc());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    value: NaiveDateTime,
    aware: bool,
}

impl Timestamp {
    /// Parses an ISO-8601 timestamp, with or without a UTC offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the input matches neither the RFC 3339 form nor
    /// the naive `YYYY-MM-DDTHH:MM[:SS[.ffffff]]` form.
    ///
    /// # Examples
    ///
    /// ```
    /// use salle::Timestamp;
    ///
    /// assert!(Timestamp::parse("2026-03-01T10:00:00").is_ok());
    /// assert!(Timestamp::parse("2026-03-01T10:00:00Z").is_ok());
    /// assert!(Timestamp::parse("2026-03-01T10:00").is_ok());
    /// assert!(Timestamp::parse("next tuesday").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, TimestampParseError> {
        if let Ok(aware) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self {
                value: aware.naive_utc(),
                aware: true,
            });
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
                return Ok(Self {
                    value: naive,
                    aware: false,
                });
            }
        }

        Err(TimestampParseError {
            input: input.to_string(),
        })
    }

    /// Wraps a naive datetime, treating it as UTC.
    #[must_use]
    pub const fn from_naive(value: NaiveDateTime) -> Self {
        Self {
            value,
            aware: false,
        }
    }

    /// Wraps an explicit UTC instant.
    #[must_use]
    pub fn from_utc(value: DateTime<Utc>) -> Self {
        Self {
            value: value.naive_utc(),
            aware: true,
        }
    }

    /// Returns the normalized UTC value.
    #[must_use]
    pub const fn naive_utc(&self) -> NaiveDateTime {
        self.value
    }

    /// Returns whether the original input carried a UTC offset.
    #[must_use]
    pub const fn is_aware(&self) -> bool {
        self.aware
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Error type for unparseable timestamp input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not an ISO-8601 timestamp (expected e.g. '2026-03-01T15:30:00')")]
pub struct TimestampParseError {
    /// The rejected input.
    pub input: String,
}

/// Error type for interval construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
    /// The end of the interval does not come strictly after its start.
    #[error("interval start {start} is not before end {end}")]
    Degenerate {
        /// The requested start.
        start: NaiveDateTime,
        /// The requested end.
        end: NaiveDateTime,
    },

    /// One endpoint carried a UTC offset and the other did not.
    #[error("cannot mix timezone-aware and naive timestamps in one interval")]
    MixedAwareness,
}

/// A half-open time window `[start, end)`.
///
/// The constructor enforces `start < end` strictly, so every `TimeSlot` in
/// the system is non-empty and well ordered. Two slots that merely touch at
/// a boundary do not overlap.
///
/// # Examples
///
/// ```
/// use salle::{TimeSlot, Timestamp};
///
/// let morning = TimeSlot::new(
///     Timestamp::parse("2026-03-01T10:00:00").unwrap(),
///     Timestamp::parse("2026-03-01T11:00:00").unwrap(),
/// )
/// .unwrap();
/// let adjacent = TimeSlot::new(
///     Timestamp::parse("2026-03-01T11:00:00").unwrap(),
///     Timestamp::parse("2026-03-01T12:00:00").unwrap(),
/// )
/// .unwrap();
///
/// assert!(!morning.overlaps(&adjacent));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeSlot {
    /// Creates a time slot from two parsed timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::MixedAwareness`] if one endpoint carried a
    /// UTC offset and the other did not, and [`IntervalError::Degenerate`]
    /// if the end is not strictly after the start.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, IntervalError> {
        if start.is_aware() != end.is_aware() {
            return Err(IntervalError::MixedAwareness);
        }
        Self::from_naive(start.naive_utc(), end.naive_utc())
    }

    /// Creates a time slot from normalized UTC endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::Degenerate`] if the end is not strictly
    /// after the start.
    pub fn from_naive(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, IntervalError> {
        if start >= end {
            return Err(IntervalError::Degenerate { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive start of the window.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the exclusive end of the window.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Tests whether two half-open windows intersect.
    ///
    /// Windows that only touch at a boundary (`a.end == b.start`) do not
    /// overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }

    /// Returns the length of the window.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Tests whether the window lies entirely within the given calendar day.
    ///
    /// A window that crosses midnight belongs to neither day under this
    /// test; the availability sweep relies on that.
    #[must_use]
    pub fn within_day(&self, day: NaiveDate) -> bool {
        self.start.date() == day && self.end.date() == day
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod proptests;
