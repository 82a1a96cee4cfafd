#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # salle
//!
//! A library for managing meeting room reservations.
//!
//! This library provides the conflict-resolution and interval-scheduling
//! engine behind a room booking service: it validates proposed time
//! windows, detects overlap against committed bookings, commits
//! non-conflicting bookings atomically, and derives a room's free intervals
//! over a day.
//!
//! ## Core Types
//!
//! - [`Timestamp`] and [`TimeSlot`]: ISO-8601 parsing and half-open
//!   `[start, end)` windows with the overlap predicate
//! - [`Booking`], [`BookingId`], [`RoomId`], [`UserId`]: the booking entity
//!   and its validated identifiers
//! - [`Scheduler`]: the booking lifecycle manager (create, update, cancel,
//!   availability)
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use salle::{TimeSlot, Timestamp};
//!
//! let morning = TimeSlot::new(
//!     Timestamp::parse("2026-03-01T10:00:00").unwrap(),
//!     Timestamp::parse("2026-03-01T11:00:00").unwrap(),
//! )
//! .unwrap();
//! let lunch = TimeSlot::new(
//!     Timestamp::parse("2026-03-01T10:30:00").unwrap(),
//!     Timestamp::parse("2026-03-01T12:00:00").unwrap(),
//! )
//! .unwrap();
//!
//! // Half-open intervals: these two overlap...
//! assert!(morning.overlaps(&lunch));
//!
//! // ...but a window that merely touches at 11:00 does not
//! let afternoon = TimeSlot::new(
//!     Timestamp::parse("2026-03-01T11:00:00").unwrap(),
//!     Timestamp::parse("2026-03-01T12:00:00").unwrap(),
//! )
//! .unwrap();
//! assert!(!morning.overlaps(&afternoon));
//! ```

pub mod access;
pub mod availability;
pub mod booking;
pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod interval;
pub mod logging;
pub mod notify;
pub mod operations;
pub mod store;

// Re-export key types at crate root for convenience
pub use access::{AccessPolicy, BookingAction, Identity, Role, RolePolicy};
pub use booking::{Booking, BookingId, RoomId, UserId};
pub use cache::AvailabilityCache;
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use interval::{TimeSlot, Timestamp};
pub use logging::{init_logger, LogLevel, Logger};
pub use notify::{LogNotifier, NoopNotifier, Notifier, NotifyError};
pub use operations::{CreateBooking, Scheduler, UpdateBooking};
pub use store::{BookingPatch, BookingStore, RoomCatalog, RoomDetails};
