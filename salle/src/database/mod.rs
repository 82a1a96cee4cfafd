//! Database layer for persistent storage of room bookings.
//!
//! This module provides a SQLite-based storage layer for managing bookings
//! and the room catalog, including connection management, schema versioning,
//! CRUD operations, and the transactional conflict-checked write paths.
//!
//! # Examples
//!
//! ```no_run
//! use salle::database::{Database, DatabaseConfig};
//! use salle::store::BookingStore;
//! use salle::{RoomId, TimeSlot, Timestamp, UserId};
//!
//! // Open a database
//! let config = DatabaseConfig::new("/tmp/salle.db");
//! let mut db = Database::open(config).unwrap();
//!
//! // Seed a room and commit a booking
//! let room = db.add_room("Boardroom", Some("4th floor")).unwrap();
//! let slot = TimeSlot::new(
//!     Timestamp::parse("2026-03-01T10:00:00").unwrap(),
//!     Timestamp::parse("2026-03-01T11:00:00").unwrap(),
//! )
//! .unwrap();
//! let booking = db
//!     .commit_booking(room, UserId::try_from(8).unwrap(), &slot)
//!     .unwrap();
//! println!("{:?}", booking);
//! ```

mod adapter;
mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
#[cfg(test)]
pub(crate) mod test_util;
mod transaction;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
