//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions used across multiple database test
//! modules and the scheduler tests.

use tempfile::tempdir;

use crate::booking::RoomId;
use crate::database::{Database, DatabaseConfig};
use crate::interval::TimeSlot;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn open_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Adds a room to the catalog and returns its id.
///
/// # Panics
///
/// Panics if the insert fails. This is acceptable in test code.
pub fn seed_room(db: &mut Database, name: &str) -> RoomId {
    db.add_room(name, None).unwrap()
}

/// Builds a time slot from naive ISO-8601 endpoints.
///
/// # Panics
///
/// Panics if the endpoints do not parse or are not ordered. This is
/// acceptable in test code.
#[must_use]
pub fn sample_slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot::from_naive(start.parse().unwrap(), end.parse().unwrap()).unwrap()
}
