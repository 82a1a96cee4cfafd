//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the salle booking system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the rooms table.
///
/// The rooms table backs the room catalog: existence checks during booking
/// validation and display details for notification enrichment.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        room_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        location TEXT
    )";

/// SQL statement to create the bookings table.
///
/// Timestamps are stored as fixed-width ISO-8601 text
/// (`YYYY-MM-DDTHH:MM:SS.ffffff`), so lexicographic comparison in SQL
/// equals chronological comparison. Booking ids come from AUTOINCREMENT
/// and are therefore never reused and monotonically increasing, which the
/// listing queries use as the ordering tie-break.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
        room_id INTEGER NOT NULL REFERENCES rooms(room_id),
        user_id INTEGER NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        created_at TEXT NOT NULL,
        CHECK (start_time < end_time)
    )";

/// SQL statement to create the room/time index.
///
/// This index speeds up the conflict probe and per-room listings.
pub const CREATE_ROOM_TIME_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_bookings_room_time
    ON bookings(room_id, start_time, end_time)";

/// SQL statement to create an index on the `user_id` column.
///
/// This index speeds up per-user booking history queries.
pub const CREATE_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_user ON bookings(user_id)";

/// SQL statement to create an index on the `start_time` column.
///
/// This index speeds up globally ordered listings.
pub const CREATE_START_TIME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_start ON bookings(start_time)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a booking.
///
/// Used only inside the conflict-checked transaction in the transaction
/// module.
pub const INSERT_BOOKING: &str = r"
    INSERT INTO bookings (room_id, user_id, start_time, end_time, created_at)
    VALUES (?, ?, ?, ?, ?)
";

/// SQL statement to delete a booking by id.
pub const DELETE_BOOKING: &str = r"
    DELETE FROM bookings
    WHERE booking_id = ?
";
