//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and constants
//! related to the database schema for the shoreline booking system.

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

/// SQL statement to create the reservations table.
///
/// Dates are stored as ISO-8601 `TEXT` so that lexicographic comparison
/// in SQL matches chronological order. Money columns hold exact decimal
/// strings, never floats. `created_at` is unix seconds.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        listing_id INTEGER NOT NULL,
        guest_name TEXT NOT NULL,
        guest_email TEXT NOT NULL,
        guest_phone TEXT,
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        adults INTEGER NOT NULL,
        children INTEGER NOT NULL,
        infants INTEGER NOT NULL,
        pets INTEGER NOT NULL,
        nightly_rate TEXT NOT NULL,
        subtotal TEXT NOT NULL,
        cleaning_fee TEXT NOT NULL,
        service_fee TEXT NOT NULL,
        tax TEXT NOT NULL,
        total TEXT NOT NULL,
        special_requests TEXT,
        status TEXT NOT NULL,
        payment_status TEXT NOT NULL,
        payment_intent_id TEXT,
        payment_method TEXT,
        calendar_event_id TEXT,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create an index on (`listing_id`, `check_in`).
///
/// This index speeds up availability queries, which always filter by
/// listing and compare date columns.
pub const CREATE_LISTING_DATES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_listing_dates ON reservations(listing_id, check_in)";

/// SQL statement to create an index on the status column.
///
/// This index speeds up filtered lists and the cancelled-exclusion in
/// conflict queries.
pub const CREATE_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status)";

/// SQL statement to create an index on the `created_at` column.
///
/// This index speeds up the newest-first listing order.
pub const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_created_at ON reservations(created_at)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a reservation.
///
/// The id column is omitted so `SQLite` assigns the next rowid.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (listing_id, guest_name, guest_email, guest_phone,
     check_in, check_out, adults, children, infants, pets,
     nightly_rate, subtotal, cleaning_fee, service_fee, tax, total,
     special_requests, status, payment_status,
     payment_intent_id, payment_method, calendar_event_id, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

/// SQL statement to delete a reservation by id.
pub const DELETE_RESERVATION: &str = "DELETE FROM reservations WHERE id = ?";
