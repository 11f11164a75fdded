use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::internal_error::InternalResult;

pub type DBConnection = Arc<Mutex<Connection>>;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS habits (
    habit_id INTEGER PRIMARY KEY AUTOINCREMENT,
    habit_name TEXT NOT NULL,
    date_created TEXT NOT NULL,
    display_order INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS habit_events (
    event_id INTEGER PRIMARY KEY AUTOINCREMENT,
    habit_id INTEGER NOT NULL REFERENCES habits(habit_id) ON DELETE CASCADE,
    log_date TEXT NOT NULL,
    event_type TEXT NOT NULL CHECK (event_type IN ('mark_complete', 'mark_incomplete')),
    event_timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_habit_events_day
    ON habit_events(habit_id, log_date, event_id);
";

/// Enables foreign keys and creates the habit and event tables if missing.
pub fn init_db(connection: &Connection) -> InternalResult<()> {
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;
    connection.execute_batch(SCHEMA_SQL)?;

    Ok(())
}

pub fn wrap_connection(connection: Connection) -> DBConnection {
    Arc::new(Mutex::new(connection))
}

#[cfg(test)]
pub fn test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("open in-memory db");
    init_db(&connection).expect("install schema");
    connection
}
