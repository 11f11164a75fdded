//! Append-only persistence for habit events.
//!
//! Rows in `habit_events` are only ever inserted. The single deletion path is
//! [`delete_all_for_habit`], which runs as part of deleting the owning habit.

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::habits::data::HabitID;
use crate::habits::helpers::ensure_habit_exists;
use crate::internal_error::InternalResult;

use super::data::*;

const EVENT_COLUMNS: &str = "event_id, habit_id, log_date, event_type, event_timestamp";

pub fn get_event_from_row(row: &Row) -> rusqlite::Result<Event> {
    Ok(Event {
        event_id: row.get(0)?,
        habit_id: row.get(1)?,
        log_date: row.get(2)?,
        event_type: row.get(3)?,
        event_timestamp: row.get(4)?,
    })
}

/// Records a new event. Duplicates for the same day are expected; they are
/// the toggle history.
pub fn append(
    habit_id: HabitID,
    log_date: NaiveDate,
    event_type: EventType,
    db_connection: &Connection,
) -> InternalResult<Event> {
    ensure_habit_exists(habit_id, db_connection)?;

    let event_timestamp = Utc::now();
    db_connection.execute(
        "INSERT INTO habit_events (habit_id, log_date, event_type, event_timestamp) VALUES (?1, ?2, ?3, ?4)",
        params![habit_id, log_date, event_type, event_timestamp],
    )?;

    let event = Event {
        event_id: db_connection.last_insert_rowid(),
        habit_id,
        log_date,
        event_type,
        event_timestamp,
    };
    debug!(event_id = event.event_id, habit_id, %log_date, event_type = event_type.as_str(), "appended event");

    Ok(event)
}

pub fn delete_all_for_habit(habit_id: HabitID, db_connection: &Connection) -> InternalResult<usize> {
    let removed = db_connection.execute(
        "DELETE FROM habit_events WHERE habit_id = (?1)",
        params![habit_id],
    )?;

    Ok(removed)
}

fn query_events(
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
    db_connection: &Connection,
) -> InternalResult<Vec<Event>> {
    let mut statement = db_connection.prepare(sql)?;
    let events = statement
        .query_map(params, get_event_from_row)?
        .collect::<rusqlite::Result<Vec<Event>>>()?;

    Ok(events)
}

pub fn get_events_for_day(
    habit_id: HabitID,
    log_date: NaiveDate,
    db_connection: &Connection,
) -> InternalResult<Vec<Event>> {
    query_events(
        &format!(
            "SELECT {} FROM habit_events WHERE habit_id = (?1) AND log_date = (?2) ORDER BY event_id",
            EVENT_COLUMNS
        ),
        params![habit_id, log_date],
        db_connection,
    )
}

/// Events whose `log_date` falls inside `[start, end]`, in insertion order.
pub fn get_events_between(
    habit_id: HabitID,
    start: NaiveDate,
    end: NaiveDate,
    db_connection: &Connection,
) -> InternalResult<Vec<Event>> {
    query_events(
        &format!(
            "SELECT {} FROM habit_events WHERE habit_id = (?1) AND log_date >= (?2) AND log_date <= (?3) ORDER BY event_id",
            EVENT_COLUMNS
        ),
        params![habit_id, start, end],
        db_connection,
    )
}

pub fn get_all_events_for_habit(
    habit_id: HabitID,
    db_connection: &Connection,
) -> InternalResult<Vec<Event>> {
    query_events(
        &format!(
            "SELECT {} FROM habit_events WHERE habit_id = (?1) ORDER BY event_id",
            EVENT_COLUMNS
        ),
        params![habit_id],
        db_connection,
    )
}
