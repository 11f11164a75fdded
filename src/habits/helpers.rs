use chrono::offset::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::events::store::delete_all_for_habit;
use crate::internal_error::{InternalError, InternalResult};

use super::data::*;

const HABIT_COLUMNS: &str = "habit_id, habit_name, date_created, display_order";

pub fn get_habit_from_row(row: &Row) -> rusqlite::Result<Habit> {
    Ok(Habit {
        habit_id: row.get(0)?,
        name: row.get(1)?,
        date_created: row.get(2)?,
        display_order: row.get(3)?,
    })
}

pub fn validate_habit_name(name: &str) -> InternalResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InternalError::invalid("habit name must not be blank"));
    }

    Ok(name.to_string())
}

pub fn ensure_habit_exists(habit_id: HabitID, db_connection: &Connection) -> InternalResult<()> {
    let found = db_connection
        .query_row(
            "SELECT 1 FROM habits WHERE habit_id = (?1)",
            params![habit_id],
            |_| Ok(()),
        )
        .optional()?;

    found.ok_or(InternalError::NotFound { habit_id })
}

pub fn add_habit_to_db(
    name: &str,
    display_order: Option<DisplayOrder>,
    db_connection: &mut Connection,
) -> InternalResult<HabitID> {
    let name = validate_habit_name(name)?;

    let tx = db_connection.transaction()?;
    let display_order = match display_order {
        Some(order) => order,
        None => tx.query_row(
            "SELECT COALESCE(MAX(display_order) + 1, 0) FROM habits",
            [],
            |row| row.get(0),
        )?,
    };

    tx.execute(
        "INSERT INTO habits (habit_name, date_created, display_order) VALUES (?1, ?2, ?3)",
        params![name, Utc::now(), display_order],
    )?;
    let habit_id = tx.last_insert_rowid();
    tx.commit()?;

    info!(habit_id, %name, display_order, "created habit");
    Ok(habit_id)
}

pub fn rename_habit_in_db(
    habit_id: HabitID,
    name: &str,
    db_connection: &Connection,
) -> InternalResult<()> {
    let name = validate_habit_name(name)?;

    let changed = db_connection.execute(
        "UPDATE habits SET habit_name = (?1) WHERE habit_id = (?2)",
        params![name, habit_id],
    )?;
    if changed == 0 {
        return Err(InternalError::NotFound { habit_id });
    }

    info!(habit_id, %name, "renamed habit");
    Ok(())
}

pub fn set_display_order_in_db(
    habit_id: HabitID,
    display_order: DisplayOrder,
    db_connection: &Connection,
) -> InternalResult<()> {
    let changed = db_connection.execute(
        "UPDATE habits SET display_order = (?1) WHERE habit_id = (?2)",
        params![display_order, habit_id],
    )?;
    if changed == 0 {
        return Err(InternalError::NotFound { habit_id });
    }

    Ok(())
}

/// Ranks the given habits 0..n in the order listed. Habits not named keep
/// their rank.
pub fn reorder_habits_in_db(
    habit_ids: &[HabitID],
    db_connection: &mut Connection,
) -> InternalResult<()> {
    let tx = db_connection.transaction()?;

    for (rank, habit_id) in habit_ids.iter().enumerate() {
        set_display_order_in_db(*habit_id, rank as DisplayOrder, &tx)?;
    }

    tx.commit()?;
    Ok(())
}

/// Removes the habit and every event recorded for it in one transaction.
/// Returns the number of events removed.
pub fn delete_habit_from_db(habit_id: HabitID, db_connection: &mut Connection) -> InternalResult<usize> {
    let tx = db_connection.transaction()?;
    ensure_habit_exists(habit_id, &tx)?;

    let removed_events = delete_all_for_habit(habit_id, &tx)?;
    tx.execute("DELETE FROM habits WHERE habit_id = (?1)", params![habit_id])?;
    tx.commit()?;

    info!(habit_id, removed_events, "deleted habit");
    Ok(removed_events)
}

pub fn get_habit_from_db(habit_id: HabitID, db_connection: &Connection) -> InternalResult<Habit> {
    let habit = db_connection
        .query_row(
            &format!("SELECT {} FROM habits WHERE habit_id = (?1)", HABIT_COLUMNS),
            params![habit_id],
            get_habit_from_row,
        )
        .optional()?;

    habit.ok_or(InternalError::NotFound { habit_id })
}

pub fn get_all_habits_from_db(db_connection: &Connection) -> InternalResult<Vec<Habit>> {
    let mut statement = db_connection.prepare(&format!(
        "SELECT {} FROM habits ORDER BY display_order, habit_id",
        HABIT_COLUMNS
    ))?;

    let habits = statement
        .query_map([], get_habit_from_row)?
        .collect::<rusqlite::Result<Vec<Habit>>>()?;

    Ok(habits)
}
