use chrono::{Datelike, Local, NaiveDate};
use rusqlite::Connection;
use tracing::info;

use crate::habits::data::{HabitID, HabitStats};
use crate::habits::helpers::{ensure_habit_exists, get_all_habits_from_db};
use crate::internal_error::{InternalError, InternalResult};

use super::data::*;
use super::resolve::{resolve_day, summarize};
use super::store::{append, get_all_events_for_habit, get_events_between, get_events_for_day};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses an ISO `YYYY-MM-DD` date; `None` means today.
pub fn parse_log_date(date: Option<&str>) -> InternalResult<NaiveDate> {
    let date = match date {
        Some(date) => NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| InternalError::invalid(format!("malformed date {:?}: {}", date, e)))?,
        None => return Ok(today()),
    };

    // Dates are stored as text and compared lexically.
    if !(1..=9999).contains(&date.year()) {
        return Err(InternalError::invalid(format!(
            "date {} is outside years 1-9999",
            date
        )));
    }

    Ok(date)
}

/// Builds the query window; a missing size falls back to `default_size`,
/// a malformed one is rejected.
pub fn parse_window(
    date: Option<&str>,
    window_size: Option<&str>,
    default_size: i64,
) -> InternalResult<Window> {
    let size = match window_size {
        Some(size) => size.trim().parse::<i64>().map_err(|e| {
            InternalError::invalid(format!("malformed window size {:?}: {}", size, e))
        })?,
        None => default_size,
    };

    Window::new(parse_log_date(date)?, size)
}

pub fn mark(
    habit_id: HabitID,
    log_date: NaiveDate,
    event_type: EventType,
    db_connection: &mut Connection,
) -> InternalResult<Event> {
    let tx = db_connection.transaction()?;
    let event = append(habit_id, log_date, event_type, &tx)?;
    tx.commit()?;

    info!(habit_id, %log_date, event_id = event.event_id, event_type = event_type.as_str(), "marked day");
    Ok(event)
}

/// Flips the resolved state of a day by appending the opposing event.
pub fn toggle(
    habit_id: HabitID,
    log_date: NaiveDate,
    db_connection: &mut Connection,
) -> InternalResult<DayState> {
    let tx = db_connection.transaction()?;
    ensure_habit_exists(habit_id, &tx)?;

    let new_state = resolve_day(&get_events_for_day(habit_id, log_date, &tx)?).toggled();
    let event = append(habit_id, log_date, new_state.event_type(), &tx)?;
    tx.commit()?;

    info!(habit_id, %log_date, event_id = event.event_id, state = ?new_state, "toggled day");
    Ok(new_state)
}

pub fn current_state(
    habit_id: HabitID,
    log_date: NaiveDate,
    db_connection: &mut Connection,
) -> InternalResult<DayState> {
    let tx = db_connection.transaction()?;
    ensure_habit_exists(habit_id, &tx)?;

    let state = resolve_day(&get_events_for_day(habit_id, log_date, &tx)?);
    tx.commit()?;

    Ok(state)
}

fn window_summary_in_tx(
    habit_id: HabitID,
    window: &Window,
    db_connection: &Connection,
) -> InternalResult<WindowSummary> {
    let events = get_events_between(habit_id, window.start(), window.reference(), db_connection)?;
    Ok(summarize(habit_id, &events, window))
}

/// The dot sequence and its completion count, from one resolution pass.
pub fn window_summary(
    habit_id: HabitID,
    window: &Window,
    db_connection: &mut Connection,
) -> InternalResult<WindowSummary> {
    let tx = db_connection.transaction()?;
    ensure_habit_exists(habit_id, &tx)?;

    let summary = window_summary_in_tx(habit_id, window, &tx)?;
    tx.commit()?;

    Ok(summary)
}

pub fn completion_count(
    habit_id: HabitID,
    window: &Window,
    db_connection: &mut Connection,
) -> InternalResult<usize> {
    window_summary(habit_id, window, db_connection).map(|summary| summary.count)
}

pub fn dot_sequence(
    habit_id: HabitID,
    window: &Window,
    db_connection: &mut Connection,
) -> InternalResult<Vec<DayState>> {
    window_summary(habit_id, window, db_connection).map(|summary| summary.dots)
}

/// Every habit, in display order, with its completion count over the window.
pub fn habit_stats(window: &Window, db_connection: &mut Connection) -> InternalResult<Vec<HabitStats>> {
    let tx = db_connection.transaction()?;
    let mut stats = vec![];
    for habit in get_all_habits_from_db(&tx)? {
        let summary = window_summary_in_tx(habit.habit_id, window, &tx)?;
        stats.push(HabitStats {
            habit_id: habit.habit_id,
            name: habit.name,
            display_order: habit.display_order,
            count: summary.count,
        });
    }
    tx.commit()?;

    Ok(stats)
}

/// Every event ever recorded for the habit, in insertion order.
pub fn event_history(habit_id: HabitID, db_connection: &mut Connection) -> InternalResult<Vec<Event>> {
    let tx = db_connection.transaction()?;
    ensure_habit_exists(habit_id, &tx)?;

    let events = get_all_events_for_habit(habit_id, &tx)?;
    tx.commit()?;

    Ok(events)
}
