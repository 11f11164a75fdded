use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::config::TrackerConfig;
use crate::data::DBConnection;
use crate::habits::data::{HabitID, HabitStats};
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[post("/toggle", format = "json", data = "<toggle_request>")]
pub fn toggle_day(
    toggle_request: Json<ToggleRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<DayStateResponse>> {
    let log_date = parse_log_date(toggle_request.log_date.as_deref())?;
    let mut db_connection = db_connection.lock()?;

    let state = toggle(toggle_request.habit_id, log_date, &mut db_connection)?;

    Ok(Json(DayStateResponse {
        habit_id: toggle_request.habit_id,
        log_date,
        state,
    }))
}

#[post("/mark", format = "json", data = "<mark_request>")]
pub fn mark_day(
    mark_request: Json<MarkRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Event>> {
    let log_date = parse_log_date(mark_request.log_date.as_deref())?;
    let mut db_connection = db_connection.lock()?;

    mark(
        mark_request.habit_id,
        log_date,
        mark_request.event_type,
        &mut db_connection,
    )
    .map(Json)
}

#[get("/get_day_state/<habit_id>?<date>")]
pub fn get_day_state(
    habit_id: HabitID,
    date: Option<&str>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<DayStateResponse>> {
    let log_date = parse_log_date(date)?;
    let mut db_connection = db_connection.lock()?;

    let state = current_state(habit_id, log_date, &mut db_connection)?;

    Ok(Json(DayStateResponse {
        habit_id,
        log_date,
        state,
    }))
}

#[get("/get_window/<habit_id>?<date>&<window_size>")]
pub fn get_window(
    habit_id: HabitID,
    date: Option<&str>,
    window_size: Option<&str>,
    config: &State<TrackerConfig>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<WindowSummary>> {
    let window = parse_window(date, window_size, config.window_size)?;
    let mut db_connection = db_connection.lock()?;

    window_summary(habit_id, &window, &mut db_connection).map(Json)
}

#[get("/get_completion_count/<habit_id>?<date>&<window_size>")]
pub fn get_completion_count(
    habit_id: HabitID,
    date: Option<&str>,
    window_size: Option<&str>,
    config: &State<TrackerConfig>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<usize>> {
    let window = parse_window(date, window_size, config.window_size)?;
    let mut db_connection = db_connection.lock()?;

    completion_count(habit_id, &window, &mut db_connection).map(Json)
}

#[get("/get_dot_sequence/<habit_id>?<date>&<window_size>")]
pub fn get_dot_sequence(
    habit_id: HabitID,
    date: Option<&str>,
    window_size: Option<&str>,
    config: &State<TrackerConfig>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<DayState>>> {
    let window = parse_window(date, window_size, config.window_size)?;
    let mut db_connection = db_connection.lock()?;

    dot_sequence(habit_id, &window, &mut db_connection).map(Json)
}

#[get("/get_habit_stats?<date>&<window_size>")]
pub fn get_habit_stats(
    date: Option<&str>,
    window_size: Option<&str>,
    config: &State<TrackerConfig>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<HabitStats>>> {
    let window = parse_window(date, window_size, config.window_size)?;
    let mut db_connection = db_connection.lock()?;

    habit_stats(&window, &mut db_connection).map(Json)
}

#[get("/get_events/<habit_id>")]
pub fn get_events(
    habit_id: HabitID,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Vec<Event>>> {
    let mut db_connection = db_connection.lock()?;

    event_history(habit_id, &mut db_connection).map(Json)
}
