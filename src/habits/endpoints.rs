use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::data::DBConnection;
use crate::internal_error::InternalResult;

use super::data::*;
use super::helpers::*;

#[get("/get_habits")]
pub fn get_habits(db_connection: &State<DBConnection>) -> InternalResult<Json<Vec<Habit>>> {
    let db_connection = db_connection.lock()?;

    let habits = get_all_habits_from_db(&db_connection)?;

    Ok(Json(habits))
}

#[get("/get_habit/<habit_id>")]
pub fn get_habit(
    habit_id: HabitID,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<Habit>> {
    let db_connection = db_connection.lock()?;
    get_habit_from_db(habit_id, &db_connection).map(Json)
}

#[post("/add_habit", format = "json", data = "<habit>")]
pub fn add_habit(
    habit: Json<AddHabitRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<AddHabitResult>> {
    let mut db_connection = db_connection.lock()?;

    let habit_id = add_habit_to_db(&habit.name, habit.display_order, &mut db_connection)?;

    Ok(Json(AddHabitResult { habit_id }))
}

#[post("/rename_habit", format = "json", data = "<rename_habit_request>")]
pub fn rename_habit(
    rename_habit_request: Json<RenameHabitRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    rename_habit_in_db(
        rename_habit_request.habit_id,
        &rename_habit_request.name,
        &db_connection,
    )
}

#[post("/delete_habit", format = "json", data = "<delete_habit_request>")]
pub fn delete_habit(
    delete_habit_request: Json<DeleteHabitRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<()> {
    let mut db_connection = db_connection.lock()?;

    delete_habit_from_db(delete_habit_request.habit_id, &mut db_connection)?;

    Ok(())
}

#[post("/set_display_order", format = "json", data = "<set_display_order_request>")]
pub fn set_display_order(
    set_display_order_request: Json<SetDisplayOrderRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<()> {
    let db_connection = db_connection.lock()?;

    set_display_order_in_db(
        set_display_order_request.habit_id,
        set_display_order_request.display_order,
        &db_connection,
    )
}

#[post("/reorder_habits", format = "json", data = "<reorder_habits_request>")]
pub fn reorder_habits(
    reorder_habits_request: Json<ReorderHabitsRequest>,
    db_connection: &State<DBConnection>,
) -> InternalResult<()> {
    let mut db_connection = db_connection.lock()?;

    reorder_habits_in_db(&reorder_habits_request.habit_ids, &mut db_connection)
}
