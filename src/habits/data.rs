use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type HabitID = i64;
pub type DisplayOrder = i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Habit {
    pub habit_id: HabitID,
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub display_order: DisplayOrder,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HabitStats {
    pub habit_id: HabitID,
    pub name: String,
    pub display_order: DisplayOrder,
    pub count: usize,
}

#[derive(Serialize, Debug)]
pub struct AddHabitResult {
    pub habit_id: HabitID,
}

#[derive(Deserialize, Debug)]
pub struct AddHabitRequest {
    pub name: String,
    pub display_order: Option<DisplayOrder>,
}

#[derive(Deserialize, Debug)]
pub struct RenameHabitRequest {
    pub habit_id: HabitID,
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct DeleteHabitRequest {
    pub habit_id: HabitID,
}

#[derive(Deserialize, Debug)]
pub struct SetDisplayOrderRequest {
    pub habit_id: HabitID,
    pub display_order: DisplayOrder,
}

#[derive(Deserialize, Debug)]
pub struct ReorderHabitsRequest {
    pub habit_ids: Vec<HabitID>,
}
