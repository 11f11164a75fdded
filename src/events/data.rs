use chrono::{DateTime, Duration, NaiveDate, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::habits::data::HabitID;
use crate::internal_error::{InternalError, InternalResult};

pub type EventID = i64;

/// Largest rolling window served, about a century of days.
pub const MAX_WINDOW_SIZE: i64 = 36_600;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[serde(alias = "complete")]
    MarkComplete,
    #[serde(alias = "incomplete")]
    MarkIncomplete,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::MarkComplete => "mark_complete",
            EventType::MarkIncomplete => "mark_incomplete",
        }
    }

    /// The state a day resolves to when this is its latest event.
    pub fn state(self) -> DayState {
        match self {
            EventType::MarkComplete => DayState::Complete,
            EventType::MarkIncomplete => DayState::Incomplete,
        }
    }
}

impl ToSql for EventType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EventType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "mark_complete" => Ok(EventType::MarkComplete),
            "mark_incomplete" => Ok(EventType::MarkIncomplete),
            other => Err(FromSqlError::Other(
                format!("unknown event type {:?}", other).into(),
            )),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    Complete,
    Incomplete,
}

impl DayState {
    pub fn toggled(self) -> DayState {
        match self {
            DayState::Complete => DayState::Incomplete,
            DayState::Incomplete => DayState::Complete,
        }
    }

    /// The event that asserts this state.
    pub fn event_type(self) -> EventType {
        match self {
            DayState::Complete => EventType::MarkComplete,
            DayState::Incomplete => EventType::MarkIncomplete,
        }
    }

    pub fn is_complete(self) -> bool {
        self == DayState::Complete
    }
}

/// One immutable row of the habit event log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Event {
    pub event_id: EventID,
    pub habit_id: HabitID,
    pub log_date: NaiveDate,
    pub event_type: EventType,
    pub event_timestamp: DateTime<Utc>,
}

/// A trailing run of `size` days ending at (and including) `reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    reference: NaiveDate,
    start: NaiveDate,
    size: u32,
}

impl Window {
    pub fn new(reference: NaiveDate, size: i64) -> InternalResult<Window> {
        if size <= 0 {
            return Err(InternalError::invalid(format!(
                "window size must be positive, got {}",
                size
            )));
        }
        if size > MAX_WINDOW_SIZE {
            return Err(InternalError::invalid(format!(
                "window size {} exceeds the maximum of {}",
                size, MAX_WINDOW_SIZE
            )));
        }
        let size = u32::try_from(size)
            .map_err(|_| InternalError::invalid(format!("window size {} is too large", size)))?;

        let start = reference
            .checked_sub_signed(Duration::days(i64::from(size) - 1))
            .ok_or_else(|| {
                InternalError::invalid(format!(
                    "window of {} days before {} is out of range",
                    size, reference
                ))
            })?;

        Ok(Window {
            reference,
            start,
            size,
        })
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.reference
    }

    /// Days of the window, newest first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let reference = self.reference;
        (0..self.size).map(move |offset| reference - Duration::days(i64::from(offset)))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WindowSummary {
    pub habit_id: HabitID,
    pub reference_date: NaiveDate,
    pub window_size: u32,
    pub count: usize,
    /// Index 0 is the reference date, the last index is the window's first day.
    pub dots: Vec<DayState>,
}

#[derive(Serialize, Debug)]
pub struct DayStateResponse {
    pub habit_id: HabitID,
    pub log_date: NaiveDate,
    pub state: DayState,
}

#[derive(Deserialize, Debug)]
pub struct ToggleRequest {
    pub habit_id: HabitID,
    pub log_date: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MarkRequest {
    pub habit_id: HabitID,
    pub log_date: Option<String>,
    pub event_type: EventType,
}
