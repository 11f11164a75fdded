//! Derives completion state from the event log.
//!
//! A day's state is the type of its event with the highest `event_id`, or
//! incomplete when it has none. Timestamps play no part: they can collide
//! or skew, insertion order cannot. The same rule serves single days, dot
//! sequences and counts.

use chrono::NaiveDate;

use std::collections::HashMap;

use crate::habits::data::HabitID;

use super::data::*;

pub fn resolve_day<'a>(events: impl IntoIterator<Item = &'a Event>) -> DayState {
    events
        .into_iter()
        .max_by_key(|event| event.event_id)
        .map_or(DayState::Incomplete, |event| event.event_type.state())
}

/// One state per window day, newest first. Events outside the window are
/// ignored.
pub fn resolve_window(events: &[Event], window: &Window) -> Vec<DayState> {
    let mut by_day: HashMap<NaiveDate, Vec<&Event>> = HashMap::new();
    for event in events.iter().filter(|event| window.contains(event.log_date)) {
        by_day.entry(event.log_date).or_default().push(event);
    }

    window
        .days()
        .map(|day| match by_day.get(&day) {
            Some(day_events) => resolve_day(day_events.iter().copied()),
            None => DayState::Incomplete,
        })
        .collect()
}

pub fn count_complete(dots: &[DayState]) -> usize {
    dots.iter().filter(|state| state.is_complete()).count()
}

/// Resolves the window once; the count is taken from the resolved dots.
pub fn summarize(habit_id: HabitID, events: &[Event], window: &Window) -> WindowSummary {
    let dots = resolve_window(events, window);

    WindowSummary {
        habit_id,
        reference_date: window.reference(),
        window_size: window.size(),
        count: count_complete(&dots),
        dots,
    }
}
