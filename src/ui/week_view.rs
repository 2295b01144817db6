use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

use crate::calendar::{CanonicalEvent, EventCategory};
use crate::slots::{Density, bind_slot, generate_slots};

/// Week columns are narrow; only the first two events per slot are shown.
pub const MAX_WEEK_SLOT_EVENTS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub week_start: NaiveDate,
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_today: bool,
    pub slots: Vec<SlotCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotCell {
    pub offset_minutes: u32,
    pub events: Vec<EventBlock>,
    pub more: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    pub event_id: String,
    pub title: String,
    pub category: EventCategory,
    pub duration_minutes: i64,
}

impl WeekLayout {
    pub fn week_of_date(date: NaiveDate) -> NaiveDate {
        let days_from_monday = date.weekday().num_days_from_monday() as u64;
        date.checked_sub_days(chrono::Days::new(days_from_monday))
            .unwrap_or(date)
    }
}

pub fn calculate_layout(
    date: NaiveDate,
    events: &[CanonicalEvent],
    work_start_hour: u32,
    work_end_hour: u32,
    density: Density,
    now: DateTime<Utc>,
) -> WeekLayout {
    let week_start = WeekLayout::week_of_date(date);
    let today = now.with_timezone(&Local).date_naive();
    let offsets = generate_slots(work_start_hour, work_end_hour, density);

    let mut days = Vec::new();
    for day_offset in 0..7u64 {
        let Some(day) = week_start.checked_add_days(chrono::Days::new(day_offset)) else {
            continue;
        };

        let slots = offsets
            .iter()
            .map(|&offset| {
                let bound = bind_slot(offset, day, density, events);
                SlotCell {
                    offset_minutes: offset,
                    more: bound.len().saturating_sub(MAX_WEEK_SLOT_EVENTS),
                    events: bound
                        .into_iter()
                        .take(MAX_WEEK_SLOT_EVENTS)
                        .map(|event| EventBlock {
                            event_id: event.id.clone(),
                            title: event.title.clone(),
                            category: event.category,
                            duration_minutes: event.duration_minutes(),
                        })
                        .collect(),
                }
            })
            .collect();

        days.push(DayColumn {
            date: day,
            is_today: day == today,
            slots,
        });
    }

    WeekLayout { week_start, days }
}
