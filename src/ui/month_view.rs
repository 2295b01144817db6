use chrono::{DateTime, Datelike, Local, NaiveDate, Utc, Weekday};

use crate::calendar::{CanonicalEvent, EventCategory};

/// Month cells are the smallest; two chips plus a "+N more" count.
pub const MAX_MONTH_DAY_CHIPS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

/// One calendar day in the padded grid. `date` is always a real date —
/// padding cells belong to the neighboring months and stay clickable
/// for day-view navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub chips: Vec<EventChip>,
    pub more: usize,
    pub appointment_count: usize,
    pub event_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventChip {
    pub event_id: String,
    pub title: String,
    pub category: EventCategory,
}

pub fn calculate_layout(
    date: NaiveDate,
    events: &[CanonicalEvent],
    now: DateTime<Utc>,
) -> MonthLayout {
    let year = date.year();
    let month = date.month();
    let today = now.with_timezone(&Local).date_naive();

    let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return MonthLayout {
            year,
            month,
            weeks: Vec::new(),
        };
    };

    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    let Some(last_day) = next_month_first.and_then(|d| d.pred_opt()) else {
        return MonthLayout {
            year,
            month,
            weeks: Vec::new(),
        };
    };

    let mut weeks = Vec::new();
    let mut current_week = Week { days: Vec::new() };

    // Pad back to Monday with trailing days of the previous month.
    let days_before = first_day.weekday().num_days_from_monday() as u64;
    for i in 0..days_before {
        if let Some(prev_date) = first_day.checked_sub_days(chrono::Days::new(days_before - i)) {
            current_week
                .days
                .push(build_cell(prev_date, false, today, events));
        }
    }

    let mut current_date = first_day;
    while current_date <= last_day {
        current_week
            .days
            .push(build_cell(current_date, true, today, events));

        if current_date.weekday() == Weekday::Sun {
            weeks.push(current_week);
            current_week = Week { days: Vec::new() };
        }

        let Some(next) = current_date.succ_opt() else {
            break;
        };
        current_date = next;
    }

    // Pad forward into the next month until the week closes.
    if !current_week.days.is_empty() {
        while current_week.days.len() < 7 {
            current_week
                .days
                .push(build_cell(current_date, false, today, events));
            let Some(next) = current_date.succ_opt() else {
                break;
            };
            current_date = next;
        }
        weeks.push(current_week);
    }

    MonthLayout { year, month, weeks }
}

/// Month membership is by start date, not interval overlap: a multi-day
/// leave appears on its first day only.
fn build_cell(
    date: NaiveDate,
    in_month: bool,
    today: NaiveDate,
    events: &[CanonicalEvent],
) -> DayCell {
    let mut on_day: Vec<&CanonicalEvent> = events
        .iter()
        .filter(|e| e.start.with_timezone(&Local).date_naive() == date)
        .collect();
    on_day.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.category.rank().cmp(&b.category.rank()))
            .then_with(|| a.id.cmp(&b.id))
    });

    let appointment_count = on_day.iter().filter(|e| e.is_appointment()).count();

    DayCell {
        date,
        in_month,
        is_today: date == today,
        more: on_day.len().saturating_sub(MAX_MONTH_DAY_CHIPS),
        chips: on_day
            .iter()
            .take(MAX_MONTH_DAY_CHIPS)
            .map(|event| EventChip {
                event_id: event.id.clone(),
                title: event.title.clone(),
                category: event.category,
            })
            .collect(),
        appointment_count,
        event_count: on_day.len(),
    }
}
