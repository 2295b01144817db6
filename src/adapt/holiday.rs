use serde::{Deserialize, Serialize};

use super::{local_at, local_day_end, local_day_start, parse_date, parse_partial_time};
use crate::calendar::{CanonicalEvent, EventCategory, EventPayload};

/// Holidays share the leave endpoint's dual field spellings and may be
/// full-day or carry partial `HH:MM` bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(default, alias = "endDate")]
    pub end_date: Option<String>,
    #[serde(default, alias = "isFullDay")]
    pub is_full_day: Option<bool>,
    #[serde(default, alias = "startTime")]
    pub start_time: Option<String>,
    #[serde(default, alias = "endTime")]
    pub end_time: Option<String>,
    #[serde(default, alias = "isActive")]
    pub is_active: Option<bool>,
    #[serde(default, alias = "isApproved")]
    pub is_approved: Option<bool>,
    #[serde(default)]
    pub clinic: Option<i64>,
}

pub fn adapt(record: &HolidayRecord) -> Option<CanonicalEvent> {
    let Some(start_date) = record.start_date.as_deref().and_then(parse_date) else {
        tracing::debug!("Dropping holiday {}: missing or invalid start date", record.id);
        return None;
    };
    let Some(end_date) = record.end_date.as_deref().and_then(parse_date) else {
        tracing::debug!("Dropping holiday {}: missing or invalid end date", record.id);
        return None;
    };
    let end_date = end_date.max(start_date);

    let full_day = record.is_full_day.unwrap_or(true);
    let (start, end) = if full_day {
        (local_day_start(start_date)?, local_day_end(end_date)?)
    } else {
        // Partial-day holidays default each missing bound to the day edge.
        let start = match record.start_time.as_deref().and_then(parse_partial_time) {
            Some(time) => local_at(start_date, time),
            None => local_day_start(start_date)?,
        };
        let end = match record.end_time.as_deref().and_then(parse_partial_time) {
            Some(time) => local_at(end_date, time),
            None => local_day_end(end_date)?,
        };
        (start, end.max(start))
    };

    Some(CanonicalEvent {
        id: format!("holiday-{}", record.id),
        category: EventCategory::Holiday,
        title: record
            .title
            .clone()
            .unwrap_or_else(|| "Clinic Holiday".to_string()),
        description: None,
        location: None,
        start,
        end,
        payload: EventPayload::Holiday {
            full_day,
            approved: record.is_approved.unwrap_or(true),
        },
    })
}
