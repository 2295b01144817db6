use serde::{Deserialize, Serialize};

use super::{local_day_end, local_day_start, parse_date};
use crate::calendar::{CanonicalEvent, EventCategory, EventPayload};

/// The leave endpoint serves both snake_case and camelCase field
/// spellings depending on which backend version produced the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub id: i64,
    #[serde(default, alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(default, alias = "endDate")]
    pub end_date: Option<String>,
    #[serde(default, alias = "leaveType")]
    pub leave_type: Option<String>,
    #[serde(default, alias = "halfDay")]
    pub half_day: Option<bool>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub approved: Option<bool>,
    #[serde(default)]
    pub clinic: Option<i64>,
}

pub fn leave_type_label(code: &str) -> &'static str {
    match code {
        "sick" => "Sick Leave",
        "casual" => "Casual Leave",
        "annual" | "vacation" => "Annual Leave",
        "maternity" => "Maternity Leave",
        "paternity" => "Paternity Leave",
        "emergency" => "Emergency Leave",
        "unpaid" => "Unpaid Leave",
        _ => "Leave",
    }
}

pub fn adapt(record: &LeaveRecord) -> Option<CanonicalEvent> {
    let Some(start_date) = record.start_date.as_deref().and_then(parse_date) else {
        tracing::debug!("Dropping leave {}: missing or invalid start date", record.id);
        return None;
    };
    let Some(end_date) = record.end_date.as_deref().and_then(parse_date) else {
        tracing::debug!("Dropping leave {}: missing or invalid end date", record.id);
        return None;
    };
    let end_date = end_date.max(start_date);

    let leave_type = record.leave_type.clone().unwrap_or_else(|| "other".to_string());

    Some(CanonicalEvent {
        id: format!("leave-{}", record.id),
        category: EventCategory::Leave,
        title: leave_type_label(&leave_type).to_string(),
        description: record.reason.clone(),
        location: None,
        start: local_day_start(start_date)?,
        end: local_day_end(end_date)?,
        payload: EventPayload::Leave {
            leave_type,
            approved: record.approved.unwrap_or(true),
            half_day: record.half_day.unwrap_or(false),
        },
    })
}
