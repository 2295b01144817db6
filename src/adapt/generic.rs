use serde::{Deserialize, Serialize};

use super::parse_instant;
use crate::calendar::{CanonicalEvent, EventPayload, category_from_backend};

/// Ad-hoc calendar entries from the events backend: explicit start/end
/// instants plus a category code and a blocking flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub start_datetime: Option<String>,
    #[serde(default)]
    pub end_datetime: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_blocking: Option<bool>,
    #[serde(default)]
    pub reminder_minutes: Option<i64>,
}

pub fn adapt(record: &EventRecord) -> Option<CanonicalEvent> {
    let Some(start) = record.start_datetime.as_deref().and_then(parse_instant) else {
        tracing::debug!("Dropping event {}: missing or invalid start", record.id);
        return None;
    };
    let Some(end) = record.end_datetime.as_deref().and_then(parse_instant) else {
        tracing::debug!("Dropping event {}: missing or invalid end", record.id);
        return None;
    };

    let category = category_from_backend(
        record.category.as_deref().unwrap_or("MEETING"),
        record.is_blocking.unwrap_or(false),
    );

    Some(CanonicalEvent {
        id: format!("event-{}", record.id),
        category,
        title: record.title.clone().unwrap_or_default(),
        description: record.description.clone(),
        location: record.location.clone(),
        start,
        end: end.max(start),
        payload: EventPayload::None,
    })
}
