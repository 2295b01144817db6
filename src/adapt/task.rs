use serde::{Deserialize, Serialize};

use super::parse_instant;
use crate::calendar::{CanonicalEvent, EventCategory, EventPayload, TaskPriority, TaskStatus};

/// Tasks carry a single due instant; on the timeline they occupy a
/// fixed default window starting there.
pub const DEFAULT_TASK_DURATION_MINUTES: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
}

pub fn adapt(record: &TaskRecord) -> Option<CanonicalEvent> {
    let Some(due) = record.due_date.as_deref().and_then(parse_instant) else {
        tracing::debug!("Dropping task {}: missing or invalid due date", record.id);
        return None;
    };

    Some(CanonicalEvent {
        id: format!("task-{}", record.id),
        category: EventCategory::Task,
        title: record.title.clone(),
        description: record.description.clone(),
        location: None,
        start: due,
        end: due + chrono::Duration::minutes(DEFAULT_TASK_DURATION_MINUTES),
        payload: EventPayload::Task {
            priority: task_priority(record.priority.as_deref()),
            status: task_status(record.status.as_deref()),
        },
    })
}

fn task_priority(value: Option<&str>) -> TaskPriority {
    match value {
        Some("low") => TaskPriority::Low,
        Some("high") => TaskPriority::High,
        Some("urgent") => TaskPriority::Urgent,
        _ => TaskPriority::Medium,
    }
}

fn task_status(value: Option<&str>) -> TaskStatus {
    match value {
        Some("in_progress") => TaskStatus::InProgress,
        Some("completed") => TaskStatus::Completed,
        _ => TaskStatus::Pending,
    }
}
