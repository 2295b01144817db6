use serde::{Deserialize, Serialize};

/// Render/permission bucket for every canonical event, regardless of
/// which source produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    OpdAppointment,
    Holiday,
    Leave,
    Meeting,
    Task,
    Reminder,
    Personal,
    TimeBlock,
}

impl EventCategory {
    pub fn all() -> [EventCategory; 8] {
        [
            EventCategory::OpdAppointment,
            EventCategory::Holiday,
            EventCategory::Leave,
            EventCategory::Meeting,
            EventCategory::Task,
            EventCategory::Reminder,
            EventCategory::Personal,
            EventCategory::TimeBlock,
        ]
    }

    /// Appointments, holidays, leaves and tasks are owned by their
    /// upstream systems and stay read-only here.
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            EventCategory::Meeting
                | EventCategory::Reminder
                | EventCategory::Personal
                | EventCategory::TimeBlock
        )
    }

    /// Secondary ordering key for events with an equal start instant.
    pub fn rank(&self) -> u8 {
        match self {
            EventCategory::OpdAppointment => 0,
            EventCategory::Holiday => 1,
            EventCategory::Leave => 2,
            EventCategory::Task => 3,
            EventCategory::Meeting => 4,
            EventCategory::Reminder => 5,
            EventCategory::Personal => 6,
            EventCategory::TimeBlock => 7,
        }
    }
}

/// Maps the events backend's category code to a frontend category.
/// A blocking `PERSONAL` entry is a time block; unknown codes fall back
/// to `Meeting` rather than dropping the record.
pub fn category_from_backend(code: &str, is_blocking: bool) -> EventCategory {
    match code {
        "MEETING" => EventCategory::Meeting,
        "REMINDER" => EventCategory::Reminder,
        "PERSONAL" if is_blocking => EventCategory::TimeBlock,
        "PERSONAL" => EventCategory::Personal,
        other => {
            tracing::debug!("Unknown backend category '{}', treating as meeting", other);
            EventCategory::Meeting
        }
    }
}

/// Exact inverse of [`category_from_backend`], used when creating an
/// event. Read-only categories have no backend code and return `None`.
pub fn category_to_backend(category: EventCategory) -> Option<(&'static str, bool)> {
    match category {
        EventCategory::Meeting => Some(("MEETING", false)),
        EventCategory::Reminder => Some(("REMINDER", false)),
        EventCategory::Personal => Some(("PERSONAL", false)),
        EventCategory::TimeBlock => Some(("PERSONAL", true)),
        _ => None,
    }
}
