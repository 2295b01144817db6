use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::EventCategory;

/// The unified representation of any schedulable item. Every source
/// adapter produces these; everything downstream (aggregation, filters,
/// slot binding, layouts) consumes nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    pub id: String,
    pub category: EventCategory,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub payload: EventPayload,
}

/// Category-specific fields carried alongside the common shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPayload {
    Appointment {
        status: AppointmentStatus,
        visit_type: VisitType,
    },
    Task {
        priority: TaskPriority,
        status: TaskStatus,
    },
    Leave {
        leave_type: String,
        approved: bool,
        half_day: bool,
    },
    Holiday {
        full_day: bool,
        approved: bool,
    },
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitType {
    FirstVisit,
    FollowUp,
    WalkIn,
    Procedure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl CanonicalEvent {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn overlaps(&self, other: &CanonicalEvent) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn is_editable(&self) -> bool {
        self.category.is_editable()
    }

    pub fn is_appointment(&self) -> bool {
        self.category == EventCategory::OpdAppointment
    }

    pub fn appointment_status(&self) -> Option<AppointmentStatus> {
        match self.payload {
            EventPayload::Appointment { status, .. } => Some(status),
            _ => None,
        }
    }

    pub fn visit_type(&self) -> Option<VisitType> {
        match self.payload {
            EventPayload::Appointment { visit_type, .. } => Some(visit_type),
            _ => None,
        }
    }
}
