use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{AppointmentStatus, CanonicalEvent, EventCategory, EventPayload, VisitType};

/// Appointment records arrive pre-shaped from the booking system; the
/// adapter only retypes them and namespaces the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: String,
    pub patient_name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub visit_type: VisitType,
    pub reason: Option<String>,
    pub room: Option<String>,
}

pub fn adapt(record: &AppointmentRecord) -> Option<CanonicalEvent> {
    Some(CanonicalEvent {
        id: format!("appt-{}", record.id),
        category: EventCategory::OpdAppointment,
        title: record.patient_name.clone(),
        description: record.reason.clone(),
        location: record.room.clone(),
        start: record.start,
        end: record.end.max(record.start),
        payload: EventPayload::Appointment {
            status: record.status,
            visit_type: record.visit_type,
        },
    })
}
