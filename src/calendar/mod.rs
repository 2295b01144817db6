pub mod category;
pub mod event;

pub use category::{EventCategory, category_from_backend, category_to_backend};
pub use event::{
    AppointmentStatus, CanonicalEvent, EventPayload, TaskPriority, TaskStatus, VisitType,
};
