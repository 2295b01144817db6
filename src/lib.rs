pub mod adapt;
pub mod aggregate;
pub mod app;
pub mod calendar;
pub mod filter;
pub mod reminder;
pub mod slots;
pub mod storage;
pub mod sync;
pub mod ui;

pub use app::{ScheduleError, ScheduleState, Scheduler, SourceKind, WorkingHours};
pub use calendar::{CanonicalEvent, EventCategory, EventPayload};
pub use filter::FilterState;
pub use slots::Density;

pub use reminder::{ReminderNotice, ReminderScheduler};
