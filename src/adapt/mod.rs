//! Source adapters. Each submodule converts one external record shape
//! into a [`CanonicalEvent`](crate::calendar::CanonicalEvent), returning
//! `None` when required temporal fields are missing or unparsable —
//! malformed records are dropped, never fatal.

pub mod appointment;
pub mod generic;
pub mod holiday;
pub mod leave;
pub mod task;

pub use appointment::AppointmentRecord;
pub use generic::EventRecord;
pub use holiday::HolidayRecord;
pub use leave::LeaveRecord;
pub use task::TaskRecord;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Interprets a naive wall-clock time in the viewer's local zone.
/// Times skipped by a DST jump fall back to a plain UTC reading.
fn to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

pub(crate) fn local_day_start(date: NaiveDate) -> Option<DateTime<Utc>> {
    Some(to_utc(date.and_hms_opt(0, 0, 0)?))
}

/// End of the local day, `23:59:59.999`, the all-day expansion bound.
pub(crate) fn local_day_end(date: NaiveDate) -> Option<DateTime<Utc>> {
    Some(to_utc(date.and_hms_milli_opt(23, 59, 59, 999)?))
}

pub(crate) fn local_at(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    to_utc(date.and_time(time))
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub(crate) fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub(crate) fn parse_partial_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}
