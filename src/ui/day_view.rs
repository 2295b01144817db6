use chrono::{DateTime, Local, NaiveDate, Timelike, Utc};

use crate::calendar::{CanonicalEvent, EventCategory};
use crate::slots::{Density, bind_slot_partitioned, generate_slots};

/// Per-slot display caps; each bucket truncates independently.
pub const MAX_SLOT_APPOINTMENTS: usize = 3;
pub const MAX_SLOT_OTHERS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub is_today: bool,
    pub slots: Vec<SlotRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotRow {
    pub offset_minutes: u32,
    pub appointments: Vec<EventEntry>,
    pub more_appointments: usize,
    pub others: Vec<EventEntry>,
    pub more_others: usize,
    /// True when the viewed day is today and the wall clock sits inside
    /// this slot; `now_fraction` then gives the marker position.
    pub is_current: bool,
    pub now_fraction: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventEntry {
    pub event_id: String,
    pub title: String,
    pub category: EventCategory,
    pub duration_minutes: i64,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl EventEntry {
    fn from_event(event: &CanonicalEvent) -> Self {
        Self {
            event_id: event.id.clone(),
            title: event.title.clone(),
            category: event.category,
            duration_minutes: event.duration_minutes(),
            location: event.location.clone(),
            description: event.description.clone(),
        }
    }
}

pub fn calculate_layout(
    date: NaiveDate,
    events: &[CanonicalEvent],
    work_start_hour: u32,
    work_end_hour: u32,
    density: Density,
    now: DateTime<Utc>,
) -> DayLayout {
    let local_now = now.with_timezone(&Local);
    let is_today = date == local_now.date_naive();
    let now_offset = local_now.hour() * 60 + local_now.minute();
    let step = density.minutes();

    let slots = generate_slots(work_start_hour, work_end_hour, density)
        .into_iter()
        .map(|offset| {
            let binding = bind_slot_partitioned(offset, date, density, events);

            let is_current = is_today && offset <= now_offset && now_offset < offset + step;
            let now_fraction =
                is_current.then(|| (now_offset - offset) as f32 / step as f32);

            SlotRow {
                offset_minutes: offset,
                more_appointments: binding.appointments.len().saturating_sub(MAX_SLOT_APPOINTMENTS),
                appointments: binding
                    .appointments
                    .iter()
                    .take(MAX_SLOT_APPOINTMENTS)
                    .map(|e| EventEntry::from_event(e))
                    .collect(),
                more_others: binding.others.len().saturating_sub(MAX_SLOT_OTHERS),
                others: binding
                    .others
                    .iter()
                    .take(MAX_SLOT_OTHERS)
                    .map(|e| EventEntry::from_event(e))
                    .collect(),
                is_current,
                now_fraction,
            }
        })
        .collect();

    DayLayout {
        date,
        is_today,
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapt::local_at;
    use crate::calendar::EventPayload;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn at(day: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
        local_at(day, NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
    }

    fn create_event(
        id: &str,
        category: EventCategory,
        day: NaiveDate,
        hour: u32,
        minute: u32,
        duration_minutes: i64,
    ) -> CanonicalEvent {
        let start = at(day, hour, minute);
        CanonicalEvent {
            id: id.to_string(),
            category,
            title: format!("Event {}", id),
            description: None,
            location: None,
            start,
            end: start + chrono::Duration::minutes(duration_minutes),
            payload: EventPayload::None,
        }
    }

    #[test]
    fn layout_covers_the_working_day() {
        let day = date(2024, 6, 10);
        let layout = calculate_layout(day, &[], 9, 21, Density::Fifteen, at(day, 8, 0));

        assert_eq!(layout.date, day);
        assert_eq!(layout.slots.len(), 48);
        assert_eq!(layout.slots[0].offset_minutes, 540);
        assert_eq!(layout.slots[47].offset_minutes, 1245);
    }

    #[test]
    fn events_appear_in_their_slots() {
        let day = date(2024, 6, 10);
        let events = vec![create_event(
            "m1",
            EventCategory::Meeting,
            day,
            9,
            10,
            10,
        )];

        let layout = calculate_layout(day, &events, 9, 21, Density::Fifteen, at(day, 8, 0));

        // 09:10–09:20 straddles the 09:00 and 09:15 slots.
        assert_eq!(layout.slots[0].others.len(), 1);
        assert_eq!(layout.slots[0].others[0].event_id, "m1");
        assert_eq!(layout.slots[1].others.len(), 1);
        assert!(layout.slots[2].others.is_empty());
    }

    #[test]
    fn appointments_and_others_fill_separate_buckets() {
        let day = date(2024, 6, 10);
        let events = vec![
            create_event("appt-1", EventCategory::OpdAppointment, day, 9, 0, 15),
            create_event("task-1", EventCategory::Task, day, 9, 0, 15),
        ];

        let layout = calculate_layout(day, &events, 9, 21, Density::Fifteen, at(day, 8, 0));

        let slot = &layout.slots[0];
        assert_eq!(slot.appointments.len(), 1);
        assert_eq!(slot.others.len(), 1);
    }

    #[test]
    fn each_bucket_truncates_independently() {
        let day = date(2024, 6, 10);
        let mut events = Vec::new();
        for i in 0..5 {
            events.push(create_event(
                &format!("appt-{}", i),
                EventCategory::OpdAppointment,
                day,
                9,
                0,
                15,
            ));
        }
        for i in 0..4 {
            events.push(create_event(
                &format!("task-{}", i),
                EventCategory::Task,
                day,
                9,
                0,
                15,
            ));
        }

        let layout = calculate_layout(day, &events, 9, 21, Density::Fifteen, at(day, 8, 0));

        let slot = &layout.slots[0];
        assert_eq!(slot.appointments.len(), MAX_SLOT_APPOINTMENTS);
        assert_eq!(slot.more_appointments, 2);
        assert_eq!(slot.others.len(), MAX_SLOT_OTHERS);
        assert_eq!(slot.more_others, 1);
    }

    #[test]
    fn no_truncation_under_the_cap() {
        let day = date(2024, 6, 10);
        let events = vec![create_event(
            "appt-1",
            EventCategory::OpdAppointment,
            day,
            9,
            0,
            15,
        )];

        let layout = calculate_layout(day, &events, 9, 21, Density::Fifteen, at(day, 8, 0));

        assert_eq!(layout.slots[0].more_appointments, 0);
        assert_eq!(layout.slots[0].more_others, 0);
    }

    #[test]
    fn now_marker_lands_in_exactly_one_slot() {
        let day = date(2024, 6, 10);
        let now = at(day, 9, 20);

        let layout = calculate_layout(day, &[], 9, 21, Density::Fifteen, now);

        let current: Vec<&SlotRow> = layout.slots.iter().filter(|s| s.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].offset_minutes, 555);
        assert_eq!(current[0].now_fraction, Some(5.0 / 15.0));
    }

    #[test]
    fn now_marker_absent_on_other_days() {
        let day = date(2024, 6, 10);
        let now = at(date(2024, 6, 11), 9, 20);

        let layout = calculate_layout(day, &[], 9, 21, Density::Fifteen, now);

        assert!(!layout.is_today);
        assert!(layout.slots.iter().all(|s| !s.is_current));
        assert!(layout.slots.iter().all(|s| s.now_fraction.is_none()));
    }

    #[test]
    fn now_outside_working_hours_marks_no_slot() {
        let day = date(2024, 6, 10);
        let now = at(day, 7, 30);

        let layout = calculate_layout(day, &[], 9, 21, Density::Fifteen, now);

        assert!(layout.is_today);
        assert!(layout.slots.iter().all(|s| !s.is_current));
    }

    #[test]
    fn entries_keep_event_details() {
        let day = date(2024, 6, 10);
        let mut event = create_event("m1", EventCategory::Meeting, day, 10, 0, 45);
        event.location = Some("Ward B".to_string());

        let layout = calculate_layout(day, &[event], 9, 21, Density::Fifteen, at(day, 8, 0));

        let slot = &layout.slots[4];
        assert_eq!(slot.offset_minutes, 600);
        assert_eq!(slot.others[0].duration_minutes, 45);
        assert_eq!(slot.others[0].location.as_deref(), Some("Ward B"));
    }
}
