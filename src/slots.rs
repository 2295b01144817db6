use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::adapt::local_day_start;
use crate::calendar::CanonicalEvent;

/// Slot granularity. The working day is cut into slots of this width;
/// changing it regenerates every derived offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Density {
    Ten,
    Fifteen,
    Thirty,
}

impl Density {
    pub fn minutes(self) -> u32 {
        match self {
            Density::Ten => 10,
            Density::Fifteen => 15,
            Density::Thirty => 30,
        }
    }

    pub fn from_minutes(minutes: u32) -> Option<Density> {
        match minutes {
            10 => Some(Density::Ten),
            15 => Some(Density::Fifteen),
            30 => Some(Density::Thirty),
            _ => None,
        }
    }
}

impl Default for Density {
    fn default() -> Self {
        Density::Fifteen
    }
}

/// Slot-start offsets in minutes from midnight, covering
/// `[work_start_hour:00, work_end_hour:00)`. The end bound is excluded.
pub fn generate_slots(work_start_hour: u32, work_end_hour: u32, density: Density) -> Vec<u32> {
    let step = density.minutes();
    let end = work_end_hour * 60;

    let mut offsets = Vec::new();
    let mut offset = work_start_hour * 60;
    while offset < end {
        offsets.push(offset);
        offset += step;
    }
    offsets
}

pub fn slot_bounds(
    day: NaiveDate,
    slot_offset: u32,
    density: Density,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = local_day_start(day)? + Duration::minutes(slot_offset as i64);
    Some((start, start + Duration::minutes(density.minutes() as i64)))
}

/// The containment checks restate the general rule for well-formed
/// intervals; they keep zero-length and inverted intervals bound to the
/// slots holding their endpoints instead of vanishing from the day.
fn overlaps_slot(
    event: &CanonicalEvent,
    slot_start: DateTime<Utc>,
    slot_end: DateTime<Utc>,
) -> bool {
    let general = event.start < slot_end && event.end > slot_start;
    let starts_inside = event.start >= slot_start && event.start < slot_end;
    let ends_inside = event.end >= slot_start && event.end < slot_end;
    general || starts_inside || ends_inside
}

/// Every event whose interval overlaps the slot, ordered by start, then
/// category rank, then id.
pub fn bind_slot<'a>(
    slot_offset: u32,
    day: NaiveDate,
    density: Density,
    events: &'a [CanonicalEvent],
) -> Vec<&'a CanonicalEvent> {
    let Some((slot_start, slot_end)) = slot_bounds(day, slot_offset, density) else {
        return Vec::new();
    };

    let mut bound: Vec<&CanonicalEvent> = events
        .iter()
        .filter(|event| overlaps_slot(event, slot_start, slot_end))
        .collect();
    bound.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.category.rank().cmp(&b.category.rank()))
            .then_with(|| a.id.cmp(&b.id))
    });
    bound
}

/// A bound slot split into its two render buckets. Appointments and
/// other events are shown and truncated independently.
#[derive(Debug, Clone)]
pub struct SlotBinding<'a> {
    pub appointments: Vec<&'a CanonicalEvent>,
    pub others: Vec<&'a CanonicalEvent>,
}

pub fn bind_slot_partitioned<'a>(
    slot_offset: u32,
    day: NaiveDate,
    density: Density,
    events: &'a [CanonicalEvent],
) -> SlotBinding<'a> {
    let (appointments, others) = bind_slot(slot_offset, day, density, events)
        .into_iter()
        .partition(|event| event.is_appointment());
    SlotBinding {
        appointments,
        others,
    }
}
