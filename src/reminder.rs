use std::collections::HashMap;

use chrono::{DateTime, Local, NaiveDate, Utc};
use tokio::sync::mpsc;

use crate::calendar::CanonicalEvent;

pub const TICK_INTERVAL_SECONDS: u64 = 60;
pub const DEFAULT_LEAD_MINUTES: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArmState {
    Idle,
    Armed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReminderNotice {
    pub event_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub minutes_until: i64,
}

/// Flags today's appointments once when they enter the lead window.
/// An appointment arms on the first tick where it is due within
/// `lead_minutes` and never re-arms the same day; the armed set clears
/// when the local date rolls over.
pub struct ReminderScheduler {
    lead_minutes: i64,
    states: HashMap<String, ArmState>,
    armed_day: Option<NaiveDate>,
}

impl ReminderScheduler {
    pub fn new(lead_minutes: i64) -> Self {
        Self {
            lead_minutes,
            states: HashMap::new(),
            armed_day: None,
        }
    }

    pub fn tick(&mut self, now: DateTime<Utc>, events: &[CanonicalEvent]) -> Vec<ReminderNotice> {
        let today = now.with_timezone(&Local).date_naive();
        if self.armed_day != Some(today) {
            self.states.clear();
            self.armed_day = Some(today);
        }

        let mut notices = Vec::new();
        for event in events.iter().filter(|e| e.is_appointment()) {
            if event.start.with_timezone(&Local).date_naive() != today {
                continue;
            }

            let minutes_until = (event.start - now).num_minutes();
            if minutes_until <= 0 || minutes_until > self.lead_minutes {
                continue;
            }

            let state = self.states.entry(event.id.clone()).or_insert(ArmState::Idle);
            if *state == ArmState::Armed {
                continue;
            }
            *state = ArmState::Armed;

            tracing::info!(
                "Reminder armed for {}: starts in {} minutes",
                event.id,
                minutes_until
            );
            notices.push(ReminderNotice {
                event_id: event.id.clone(),
                title: event.title.clone(),
                start: event.start,
                minutes_until,
            });
        }
        notices
    }
}

/// Drives the scheduler on a wall-clock minute tick, forwarding notices
/// until the receiving side goes away.
pub async fn run<F>(
    mut scheduler: ReminderScheduler,
    snapshot: F,
    notify: mpsc::Sender<ReminderNotice>,
) where
    F: Fn() -> Vec<CanonicalEvent>,
{
    let mut interval =
        tokio::time::interval(std::time::Duration::from_secs(TICK_INTERVAL_SECONDS));
    loop {
        interval.tick().await;
        let events = snapshot();
        for notice in scheduler.tick(Utc::now(), &events) {
            if notify.send(notice).await.is_err() {
                return;
            }
        }
    }
}
