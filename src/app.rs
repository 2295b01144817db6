use chrono::{DateTime, Local, NaiveDate, Utc};
use thiserror::Error;

use crate::adapt::{AppointmentRecord, appointment};
use crate::aggregate::aggregate;
use crate::calendar::{CanonicalEvent, EventCategory};
use crate::filter::{self, FilterState};
use crate::slots::Density;
use crate::storage::config::Config;
use crate::sync::event_api::EventDraft;
use crate::sync::{ApiError, RequestState, SyncEngine};
use crate::ui::day_view::{self, DayLayout};
use crate::ui::month_view::{self, MonthLayout};
use crate::ui::week_view::{self, WeekLayout};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("{0:?} records are read-only and cannot be changed here")]
    ReadOnlyCategory(EventCategory),
    #[error("Unknown event: {0}")]
    UnknownEvent(String),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// The four fetched sources. Appointments are supplied pre-shaped by
/// the booking system and have no fetch lifecycle here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Tasks = 0,
    Leaves = 1,
    Holidays = 2,
    Events = 3,
}

#[derive(Debug, Clone, Copy, Default)]
struct SourceStatus {
    state: RequestState,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 21,
        }
    }
}

/// All engine inputs plus the derived snapshots. Every input change
/// goes through a mutator that calls `recompute`; the aggregate and the
/// filtered view are rebuilt from scratch, never patched in place.
pub struct ScheduleState {
    appointments: Vec<CanonicalEvent>,
    tasks: Vec<CanonicalEvent>,
    leaves: Vec<CanonicalEvent>,
    holidays: Vec<CanonicalEvent>,
    events: Vec<CanonicalEvent>,
    statuses: [SourceStatus; 4],
    filters: FilterState,
    density: Density,
    working_hours: WorkingHours,
    view_date: NaiveDate,
    aggregated: Vec<CanonicalEvent>,
    filtered: Vec<CanonicalEvent>,
}

impl ScheduleState {
    pub fn new() -> Self {
        Self {
            appointments: Vec::new(),
            tasks: Vec::new(),
            leaves: Vec::new(),
            holidays: Vec::new(),
            events: Vec::new(),
            statuses: [SourceStatus::default(); 4],
            filters: FilterState::default(),
            density: Density::default(),
            working_hours: WorkingHours::default(),
            view_date: Local::now().date_naive(),
            aggregated: Vec::new(),
            filtered: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut state = Self::new();
        state.density = config.density();
        state.working_hours = WorkingHours {
            start_hour: config.schedule.work_start_hour,
            end_hour: config.schedule.work_end_hour,
        };
        state
    }

    fn status_mut(&mut self, kind: SourceKind) -> &mut SourceStatus {
        &mut self.statuses[kind as usize]
    }

    fn collection_mut(&mut self, kind: SourceKind) -> &mut Vec<CanonicalEvent> {
        match kind {
            SourceKind::Tasks => &mut self.tasks,
            SourceKind::Leaves => &mut self.leaves,
            SourceKind::Holidays => &mut self.holidays,
            SourceKind::Events => &mut self.events,
        }
    }

    pub fn request_state(&self, kind: SourceKind) -> RequestState {
        self.statuses[kind as usize].state
    }

    /// Starts a refresh cycle for a source. Returns the generation to
    /// hand back on completion, or `None` when a request is already in
    /// flight and this one coalesces into it.
    pub fn begin_refresh(&mut self, kind: SourceKind) -> Option<u64> {
        let status = self.status_mut(kind);
        if status.state == RequestState::InFlight {
            return None;
        }
        status.state = RequestState::InFlight;
        status.generation += 1;
        Some(status.generation)
    }

    /// Applies a completed fetch. A result from a superseded cycle is
    /// discarded; the newest fetch wins. Returns whether it applied.
    pub fn finish_refresh(
        &mut self,
        kind: SourceKind,
        generation: u64,
        events: Vec<CanonicalEvent>,
    ) -> bool {
        if self.status_mut(kind).generation != generation {
            return false;
        }
        self.status_mut(kind).state = RequestState::Done;
        *self.collection_mut(kind) = events;
        self.recompute();
        true
    }

    /// A failed fetch leaves the source empty for this cycle.
    pub fn fail_refresh(&mut self, kind: SourceKind, generation: u64) {
        if self.status_mut(kind).generation != generation {
            return;
        }
        self.status_mut(kind).state = RequestState::Done;
        self.collection_mut(kind).clear();
        self.recompute();
    }

    pub fn set_appointments(&mut self, records: &[AppointmentRecord]) {
        self.appointments = records.iter().filter_map(appointment::adapt).collect();
        self.recompute();
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.recompute();
    }

    pub fn set_density(&mut self, density: Density) {
        self.density = density;
    }

    pub fn set_working_hours(&mut self, working_hours: WorkingHours) {
        self.working_hours = working_hours;
    }

    pub fn set_view_date(&mut self, date: NaiveDate) {
        self.view_date = date;
    }

    pub fn view_date(&self) -> NaiveDate {
        self.view_date
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn working_hours(&self) -> WorkingHours {
        self.working_hours
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Unfiltered aggregate; the reminder scheduler reads this.
    pub fn aggregated(&self) -> &[CanonicalEvent] {
        &self.aggregated
    }

    pub fn filtered(&self) -> &[CanonicalEvent] {
        &self.filtered
    }

    pub fn find_event(&self, event_id: &str) -> Option<&CanonicalEvent> {
        self.aggregated.iter().find(|e| e.id == event_id)
    }

    fn recompute(&mut self) {
        self.aggregated = aggregate(&[
            self.appointments.clone(),
            self.events.clone(),
            self.tasks.clone(),
            self.leaves.clone(),
            self.holidays.clone(),
        ]);
        self.filtered = filter::apply(&self.aggregated, &self.filters);
    }

    pub fn day_view(&self, date: NaiveDate, now: DateTime<Utc>) -> DayLayout {
        day_view::calculate_layout(
            date,
            &self.filtered,
            self.working_hours.start_hour,
            self.working_hours.end_hour,
            self.density,
            now,
        )
    }

    pub fn week_view(&self, date: NaiveDate, now: DateTime<Utc>) -> WeekLayout {
        week_view::calculate_layout(
            date,
            &self.filtered,
            self.working_hours.start_hour,
            self.working_hours.end_hour,
            self.density,
            now,
        )
    }

    pub fn month_view(&self, date: NaiveDate, now: DateTime<Utc>) -> MonthLayout {
        month_view::calculate_layout(date, &self.filtered, now)
    }

    /// Checks the permission rule for a mutation and resolves the
    /// event's backend id. Only ad-hoc calendar entries pass.
    fn authorize_mutation(&self, event_id: &str) -> Result<i64, ScheduleError> {
        let event = self
            .find_event(event_id)
            .ok_or_else(|| ScheduleError::UnknownEvent(event_id.to_string()))?;
        if !event.is_editable() {
            return Err(ScheduleError::ReadOnlyCategory(event.category));
        }
        event
            .id
            .strip_prefix("event-")
            .and_then(|raw| raw.parse::<i64>().ok())
            .ok_or_else(|| ScheduleError::UnknownEvent(event_id.to_string()))
    }
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pairs the schedule state with the sync engine: refresh coalescing,
/// last-fetch-wins, and the create/edit/delete surface with its
/// permission checks.
pub struct Scheduler {
    state: ScheduleState,
    engine: SyncEngine,
}

impl Scheduler {
    pub fn new(config: Config) -> Self {
        Self {
            state: ScheduleState::from_config(&config),
            engine: SyncEngine::new(config),
        }
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ScheduleState {
        &mut self.state
    }

    pub async fn refresh_all(&mut self) {
        for kind in [
            SourceKind::Tasks,
            SourceKind::Leaves,
            SourceKind::Holidays,
            SourceKind::Events,
        ] {
            self.refresh(kind).await;
        }
    }

    pub async fn refresh(&mut self, kind: SourceKind) {
        let Some(generation) = self.state.begin_refresh(kind) else {
            tracing::debug!("{:?} refresh already in flight, coalescing", kind);
            return;
        };

        let result = match kind {
            SourceKind::Tasks => self.engine.refresh_tasks().await,
            SourceKind::Leaves => self.engine.refresh_leaves().await,
            SourceKind::Holidays => self.engine.refresh_holidays().await,
            SourceKind::Events => self.engine.refresh_events().await,
        };

        match result {
            Ok(events) => {
                if !self.state.finish_refresh(kind, generation, events) {
                    tracing::debug!("Discarding superseded {:?} fetch", kind);
                }
            }
            Err(ApiError::AuthenticationFailed) => {
                // The session layer owns expiry; no user-facing notice.
                tracing::error!("{:?} refresh hit an expired session", kind);
                self.state.fail_refresh(kind, generation);
            }
            Err(err) => {
                tracing::warn!("{:?} refresh failed: {}", kind, err);
                self.state.fail_refresh(kind, generation);
            }
        }
    }

    pub async fn add_event(&mut self, draft: EventDraft) -> Result<(), ScheduleError> {
        if !draft.category.is_editable() {
            return Err(ScheduleError::ReadOnlyCategory(draft.category));
        }
        self.engine.create_event(&draft).await?;
        self.refresh(SourceKind::Events).await;
        Ok(())
    }

    pub async fn edit_event(
        &mut self,
        event_id: &str,
        draft: EventDraft,
    ) -> Result<(), ScheduleError> {
        if !draft.category.is_editable() {
            return Err(ScheduleError::ReadOnlyCategory(draft.category));
        }
        let backend_id = self.state.authorize_mutation(event_id)?;
        self.engine.update_event(backend_id, &draft).await?;
        self.refresh(SourceKind::Events).await;
        Ok(())
    }

    pub async fn delete_event(&mut self, event_id: &str) -> Result<(), ScheduleError> {
        let backend_id = self.state.authorize_mutation(event_id)?;
        self.engine.delete_event(backend_id).await?;
        self.refresh(SourceKind::Events).await;
        Ok(())
    }
}
