use std::collections::HashSet;

use crate::calendar::{AppointmentStatus, CanonicalEvent, EventCategory, VisitType};

/// The three independent filter dimensions. An empty visit-type or
/// status set means "no constraint" for the appointment sub-filters;
/// an empty category set excludes everything.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub categories: HashSet<EventCategory>,
    pub visit_types: HashSet<VisitType>,
    pub statuses: HashSet<AppointmentStatus>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            categories: EventCategory::all().into_iter().collect(),
            visit_types: HashSet::new(),
            statuses: HashSet::new(),
        }
    }
}

impl FilterState {
    pub fn allows(&self, event: &CanonicalEvent) -> bool {
        if !self.categories.contains(&event.category) {
            return false;
        }
        if event.category != EventCategory::OpdAppointment {
            return true;
        }

        let visit_type_ok = self.visit_types.is_empty()
            || event
                .visit_type()
                .is_some_and(|v| self.visit_types.contains(&v));
        let status_ok = self.statuses.is_empty()
            || event
                .appointment_status()
                .is_some_and(|s| self.statuses.contains(&s));

        visit_type_ok && status_ok
    }
}

pub fn apply(events: &[CanonicalEvent], filters: &FilterState) -> Vec<CanonicalEvent> {
    events
        .iter()
        .filter(|event| filters.allows(event))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::EventPayload;
    use chrono::Utc;
    use proptest::prelude::*;

    fn create_test_event(id: &str, category: EventCategory) -> CanonicalEvent {
        let start = Utc::now();
        CanonicalEvent {
            id: id.to_string(),
            category,
            title: format!("Event {}", id),
            description: None,
            location: None,
            start,
            end: start + chrono::Duration::minutes(30),
            payload: EventPayload::None,
        }
    }

    fn create_appointment(
        id: &str,
        status: AppointmentStatus,
        visit_type: VisitType,
    ) -> CanonicalEvent {
        let mut event = create_test_event(id, EventCategory::OpdAppointment);
        event.payload = EventPayload::Appointment { status, visit_type };
        event
    }

    #[test]
    fn default_filters_allow_everything() {
        let filters = FilterState::default();
        for category in EventCategory::all() {
            assert!(filters.allows(&create_test_event("e", category)));
        }
    }

    #[test]
    fn empty_category_set_excludes_all() {
        let filters = FilterState {
            categories: HashSet::new(),
            ..FilterState::default()
        };

        for category in EventCategory::all() {
            assert!(!filters.allows(&create_test_event("e", category)));
        }
    }

    #[test]
    fn deselected_category_is_dropped() {
        let mut filters = FilterState::default();
        filters.categories.remove(&EventCategory::Task);

        assert!(!filters.allows(&create_test_event("t", EventCategory::Task)));
        assert!(filters.allows(&create_test_event("m", EventCategory::Meeting)));
    }

    #[test]
    fn status_filter_applies_to_appointments_only() {
        let mut filters = FilterState::default();
        filters.statuses.insert(AppointmentStatus::Confirmed);

        let confirmed =
            create_appointment("a1", AppointmentStatus::Confirmed, VisitType::FirstVisit);
        let cancelled =
            create_appointment("a2", AppointmentStatus::Cancelled, VisitType::FirstVisit);
        let task = create_test_event("t1", EventCategory::Task);

        assert!(filters.allows(&confirmed));
        assert!(!filters.allows(&cancelled));
        assert!(filters.allows(&task));
    }

    #[test]
    fn visit_type_filter_applies_to_appointments_only() {
        let mut filters = FilterState::default();
        filters.visit_types.insert(VisitType::FollowUp);

        let follow_up =
            create_appointment("a1", AppointmentStatus::Scheduled, VisitType::FollowUp);
        let walk_in = create_appointment("a2", AppointmentStatus::Scheduled, VisitType::WalkIn);
        let meeting = create_test_event("m1", EventCategory::Meeting);

        assert!(filters.allows(&follow_up));
        assert!(!filters.allows(&walk_in));
        assert!(filters.allows(&meeting));
    }

    #[test]
    fn empty_sub_filters_do_not_constrain_appointments() {
        let filters = FilterState::default();
        let appointment =
            create_appointment("a1", AppointmentStatus::NoShow, VisitType::Procedure);

        assert!(filters.allows(&appointment));
    }

    #[test]
    fn both_sub_filters_must_match() {
        let mut filters = FilterState::default();
        filters.statuses.insert(AppointmentStatus::Confirmed);
        filters.visit_types.insert(VisitType::FirstVisit);

        let matching =
            create_appointment("a1", AppointmentStatus::Confirmed, VisitType::FirstVisit);
        let wrong_type =
            create_appointment("a2", AppointmentStatus::Confirmed, VisitType::WalkIn);

        assert!(filters.allows(&matching));
        assert!(!filters.allows(&wrong_type));
    }

    fn category_set_from_mask(mask: u8) -> HashSet<EventCategory> {
        EventCategory::all()
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, c)| c)
            .collect()
    }

    proptest! {
        #[test]
        fn removing_a_category_never_grows_the_result(
            category_indices in proptest::collection::vec(0usize..8, 0..40),
            selected_mask in 0u8..=255,
            removed_index in 0usize..8,
        ) {
            let all = EventCategory::all();
            let events: Vec<CanonicalEvent> = category_indices
                .iter()
                .enumerate()
                .map(|(i, &c)| create_test_event(&format!("e{}", i), all[c]))
                .collect();

            let mut filters = FilterState {
                categories: category_set_from_mask(selected_mask),
                ..FilterState::default()
            };

            let before = apply(&events, &filters).len();
            filters.categories.remove(&all[removed_index]);
            let after = apply(&events, &filters).len();

            prop_assert!(after <= before);
        }

        #[test]
        fn filtered_events_always_belong_to_selected_categories(
            category_indices in proptest::collection::vec(0usize..8, 0..40),
            selected_mask in 0u8..=255,
        ) {
            let all = EventCategory::all();
            let events: Vec<CanonicalEvent> = category_indices
                .iter()
                .enumerate()
                .map(|(i, &c)| create_test_event(&format!("e{}", i), all[c]))
                .collect();

            let filters = FilterState {
                categories: category_set_from_mask(selected_mask),
                ..FilterState::default()
            };

            for event in apply(&events, &filters) {
                prop_assert!(filters.categories.contains(&event.category));
            }
        }
    }
}
