use crate::calendar::EventCategory;

/// Display metadata consumed by the presentation layer. Kept out of the
/// engine proper: nothing here affects aggregation or binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryStyle {
    pub label: &'static str,
    pub color: &'static str,
}

pub fn category_style(category: EventCategory) -> CategoryStyle {
    match category {
        EventCategory::OpdAppointment => CategoryStyle {
            label: "Appointment",
            color: "#1a73e8",
        },
        EventCategory::Holiday => CategoryStyle {
            label: "Holiday",
            color: "#e67c73",
        },
        EventCategory::Leave => CategoryStyle {
            label: "Leave",
            color: "#f4511e",
        },
        EventCategory::Meeting => CategoryStyle {
            label: "Meeting",
            color: "#33b679",
        },
        EventCategory::Task => CategoryStyle {
            label: "Task",
            color: "#f6bf26",
        },
        EventCategory::Reminder => CategoryStyle {
            label: "Reminder",
            color: "#8e24aa",
        },
        EventCategory::Personal => CategoryStyle {
            label: "Personal",
            color: "#039be5",
        },
        EventCategory::TimeBlock => CategoryStyle {
            label: "Time Block",
            color: "#616161",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_distinct_label() {
        let mut labels: Vec<&str> = EventCategory::all()
            .iter()
            .map(|c| category_style(*c).label)
            .collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 8);
    }

    #[test]
    fn colors_are_hex_strings() {
        for category in EventCategory::all() {
            let style = category_style(category);
            assert!(style.color.starts_with('#'));
            assert_eq!(style.color.len(), 7);
        }
    }
}
