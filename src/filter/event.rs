use crate::filter::toggle;
use crate::model::{CalendarEvent, EventCategory};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A calendar filter as the user supplies it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventFilterInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<EventCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// A complete calendar filter. The date bounds apply to the day an event starts on and are
/// inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    pub categories: BTreeSet<EventCategory>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EventFilter {
    pub fn normalize(input: EventFilterInput) -> Self {
        Self {
            categories: input.categories.unwrap_or_default().into_iter().collect(),
            start_date: input.start_date,
            end_date: input.end_date,
        }
    }

    pub fn toggle_category(&mut self, category: EventCategory) -> bool {
        toggle(&mut self.categories, category)
    }

    pub fn has_active_filters(&self) -> bool {
        !self.categories.is_empty() || self.start_date.is_some() || self.end_date.is_some()
    }

    pub fn matches(&self, event: &CalendarEvent) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&event.category) {
            return false;
        }
        let day = event.start_day();
        if self.start_date.is_some_and(|from| day < from) {
            return false;
        }
        if self.end_date.is_some_and(|to| day > to) {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, events: &'a [CalendarEvent]) -> Vec<&'a CalendarEvent> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

impl From<EventFilterInput> for EventFilter {
    fn from(input: EventFilterInput) -> Self {
        Self::normalize(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventDraft;
    use chrono::{NaiveDateTime, Utc};
    use std::str::FromStr;

    fn event(category: EventCategory, start: &str) -> CalendarEvent {
        let start = NaiveDateTime::from_str(start).unwrap();
        EventDraft {
            title: "Termin".to_string(),
            description: None,
            category,
            start_date: start,
            end_date: start,
            location: None,
            reminder: Default::default(),
            is_all_day: false,
            recurring: None,
        }
        .into_event("e".to_string(), "u1".to_string(), Utc::now())
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_empty_input() {
        let f = EventFilter::normalize(EventFilterInput::default());
        assert!(f.categories.is_empty());
        assert!(!f.has_active_filters());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut f = EventFilter::normalize(EventFilterInput {
            categories: Some(vec![EventCategory::Work, EventCategory::Work]),
            ..Default::default()
        });
        assert_eq!(f.categories.len(), 1);
        let before = f.clone();
        f.toggle_category(EventCategory::Social);
        f.toggle_category(EventCategory::Social);
        assert_eq!(f, before);
    }

    #[test]
    fn test_date_bound_is_active() {
        let f = EventFilter::normalize(EventFilterInput {
            end_date: Some(day("2024-04-30")),
            ..Default::default()
        });
        assert!(f.has_active_filters());
    }

    #[test]
    fn test_matches_category() {
        let mut f = EventFilter::default();
        f.toggle_category(EventCategory::Uni);
        assert!(f.matches(&event(EventCategory::Uni, "2024-04-02T10:00:00")));
        assert!(!f.matches(&event(EventCategory::Work, "2024-04-02T10:00:00")));
    }

    #[test]
    fn test_matches_day_bounds_inclusive() {
        let f = EventFilter {
            start_date: Some(day("2024-04-01")),
            end_date: Some(day("2024-04-30")),
            ..Default::default()
        };
        assert!(f.matches(&event(EventCategory::Uni, "2024-04-01T00:00:00")));
        assert!(f.matches(&event(EventCategory::Uni, "2024-04-30T23:30:00")));
        assert!(!f.matches(&event(EventCategory::Uni, "2024-03-31T23:59:00")));
        assert!(!f.matches(&event(EventCategory::Uni, "2024-05-01T00:00:00")));
    }

    #[test]
    fn test_apply() {
        let events = vec![
            event(EventCategory::Health, "2024-04-02T10:00:00"),
            event(EventCategory::Social, "2024-04-03T10:00:00"),
        ];
        let mut f = EventFilter::default();
        f.toggle_category(EventCategory::Social);
        assert_eq!(f.apply(&events).len(), 1);
    }
}
