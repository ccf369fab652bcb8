use crate::model::CalendarEvent;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// How many upcoming events the dashboard lists.
pub const DEFAULT_UPCOMING: usize = 5;

/// The events that start on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaDay<'a> {
    pub date: NaiveDate,
    pub events: Vec<&'a CalendarEvent>,
}

/// Groups events by the day they start on. Days are ascending and the events of a day are ordered
/// by start time.
pub fn agenda(events: &[CalendarEvent]) -> Vec<AgendaDay<'_>> {
    let mut days: BTreeMap<NaiveDate, Vec<&CalendarEvent>> = BTreeMap::new();
    for event in events {
        days.entry(event.start_day()).or_default().push(event);
    }
    days.into_iter()
        .map(|(date, mut events)| {
            events.sort_by_key(|e| e.start_date);
            AgendaDay { date, events }
        })
        .collect()
}

/// The events that start on `day`.
pub fn events_on(events: &[CalendarEvent], day: NaiveDate) -> Vec<&CalendarEvent> {
    let mut found: Vec<&CalendarEvent> = events.iter().filter(|e| e.start_day() == day).collect();
    found.sort_by_key(|e| e.start_date);
    found
}

/// The next `limit` events that start on or after `today`, soonest first.
pub fn upcoming(events: &[CalendarEvent], today: NaiveDate, limit: usize) -> Vec<&CalendarEvent> {
    let mut found: Vec<&CalendarEvent> = events.iter().filter(|e| e.start_day() >= today).collect();
    found.sort_by_key(|e| e.start_date);
    found.truncate(limit);
    found
}
