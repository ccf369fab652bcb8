use crate::model::EventCategory;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How long before an event the user wants to be reminded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum Reminder {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "1day")]
    OneDay,
}

serde_plain::derive_display_from_serialize!(Reminder);
serde_plain::derive_fromstr_from_deserialize!(Reminder);

impl Reminder {
    pub const ALL: [Reminder; 6] = [
        Reminder::None,
        Reminder::FiveMinutes,
        Reminder::FifteenMinutes,
        Reminder::ThirtyMinutes,
        Reminder::OneHour,
        Reminder::OneDay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Reminder::None => "Keine Erinnerung",
            Reminder::FiveMinutes => "5 Minuten vorher",
            Reminder::FifteenMinutes => "15 Minuten vorher",
            Reminder::ThirtyMinutes => "30 Minuten vorher",
            Reminder::OneHour => "1 Stunde vorher",
            Reminder::OneDay => "1 Tag vorher",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

serde_plain::derive_display_from_serialize!(Frequency);
serde_plain::derive_fromstr_from_deserialize!(Frequency);

/// Recurrence settings. These are stored with the event but never expanded into occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    pub frequency: Frequency,
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// A calendar entry. Start and end are local wall-clock times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: EventCategory,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub reminder: Reminder,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurrence>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CalendarEvent {
    /// The calendar day the event starts on.
    pub fn start_day(&self) -> NaiveDate {
        self.start_date.date()
    }
}

/// The user-editable fields of a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: EventCategory,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub reminder: Reminder,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurrence>,
}

impl EventDraft {
    pub(crate) fn into_event(self, id: String, user_id: String, now: DateTime<Utc>) -> CalendarEvent {
        CalendarEvent {
            id,
            user_id,
            title: self.title,
            description: self.description,
            category: self.category,
            start_date: self.start_date,
            end_date: self.end_date,
            location: self.location,
            reminder: self.reminder,
            is_all_day: self.is_all_day,
            recurring: self.recurring,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_codes() {
        assert_eq!(Reminder::OneHour.to_string(), "1hour");
        assert_eq!("15min".parse::<Reminder>().unwrap(), Reminder::FifteenMinutes);
        assert!("2hours".parse::<Reminder>().is_err());
        assert_eq!(Reminder::FiveMinutes.label(), "5 Minuten vorher");
    }

    #[test]
    fn test_deserialize_event_with_defaults() {
        let json = r#"{
            "id": "e1",
            "userId": "u1",
            "title": "Vorlesung",
            "category": "uni",
            "startDate": "2024-04-02T10:00:00",
            "endDate": "2024-04-02T11:30:00",
            "recurring": { "frequency": "weekly", "interval": 1 },
            "createdAt": "2024-03-01T09:00:00Z",
            "updatedAt": "2024-03-01T09:00:00Z"
        }"#;
        let e: CalendarEvent = serde_json::from_str(json).unwrap();
        assert_eq!(e.category, EventCategory::Uni);
        assert_eq!(e.reminder, Reminder::None);
        assert!(!e.is_all_day);
        assert_eq!(e.start_day(), NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert_eq!(e.recurring.unwrap().frequency, Frequency::Weekly);
    }
}
