//! Calendar command handlers.

use crate::args::{AddEventArgs, ListEventArgs, UpdateEventArgs};
use crate::commands::{plural, session, Out};
use crate::error::{ErrorType, IntoResult};
use crate::filter::{EventFilter, EventFilterInput};
use crate::model::{CalendarEvent, EventDraft, Taxonomy};
use crate::stats::agenda;
use crate::store::Store;
use crate::{validate, Result};

fn line(e: &CalendarEvent) -> String {
    let time = if e.is_all_day {
        "all day".to_string()
    } else {
        format!(
            "{}-{}",
            e.start_date.format("%H:%M"),
            e.end_date.format("%H:%M")
        )
    };
    let place = e
        .location
        .as_deref()
        .map(|l| format!(" @ {l}"))
        .unwrap_or_default();
    format!(
        "{time}  {}{place} ({})  [{}]",
        e.title,
        e.category.info().label,
        e.id
    )
}

fn draft(args: AddEventArgs) -> EventDraft {
    EventDraft {
        title: args.title,
        description: args.description,
        category: args.category,
        start_date: args.start,
        end_date: args.end,
        location: args.location,
        reminder: args.reminder,
        is_all_day: args.all_day,
        recurring: None,
    }
}

pub async fn add_event(store: &mut dyn Store, args: AddEventArgs) -> Result<Out<CalendarEvent>> {
    let user = session(store).await?;
    let draft = draft(args);
    validate::event(&draft).pub_result(ErrorType::Validation)?;
    let event = store
        .create_event(&user.id, draft)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(Out::new(
        format!("Added event on {}: {}", event.start_day(), line(&event)),
        event,
    ))
}

/// Replaces the fields of an existing event. The stored recurrence is kept since the CLI cannot
/// edit it.
pub async fn update_event(
    store: &mut dyn Store,
    args: UpdateEventArgs,
) -> Result<Out<CalendarEvent>> {
    let user = session(store).await?;
    let mut draft = draft(args.fields);
    validate::event(&draft).pub_result(ErrorType::Validation)?;

    draft.recurring = store
        .events(&user.id, &EventFilter::default())
        .await
        .pub_result(ErrorType::Store)?
        .into_iter()
        .find(|e| e.id == args.id)
        .and_then(|e| e.recurring);
    let event = store
        .update_event(&user.id, &args.id, draft)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(Out::new(
        format!("Updated event on {}: {}", event.start_day(), line(&event)),
        event,
    ))
}

pub async fn delete_event(store: &mut dyn Store, id: &str) -> Result<Out<()>> {
    let user = session(store).await?;
    store
        .delete_event(&user.id, id)
        .await
        .pub_result(ErrorType::Store)?;
    Ok(format!("Deleted event {id}").into())
}

/// Lists the user's events matching the category and day filters, grouped by day.
pub async fn list_events(
    store: &dyn Store,
    args: ListEventArgs,
) -> Result<Out<Vec<CalendarEvent>>> {
    let user = session(store).await?;
    let filter = EventFilter::normalize(EventFilterInput {
        categories: Some(args.categories),
        start_date: args.from,
        end_date: args.to,
    });
    let events = store
        .events(&user.id, &filter)
        .await
        .pub_result(ErrorType::Store)?;

    let mut message = plural(events.len(), "event", "events");
    if filter.has_active_filters() {
        message.push_str(" (filtered)");
    }
    for day in agenda(&events) {
        message.push_str(&format!("\n{}", day.date.format("%a %Y-%m-%d")));
        for e in day.events {
            message.push_str("\n  ");
            message.push_str(&line(e));
        }
    }
    Ok(Out::new(message, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventCategory, Reminder};
    use crate::test::TestEnv;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn add_args(title: &str, category: EventCategory, start: &str, end: &str) -> AddEventArgs {
        AddEventArgs {
            title: title.to_string(),
            category,
            start: NaiveDateTime::from_str(start).unwrap(),
            end: NaiveDateTime::from_str(end).unwrap(),
            description: None,
            location: Some("Hörsaal 3".to_string()),
            reminder: Reminder::FifteenMinutes,
            all_day: false,
        }
    }

    #[tokio::test]
    async fn test_add_rejects_end_before_start() {
        let env = TestEnv::new().await;
        let mut store = env.store();
        let args = add_args(
            "Tutorium",
            EventCategory::Uni,
            "2024-06-03T12:00:00",
            "2024-06-03T11:00:00",
        );
        let err = add_event(&mut store, args).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
    }

    #[tokio::test]
    async fn test_update_event() {
        let env = TestEnv::new().await;
        let mut store = env.store();
        let out = add_event(
            &mut store,
            add_args(
                "Tutorium",
                EventCategory::Uni,
                "2024-06-03T12:00:00",
                "2024-06-03T13:00:00",
            ),
        )
        .await
        .unwrap();
        let created = out.structure().unwrap().clone();

        let args = UpdateEventArgs {
            id: created.id.clone(),
            fields: add_args(
                "Tutorium Lineare Algebra",
                EventCategory::Uni,
                "2024-06-04T14:00:00",
                "2024-06-04T16:00:00",
            ),
        };
        let out = update_event(&mut store, args).await.unwrap();
        let updated = out.structure().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Tutorium Lineare Algebra");
        assert_eq!(updated.created_at, created.created_at);
        assert!(out.message().contains("2024-06-04"));

        let args = UpdateEventArgs {
            id: created.id.clone(),
            fields: add_args(
                "Tutorium",
                EventCategory::Uni,
                "2024-06-04T14:00:00",
                "2024-06-04T13:00:00",
            ),
        };
        let err = update_event(&mut store, args).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);

        let args = UpdateEventArgs {
            id: "missing".to_string(),
            fields: add_args(
                "Tutorium",
                EventCategory::Uni,
                "2024-06-04T14:00:00",
                "2024-06-04T15:00:00",
            ),
        };
        let err = update_event(&mut store, args).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Store);
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let env = TestEnv::new().await;
        let mut store = env.store();
        for (title, category, start, end) in [
            ("Tutorium", EventCategory::Uni, "2024-06-03T12:00:00", "2024-06-03T13:00:00"),
            ("Schicht", EventCategory::Work, "2024-06-03T16:00:00", "2024-06-03T20:00:00"),
            ("Klausur", EventCategory::Uni, "2024-07-15T09:00:00", "2024-07-15T11:00:00"),
        ] {
            add_event(&mut store, add_args(title, category, start, end))
                .await
                .unwrap();
        }

        let args = ListEventArgs {
            categories: vec![EventCategory::Uni],
            from: NaiveDate::from_ymd_opt(2024, 6, 1),
            to: NaiveDate::from_ymd_opt(2024, 6, 30),
        };
        let out = list_events(&store, args).await.unwrap();
        let events = out.structure().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Tutorium");
        assert!(out.message().contains("(filtered)"));
        assert!(out.message().contains("Hörsaal 3"));
    }
}
