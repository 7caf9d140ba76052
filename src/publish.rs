use crate::calendar::{CalendarSession, InsertError};
use crate::models::{CalendarEvent, ContestRecord, Reminder};
use chrono_tz::Tz;

pub const CALENDAR_ID: &str = "primary";

/// Popup reminders before the start: 1 hour, 5 hours, 1 day.
pub const REMINDER_MINUTES: [i32; 3] = [60, 300, 1440];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishResult {
    Created,
    SkippedDuplicate,
    Failed(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishSummary {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Calendar event id for a contest. Stable across runs so a second insert of
/// the same contest collides with the first instead of duplicating it.
pub fn event_id(contest_id: u64) -> String {
    format!("clist{contest_id}v2")
}

pub fn contest_to_event(contest: &ContestRecord) -> CalendarEvent {
    CalendarEvent {
        id: event_id(contest.id),
        summary: contest.name.clone(),
        description: format!("Contest URL: {}", contest.url),
        start: contest.start.clone(),
        end: contest.end.clone(),
        time_zone: Tz::UTC.name().to_string(),
        reminders: REMINDER_MINUTES
            .iter()
            .map(|&minutes| Reminder {
                method: "popup".to_string(),
                minutes,
            })
            .collect(),
        use_default_reminders: false,
    }
}

pub async fn publish<S: CalendarSession>(session: &S, contest: &ContestRecord) -> PublishResult {
    let event = contest_to_event(contest);

    match session.insert_event(CALENDAR_ID, &event).await {
        Ok(()) => PublishResult::Created,
        Err(InsertError::Conflict) => PublishResult::SkippedDuplicate,
        Err(InsertError::Rejected(message)) => PublishResult::Failed(message),
    }
}

/// Publishes contests one after another in the given order. A failed insert
/// is logged and counted; it never stops the remaining contests.
pub async fn publish_all<S: CalendarSession>(
    session: &S,
    contests: &[ContestRecord],
) -> PublishSummary {
    let mut summary = PublishSummary::default();

    for contest in contests {
        match publish(session, contest).await {
            PublishResult::Created => {
                tracing::info!("Added: {}", contest.name);
                summary.created += 1;
            }
            PublishResult::SkippedDuplicate => {
                tracing::info!("Skipped (already exists): {}", contest.name);
                summary.skipped += 1;
            }
            PublishResult::Failed(message) => {
                tracing::warn!("Error adding {}: {message}", contest.name);
                summary.failed += 1;
            }
        }
    }

    summary
}
