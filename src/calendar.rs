use crate::error::SyncError;
use crate::models::CalendarEvent;
use crate::settings::AppPaths;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use google_calendar3::api::{Event, EventDateTime, EventReminder, EventReminders, Scope};
use google_calendar3::hyper_rustls::HttpsConnector;
use google_calendar3::{hyper_rustls, yup_oauth2, CalendarHub};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// An event with the same id is already in the calendar
    Conflict,
    Rejected(String),
}

/// The one capability the publisher needs from a calendar provider.
#[allow(async_fn_in_trait)]
pub trait CalendarSession {
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> Result<(), InsertError>;
}

#[allow(async_fn_in_trait)]
pub trait Authenticator {
    type Session: CalendarSession;

    async fn authenticate(&self) -> Result<Self::Session, SyncError>;
}

/// Installed-app OAuth against Google, caching the token on disk so later
/// runs do not prompt again.
pub struct GoogleAuthenticator {
    client_secret: PathBuf,
    token_cache: PathBuf,
}

impl GoogleAuthenticator {
    pub fn new(paths: &AppPaths) -> GoogleAuthenticator {
        GoogleAuthenticator {
            client_secret: paths.client_secret.clone(),
            token_cache: paths.token_cache.clone(),
        }
    }
}

impl Authenticator for GoogleAuthenticator {
    type Session = GoogleCalendarSession;

    async fn authenticate(&self) -> Result<GoogleCalendarSession, SyncError> {
        if !self.client_secret.exists() {
            return Err(SyncError::Configuration(format!(
                "Could not find credentials.json at {}. Please download it from Google Cloud.",
                self.client_secret.display()
            )));
        }

        let secret = yup_oauth2::read_application_secret(&self.client_secret)
            .await
            .map_err(|e| SyncError::Auth(format!("Failed to read client secret: {e}")))?;

        let auth = yup_oauth2::InstalledFlowAuthenticator::builder(
            secret,
            yup_oauth2::InstalledFlowReturnMethod::HTTPRedirect,
        )
        .persist_tokens_to_disk(self.token_cache.clone())
        .build()
        .await
        .map_err(|e| SyncError::Auth(format!("Failed to create authenticator: {e}")))?;

        // Run the consent flow (or token refresh) now rather than on the first insert.
        auth.token(&[Scope::Full.as_ref()])
            .await
            .map_err(|e| SyncError::Auth(e.to_string()))?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| SyncError::Auth(format!("Failed to load native TLS roots: {e}")))?
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(GoogleCalendarSession {
            hub: CalendarHub::new(client, auth),
        })
    }
}

pub struct GoogleCalendarSession {
    hub: CalendarHub<HttpsConnector<HttpConnector>>,
}

impl CalendarSession for GoogleCalendarSession {
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> Result<(), InsertError> {
        let google_event = to_google_event(event).map_err(InsertError::Rejected)?;

        let result = self
            .hub
            .events()
            .insert(google_event, calendar_id)
            .add_scope(Scope::Full)
            .doit()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_conflict(&e) => Err(InsertError::Conflict),
            Err(e) => Err(InsertError::Rejected(error_message(&e))),
        }
    }
}

pub fn to_google_event(event: &CalendarEvent) -> Result<Event, String> {
    let tz: Tz = event
        .time_zone
        .parse()
        .map_err(|_| format!("Unknown time zone {}", event.time_zone))?;

    let overrides = event
        .reminders
        .iter()
        .map(|reminder| EventReminder {
            method: Some(reminder.method.clone()),
            minutes: Some(reminder.minutes),
        })
        .collect();

    Ok(Event {
        id: Some(event.id.clone()),
        summary: Some(event.summary.clone()),
        description: Some(event.description.clone()),
        start: Some(convert_event_datetime(&event.start, tz)?),
        end: Some(convert_event_datetime(&event.end, tz)?),
        reminders: Some(EventReminders {
            overrides: Some(overrides),
            use_default: Some(event.use_default_reminders),
        }),
        ..Default::default()
    })
}

fn convert_event_datetime(raw: &str, tz: Tz) -> Result<EventDateTime, String> {
    Ok(EventDateTime {
        date_time: Some(parse_timestamp(raw, tz)?),
        time_zone: Some(tz.name().to_string()),
        ..Default::default()
    })
}

/// Reads a clist timestamp (`2024-06-01T17:35:00`) as wall time in `tz`.
/// Values that already carry an offset are taken as-is.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Result<DateTime<Utc>, String> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| format!("Invalid timestamp {raw:?}: {e}"))?;

    tz.from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| format!("Ambiguous or invalid local time {raw:?} in {}", tz.name()))
}

/// Google reports a duplicate event id as HTTP 409.
pub fn is_conflict(err: &google_calendar3::Error) -> bool {
    match err {
        google_calendar3::Error::BadRequest(body) => {
            body.pointer("/error/code").and_then(|code| code.as_u64()) == Some(409)
        }
        google_calendar3::Error::Failure(response) => response.status().as_u16() == 409,
        _ => false,
    }
}

fn error_message(err: &google_calendar3::Error) -> String {
    if let google_calendar3::Error::BadRequest(body) = err {
        if let Some(message) = body.pointer("/error/message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    err.to_string()
}
