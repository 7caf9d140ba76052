//! In-memory calendar used by unit tests.

use crate::calendar::{Authenticator, CalendarSession, InsertError};
use crate::error::SyncError;
use crate::models::CalendarEvent;
use crate::publish::event_id;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    // (calendar id, event)
    inserted: Vec<(String, CalendarEvent)>,
}

/// Rejects a second insert of the same id with a conflict, like Google does.
#[derive(Clone, Default)]
pub struct FakeCalendar {
    state: Arc<Mutex<State>>,
    reject: Option<(String, String)>,
}

impl FakeCalendar {
    pub fn rejecting(contest_id: u64, message: &str) -> FakeCalendar {
        FakeCalendar {
            reject: Some((event_id(contest_id), message.to_string())),
            ..Default::default()
        }
    }

    pub fn inserted_ids(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.inserted.iter().map(|(_, e)| e.id.clone()).collect()
    }

    pub fn calendar_ids(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.inserted.iter().map(|(c, _)| c.clone()).collect()
    }
}

impl CalendarSession for FakeCalendar {
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> Result<(), InsertError> {
        if let Some((id, message)) = &self.reject {
            if *id == event.id {
                return Err(InsertError::Rejected(message.clone()));
            }
        }

        let mut state = self.state.lock().unwrap();
        if state.inserted.iter().any(|(_, e)| e.id == event.id) {
            return Err(InsertError::Conflict);
        }
        state
            .inserted
            .push((calendar_id.to_string(), event.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAuthenticator {
    pub calendar: FakeCalendar,
    calls: AtomicUsize,
}

impl FakeAuthenticator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Authenticator for FakeAuthenticator {
    type Session = FakeCalendar;

    async fn authenticate(&self) -> Result<FakeCalendar, SyncError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.calendar.clone())
    }
}
