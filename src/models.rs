use serde::Deserialize;

/// One upcoming contest as listed by clist.by.
///
/// `start` and `end` are kept exactly as the API sends them
/// (`2024-06-01T17:35:00`, UTC without an offset).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContestRecord {
    pub id: u64,
    #[serde(rename = "event")]
    pub name: String,
    #[serde(rename = "href")]
    pub url: String,
    pub start: String,
    pub end: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct ContestListResponse {
    #[serde(default)]
    pub objects: Option<Vec<ContestRecord>>,
}

impl ContestListResponse {
    pub fn into_contests(self) -> Vec<ContestRecord> {
        self.objects.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub method: String,
    pub minutes: i32,
}

/// Provider-neutral event handed to a [`crate::calendar::CalendarSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub time_zone: String,
    pub reminders: Vec<Reminder>,
    pub use_default_reminders: bool,
}
