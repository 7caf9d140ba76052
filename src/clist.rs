use crate::error::SyncError;
use crate::models::{ContestListResponse, ContestRecord};
use crate::platform::resource_ids_csv;
use chrono::{DateTime, Utc};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use std::collections::BTreeSet;

pub const CLIST_URL: &str = "https://clist.by/api/v4/contest/";
pub const CONTEST_LIMIT: u32 = 50;

// clist.by reads an offset-less timestamp as UTC.
const START_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub struct ClistClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ClistClient {
    pub fn new(api_key: impl Into<String>) -> ClistClient {
        ClistClient::with_base_url(CLIST_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> ClistClient {
        ClistClient {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Upcoming contests on the selected platforms, starting from now.
    pub async fn fetch_contests(
        &self,
        platforms: &BTreeSet<u32>,
    ) -> Result<Vec<ContestRecord>, SyncError> {
        self.fetch_contests_since(platforms, Utc::now()).await
    }

    pub async fn fetch_contests_since(
        &self,
        platforms: &BTreeSet<u32>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ContestRecord>, SyncError> {
        let start = now.format(START_FORMAT).to_string();
        let resources = resource_ids_csv(platforms);
        let limit = CONTEST_LIMIT.to_string();

        tracing::debug!("Querying {} for resources {resources} from {start}", self.base_url);

        let response = self
            .http
            .get(&self.base_url)
            .header(AUTHORIZATION, format!("ApiKey {}", self.api_key))
            .query(&[
                ("start__gte", start.as_str()),
                ("resource_id__in", resources.as_str()),
                ("limit", limit.as_str()),
                ("order_by", "start"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SyncError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: Option<ContestListResponse> = serde_json::from_str(&body)?;
        Ok(parsed.map(ContestListResponse::into_contests).unwrap_or_default())
    }
}
