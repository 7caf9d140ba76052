use thiserror::Error;

/// Errors that end a sync run.
///
/// Failures on a single event insert are not represented here; they are
/// reported through [`crate::publish::PublishResult::Failed`] and the run
/// carries on.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Missing settings file, API key or client secret
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Contest API answered with a non-success status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// OAuth flow or calendar client setup failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
