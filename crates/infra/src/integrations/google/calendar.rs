//! Google Calendar event publisher
//!
//! Pure translator from the internal event shape to the provider's insert
//! call. Token retrieval (and silent refresh) is delegated to the token
//! manager; the insert itself is a single attempt with no retry.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use tasklane_core::TokenManager;
use tasklane_domain::{CalendarEventInput, HttpConfig, RemoteEvent, Result, TasklaneError};
use tracing::debug;
use uuid::Uuid;

use crate::http::HttpClient;

const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Events are always created on the user's primary calendar with a fixed
/// timezone, matching the product's original behaviour.
const CALENDAR_ID: &str = "primary";
const EVENT_TIMEZONE: &str = "Asia/Tokyo";

/// Calendar API client with token management.
pub struct CalendarPublisher {
    tokens: Arc<TokenManager>,
    http: HttpClient,
    api_base: String,
}

impl CalendarPublisher {
    /// Create a publisher over the given token manager.
    pub fn new(tokens: Arc<TokenManager>, http: &HttpConfig) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .max_attempts(1)
            .build()?;
        Ok(Self { tokens, http: client, api_base: GOOGLE_CALENDAR_API_BASE.to_string() })
    }

    /// Point the API base somewhere else (primarily for tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Create a remote calendar event for the user.
    ///
    /// Obtains a valid access token first, so an expired token is refreshed
    /// transparently and token-lifecycle errors propagate unchanged.
    pub async fn create_event(
        &self,
        user_id: Uuid,
        input: &CalendarEventInput,
    ) -> Result<RemoteEvent> {
        if input.summary.trim().is_empty() {
            return Err(TasklaneError::InvalidInput("event summary must not be empty".into()));
        }
        if input.start >= input.end {
            return Err(TasklaneError::InvalidInput("event start must precede its end".into()));
        }

        let access_token = self.tokens.get_valid_access_token(user_id).await?;

        let payload = EventPayload {
            summary: &input.summary,
            description: input.description.as_deref().unwrap_or(""),
            start: EventTime { date_time: input.start.to_rfc3339(), time_zone: EVENT_TIMEZONE },
            end: EventTime { date_time: input.end.to_rfc3339(), time_zone: EVENT_TIMEZONE },
        };

        let url = format!("{}/calendars/{}/events", self.api_base, CALENDAR_ID);
        debug!(%user_id, summary = %input.summary, "creating calendar event");

        let request =
            self.http.request(Method::POST, &url).bearer_auth(&access_token).json(&payload);
        let response = self.http.send(request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
            return Err(TasklaneError::Provider(format!(
                "calendar API error ({status}): {error_text}"
            )));
        }

        response.json().await.map_err(|err| {
            TasklaneError::Provider(format!("failed to parse calendar response: {err}"))
        })
    }
}

#[derive(Debug, Serialize)]
struct EventPayload<'a> {
    summary: &'a str,
    description: &'a str,
    start: EventTime,
    end: EventTime,
}

#[derive(Debug, Serialize)]
struct EventTime {
    #[serde(rename = "dateTime")]
    date_time: String,
    #[serde(rename = "timeZone")]
    time_zone: &'static str,
}
