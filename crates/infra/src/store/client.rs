//! REST client for the remote data store
//!
//! The store is the system of record for tasks, token records, and user
//! sessions. It exposes a PostgREST-compatible interface: predicates are
//! query parameters (`user_id=eq.<uuid>`, `status=in.(todo,done)`), writes
//! return representations when asked via the `Prefer` header, and upserts
//! are keyed with `on_conflict`.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tasklane_domain::{HttpConfig, Result, StoreConfig, TasklaneError};

use crate::http::HttpClient;

/// Shared access to the remote store's REST interface.
#[derive(Clone)]
pub struct StoreClient {
    http: HttpClient,
    base_url: String,
    service_key: String,
}

impl StoreClient {
    /// Build a client from configuration.
    pub fn new(store: &StoreConfig, http: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let apikey = HeaderValue::from_str(&store.service_key).map_err(|err| {
            TasklaneError::Config(format!("store service key is not a valid header value: {err}"))
        })?;
        headers.insert("apikey", apikey);

        let client = HttpClient::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .max_attempts(http.max_attempts)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http: client,
            base_url: store.base_url.trim_end_matches('/').to_string(),
            service_key: store.service_key.clone(),
        })
    }

    /// Request builder for a table under `/rest/v1`, authorized with the
    /// service key.
    pub fn table(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        self.http.request(method, url).bearer_auth(&self.service_key)
    }

    /// Request builder for the auth endpoint, authorized with the caller's
    /// own session token instead of the service key.
    pub fn auth_user(&self, session_token: &str) -> RequestBuilder {
        let url = format!("{}/auth/v1/user", self.base_url);
        self.http.request(Method::GET, url).bearer_auth(session_token)
    }

    /// Execute a request and surface store-reported failures as domain
    /// errors with the store's message passed through.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let response = self.http.send(builder).await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = read_error_message(response).await;

        if status == StatusCode::NOT_FOUND {
            return Err(TasklaneError::NotFound(message));
        }
        if status.is_client_error() {
            return Err(TasklaneError::Store(message));
        }
        Err(TasklaneError::Network(format!("store responded with {status}: {message}")))
    }
}

/// Error body shape reported by the store.
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: Option<String>,
    #[serde(rename = "error_description")]
    error_description: Option<String>,
}

async fn read_error_message(response: Response) -> String {
    let raw = response.text().await.unwrap_or_default();
    match serde_json::from_str::<StoreErrorBody>(&raw) {
        Ok(body) => body
            .message
            .or(body.error_description)
            .unwrap_or_else(|| non_empty_or_unknown(raw)),
        Err(_) => non_empty_or_unknown(raw),
    }
}

fn non_empty_or_unknown(raw: String) -> String {
    if raw.trim().is_empty() {
        "store returned no error detail".to_string()
    } else {
        raw
    }
}
