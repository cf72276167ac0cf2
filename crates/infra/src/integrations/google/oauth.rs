//! Google OAuth endpoints
//!
//! Implements the provider side of the token lifecycle: consent URL
//! construction, authorization-code exchange, and refresh. Persistence and
//! staleness decisions live in `tasklane_core::auth::TokenManager`.

use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Deserialize;
use tasklane_core::auth::ports::AuthProvider;
use tasklane_domain::{GoogleConfig, HttpConfig, Result, TasklaneError, TokenSet};
use tracing::debug;

use crate::http::HttpClient;

const GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Configuration for the Google OAuth client.
#[derive(Debug, Clone)]
pub struct GoogleAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub scopes: Vec<String>,
}

impl GoogleAuthSettings {
    /// Create settings with Google's production endpoints and the two fixed
    /// scopes (calendar event management, email read). A configured token
    /// endpoint override takes precedence.
    pub fn new(config: &GoogleConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            authorization_endpoint: GOOGLE_AUTH_ENDPOINT.to_string(),
            token_endpoint: config
                .token_endpoint
                .clone()
                .unwrap_or_else(|| GOOGLE_TOKEN_ENDPOINT.to_string()),
            scopes: vec![
                "https://www.googleapis.com/auth/calendar.events".to_string(),
                "https://www.googleapis.com/auth/userinfo.email".to_string(),
            ],
        }
    }

    /// Point the token endpoint somewhere else (primarily for tests).
    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }
}

/// `AuthProvider` implementation against Google's OAuth2 endpoints.
pub struct GoogleAuthProvider {
    settings: GoogleAuthSettings,
    http: HttpClient,
}

impl GoogleAuthProvider {
    /// Create a provider client.
    ///
    /// Token endpoint calls are single-attempt: a failed exchange or refresh
    /// propagates to the caller rather than being retried locally.
    pub fn new(settings: GoogleAuthSettings, http: &HttpConfig) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(StdDuration::from_secs(http.timeout_secs))
            .max_attempts(1)
            .build()?;
        Ok(Self { settings, http: client })
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<GoogleTokenResponse> {
        let request = self.http.request(reqwest::Method::POST, &self.settings.token_endpoint);
        let response = self.http.send(request.form(form)).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
            return Err(TasklaneError::Provider(format!("token endpoint ({status}): {error_text}")));
        }

        response.json().await.map_err(|err| {
            TasklaneError::Provider(format!("failed to parse token response: {err}"))
        })
    }
}

#[async_trait]
impl AuthProvider for GoogleAuthProvider {
    fn authorization_url(&self) -> String {
        let scope = self.settings.scopes.join(" ");
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&access_type=offline&prompt=consent&scope={}",
            self.settings.authorization_endpoint,
            urlencoding::encode(&self.settings.client_id),
            urlencoding::encode(&self.settings.redirect_uri),
            urlencoding::encode(&scope),
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenSet> {
        debug!("exchanging authorization code");
        let form = [
            ("code", code),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self.request_token(&form).await.map_err(|err| match err {
            TasklaneError::Provider(msg) => TasklaneError::AuthExchange(msg),
            other => other,
        })?;

        Ok(response.into_token_set())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet> {
        debug!("refreshing access token");
        let form = [
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];

        let response = self.request_token(&form).await.map_err(|err| match err {
            TasklaneError::Provider(msg) => TasklaneError::AuthRefresh(msg),
            other => other,
        })?;

        Ok(response.into_token_set())
    }
}

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: i64,
}

impl GoogleTokenResponse {
    fn into_token_set(self) -> TokenSet {
        TokenSet {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expiry_date: Utc::now() + Duration::seconds(self.expires_in),
        }
    }
}
