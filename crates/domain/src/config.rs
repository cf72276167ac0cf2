//! Configuration structures
//!
//! Loaded by `tasklane-infra`'s configuration loader from environment
//! variables or a config file.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HTTP_MAX_ATTEMPTS, DEFAULT_HTTP_TIMEOUT_SECS};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub google: GoogleConfig,
    #[serde(default)]
    pub slack: SlackConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// HTTP server binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the axum server binds to, e.g. `127.0.0.1:8080`.
    pub bind_addr: String,
}

/// Remote data store access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store, without a trailing slash.
    pub base_url: String,
    /// Service key sent as the `apikey` header on every store request.
    pub service_key: String,
}

/// Google OAuth client registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Override of the token endpoint, e.g. for a local proxy.
    #[serde(default)]
    pub token_endpoint: Option<String>,
    /// Override of the Calendar API base URL.
    #[serde(default)]
    pub api_base: Option<String>,
}

/// Slack notification webhook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Absent disables notifications entirely.
    pub webhook_url: Option<String>,
}

/// Outbound HTTP behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_attempts: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS, max_attempts: DEFAULT_HTTP_MAX_ATTEMPTS }
    }
}
