//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `TASKLANE_BIND_ADDR`: Server bind address (default `127.0.0.1:8080`)
//! - `TASKLANE_STORE_URL`: Base URL of the remote store
//! - `TASKLANE_STORE_SERVICE_KEY`: Service key for store requests
//! - `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET` / `GOOGLE_REDIRECT_URI`:
//!   OAuth client registration
//! - `SLACK_WEBHOOK_URL`: Notification webhook (optional; absent disables
//!   notifications)
//! - `TASKLANE_HTTP_TIMEOUT_SECS`: Outbound HTTP timeout (optional)
//! - `TASKLANE_HTTP_MAX_ATTEMPTS`: Outbound HTTP attempts (optional)
//!
//! ## File Locations
//! The loader probes `config.toml`/`config.json` and
//! `tasklane.toml`/`tasklane.json` in the working directory, then the parent
//! directory.

use std::path::{Path, PathBuf};

use tasklane_domain::{
    Config, GoogleConfig, HttpConfig, Result, ServerConfig, SlackConfig, StoreConfig,
    TasklaneError,
};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `TasklaneError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `TasklaneError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let bind_addr =
        std::env::var("TASKLANE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let store_url = env_var("TASKLANE_STORE_URL")?;
    let service_key = env_var("TASKLANE_STORE_SERVICE_KEY")?;

    let client_id = env_var("GOOGLE_CLIENT_ID")?;
    let client_secret = env_var("GOOGLE_CLIENT_SECRET")?;
    let redirect_uri = env_var("GOOGLE_REDIRECT_URI")?;

    let webhook_url = std::env::var("SLACK_WEBHOOK_URL").ok().filter(|v| !v.trim().is_empty());

    let mut http = HttpConfig::default();
    if let Ok(raw) = std::env::var("TASKLANE_HTTP_TIMEOUT_SECS") {
        http.timeout_secs = raw
            .parse::<u64>()
            .map_err(|e| TasklaneError::Config(format!("Invalid http timeout: {e}")))?;
    }
    if let Ok(raw) = std::env::var("TASKLANE_HTTP_MAX_ATTEMPTS") {
        http.max_attempts = raw
            .parse::<usize>()
            .map_err(|e| TasklaneError::Config(format!("Invalid http attempts: {e}")))?;
    }

    Ok(Config {
        server: ServerConfig { bind_addr },
        store: StoreConfig { base_url: store_url, service_key },
        google: GoogleConfig {
            client_id,
            client_secret,
            redirect_uri,
            token_endpoint: std::env::var("GOOGLE_TOKEN_ENDPOINT").ok(),
            api_base: std::env::var("GOOGLE_CALENDAR_API_BASE").ok(),
        },
        slack: SlackConfig { webhook_url },
        http,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TasklaneError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - The file cannot be parsed
pub fn load_from_file(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => probe_config_paths().ok_or_else(|| {
            TasklaneError::Config("no config file found in probed locations".to_string())
        })?,
    };

    let raw = std::fs::read_to_string(&path).map_err(|e| {
        TasklaneError::Config(format!("failed to read {}: {e}", path.display()))
    })?;

    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&raw)
            .map_err(|e| TasklaneError::Config(format!("invalid TOML config: {e}")))?,
        Some("json") => serde_json::from_str(&raw)
            .map_err(|e| TasklaneError::Config(format!("invalid JSON config: {e}")))?,
        other => {
            return Err(TasklaneError::Config(format!(
                "unsupported config extension: {other:?}"
            )))
        }
    };

    tracing::info!(path = %path.display(), "Configuration loaded from file");
    Ok(config)
}

/// Probe well-known locations for a config file.
fn probe_config_paths() -> Option<PathBuf> {
    let candidates =
        ["config.toml", "config.json", "tasklane.toml", "tasklane.json"];

    for dir in [".", ".."] {
        for name in candidates {
            let path = Path::new(dir).join(name);
            if path.is_file() {
                return Some(path);
            }
        }
    }
    None
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| TasklaneError::Config(format!("missing environment variable {name}")))
}
