//! Integration tests for the configuration loader

use std::io::Write;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use tasklane_domain::TasklaneError;
use tasklane_infra::config::{load_from_env, load_from_file};

/// Environment variables are process-global; serialize tests that touch them.
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const ENV_VARS: &[&str] = &[
    "TASKLANE_BIND_ADDR",
    "TASKLANE_STORE_URL",
    "TASKLANE_STORE_SERVICE_KEY",
    "GOOGLE_CLIENT_ID",
    "GOOGLE_CLIENT_SECRET",
    "GOOGLE_REDIRECT_URI",
    "SLACK_WEBHOOK_URL",
    "TASKLANE_HTTP_TIMEOUT_SECS",
    "TASKLANE_HTTP_MAX_ATTEMPTS",
];

fn clear_env() {
    for name in ENV_VARS {
        std::env::remove_var(name);
    }
}

#[test]
fn env_loading_requires_store_and_google_settings() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let err = load_from_env().expect_err("missing variables");
    assert!(matches!(err, TasklaneError::Config(_)));
}

#[test]
fn env_loading_applies_defaults_for_optional_settings() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("TASKLANE_STORE_URL", "https://store.example.com");
    std::env::set_var("TASKLANE_STORE_SERVICE_KEY", "service-key");
    std::env::set_var("GOOGLE_CLIENT_ID", "client-123");
    std::env::set_var("GOOGLE_CLIENT_SECRET", "secret");
    std::env::set_var("GOOGLE_REDIRECT_URI", "http://localhost:3000/callback");

    let config = load_from_env().expect("config");
    assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
    assert_eq!(config.store.base_url, "https://store.example.com");
    assert!(config.slack.webhook_url.is_none());
    assert_eq!(config.http.timeout_secs, 10);
    assert_eq!(config.http.max_attempts, 3);

    clear_env();
}

#[test]
fn toml_config_file_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).expect("file");
    writeln!(
        file,
        r#"
[server]
bind_addr = "0.0.0.0:9000"

[store]
base_url = "https://store.example.com"
service_key = "service-key"

[google]
client_id = "client-123"
client_secret = "secret"
redirect_uri = "http://localhost:3000/callback"

[slack]
webhook_url = "https://hooks.slack.com/services/T/B/X"

[http]
timeout_secs = 7
max_attempts = 2
"#
    )
    .expect("write");

    let config = load_from_file(Some(&path)).expect("config");
    assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
    assert_eq!(config.slack.webhook_url.as_deref(), Some("https://hooks.slack.com/services/T/B/X"));
    assert_eq!(config.http.timeout_secs, 7);
    assert_eq!(config.http.max_attempts, 2);
}

#[test]
fn json_config_file_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        serde_json::json!({
            "server": { "bind_addr": "0.0.0.0:9001" },
            "store": { "base_url": "https://store.example.com", "service_key": "k" },
            "google": {
                "client_id": "client-123",
                "client_secret": "secret",
                "redirect_uri": "http://localhost:3000/callback",
            },
        })
        .to_string(),
    )
    .expect("write");

    let config = load_from_file(Some(&path)).expect("config");
    assert_eq!(config.server.bind_addr, "0.0.0.0:9001");
    // Optional sections fall back to defaults.
    assert!(config.slack.webhook_url.is_none());
    assert_eq!(config.http.timeout_secs, 10);
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "server: {}").expect("write");

    let err = load_from_file(Some(&path)).expect_err("unsupported extension");
    assert!(matches!(err, TasklaneError::Config(_)));
}
