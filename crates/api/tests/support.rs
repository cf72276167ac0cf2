//! Shared helpers for API integration tests
//!
//! Each test wires the real application context against a wiremock server
//! standing in for the remote store, the OAuth token endpoint, and the
//! calendar API, then drives the router directly with `tower::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tasklane_domain::{
    Config, GoogleConfig, HttpConfig, ServerConfig, SlackConfig, StoreConfig,
};
use tasklane_lib::{router, AppContext};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SESSION_TOKEN: &str = "session-token";

/// Configuration pointing every outbound integration at the mock server.
pub fn config_for(server: &MockServer, slack_webhook: Option<String>) -> Config {
    Config {
        server: ServerConfig { bind_addr: "127.0.0.1:0".to_string() },
        store: StoreConfig { base_url: server.uri(), service_key: "service-key".to_string() },
        google: GoogleConfig {
            client_id: "client-123".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:3000/api/google/callback".to_string(),
            token_endpoint: Some(format!("{}/oauth/token", server.uri())),
            api_base: Some(server.uri()),
        },
        slack: SlackConfig { webhook_url: slack_webhook },
        // Single attempt keeps wiremock expectations exact.
        http: HttpConfig { timeout_secs: 5, max_attempts: 1 },
    }
}

/// Build the router over a context wired to the mock server.
pub fn app_for(server: &MockServer, slack_webhook: Option<String>) -> axum::Router {
    let ctx = AppContext::new(config_for(server, slack_webhook)).expect("app context");
    router(Arc::new(ctx))
}

/// Mount the session-verification endpoint for `SESSION_TOKEN`.
pub async fn mount_session(server: &MockServer, user_id: Uuid, email: &str) {
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("Authorization", format!("Bearer {SESSION_TOKEN}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": user_id,
            "email": email,
        })))
        .mount(server)
        .await;
}

/// A task row as the store would return it.
pub fn task_row(
    owner: Uuid,
    title: &str,
    status: &str,
    due_date: Option<&str>,
    created_at: &str,
) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "user_id": owner,
        "title": title,
        "description": null,
        "status": status,
        "priority": "medium",
        "due_date": due_date,
        "created_at": created_at,
        "updated_at": created_at,
    })
}

/// Send a request and return status plus parsed JSON body (if any).
pub async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body_json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body_json).expect("body")))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, value)
}
