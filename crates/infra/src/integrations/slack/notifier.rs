//! Slack incoming-webhook notification sink
//!
//! Best-effort side channel: one webhook post per task mutation, single
//! attempt, bounded by the shared HTTP timeout. Callers absorb failures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use tasklane_core::tasks::ports::NotificationSink;
use tasklane_domain::{HttpConfig, NotificationAction, Result, TaskNotification, TasklaneError};
use tracing::debug;

use crate::http::HttpClient;

/// `NotificationSink` implementation posting to a Slack incoming webhook.
pub struct SlackNotifier {
    webhook_url: String,
    http: HttpClient,
}

impl SlackNotifier {
    /// Create a notifier for the configured webhook URL.
    pub fn new(webhook_url: impl Into<String>, http: &HttpConfig) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .max_attempts(1)
            .build()?;
        Ok(Self { webhook_url: webhook_url.into(), http: client })
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload {
    text: String,
}

fn render_text(notification: &TaskNotification) -> String {
    let verb = match notification.action {
        NotificationAction::Created => "created",
        NotificationAction::Updated => "updated",
    };
    format!(
        "Task {verb}: *{}* [{}/{}] by {}",
        notification.title,
        notification.status.as_str(),
        notification.priority.as_str(),
        notification.user_email,
    )
}

#[async_trait]
impl NotificationSink for SlackNotifier {
    async fn notify(&self, notification: &TaskNotification) -> Result<()> {
        let payload = WebhookPayload { text: render_text(notification) };

        debug!(action = ?notification.action, title = %notification.title, "posting Slack notification");

        let request = self.http.request(Method::POST, &self.webhook_url).json(&payload);
        let response = self.http.send(request).await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(TasklaneError::Network(format!("Slack webhook responded with {status}")));
        }

        Ok(())
    }
}
