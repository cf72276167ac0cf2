//! HTTP route assembly

pub mod google;
pub mod health;
pub mod tasks;

use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;

use crate::context::AppContext;

/// Build the application router over a shared context.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/api/tasks/{id}", patch(tasks::update_task).delete(tasks::delete_task))
        .route("/api/google/auth-url", get(google::auth_url))
        .route("/api/google/callback", get(google::callback))
        .route("/api/calendar/events", post(google::create_event))
        .with_state(ctx)
}
