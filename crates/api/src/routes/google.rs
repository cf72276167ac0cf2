//! Google OAuth flow and calendar endpoints

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tasklane_domain::CalendarEventInput;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::CurrentUser;

/// Response of the auth-url endpoint.
#[derive(Debug, Serialize)]
pub struct AuthUrlResponse {
    pub url: String,
}

/// GET /api/google/auth-url
pub async fn auth_url(
    State(ctx): State<Arc<AppContext>>,
    CurrentUser(_user): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(AuthUrlResponse { url: ctx.tokens.authorization_url() }))
}

/// Callback query carrying the one-time authorization code.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub connected: bool,
}

/// GET /api/google/callback
pub async fn callback(
    State(ctx): State<Arc<AppContext>>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, ApiError> {
    ctx.tokens.connect(user.id, &params.code).await?;
    Ok(Json(CallbackResponse { connected: true }))
}

/// POST /api/calendar/events
pub async fn create_event(
    State(ctx): State<Arc<AppContext>>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CalendarEventInput>,
) -> Result<impl IntoResponse, ApiError> {
    let event = ctx.calendar.create_event(user.id, &input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}
