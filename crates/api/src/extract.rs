//! Request extractors

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tasklane_domain::{AuthenticatedUser, TasklaneError};

use crate::context::AppContext;
use crate::error::ApiError;

/// Extractor resolving the request's bearer token to an authenticated user.
///
/// Rejects with 401 when the header is missing or the store does not
/// recognize the session.
pub struct CurrentUser(pub AuthenticatedUser);

impl FromRequestParts<Arc<AppContext>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppContext>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError(TasklaneError::AuthRequired("missing Authorization header".into()))
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError(TasklaneError::AuthRequired("expected a bearer token".into()))
        })?;

        let user = state.sessions.verify(token).await.map_err(ApiError)?;
        Ok(Self(user))
    }
}
