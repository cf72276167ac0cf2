//! Session verification against the store's auth endpoint

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tasklane_core::auth::ports::SessionVerifier;
use tasklane_domain::{AuthenticatedUser, Result, TasklaneError};
use uuid::Uuid;

use super::client::StoreClient;

/// `SessionVerifier` implementation that resolves a bearer token through the
/// store's `/auth/v1/user` endpoint.
pub struct StoreSessionVerifier {
    client: Arc<StoreClient>,
}

impl StoreSessionVerifier {
    /// Create a verifier over a shared store client.
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

/// Subset of the auth endpoint's user object we care about.
#[derive(Debug, Deserialize)]
struct AuthUserBody {
    id: Uuid,
    email: Option<String>,
}

#[async_trait]
impl SessionVerifier for StoreSessionVerifier {
    async fn verify(&self, bearer_token: &str) -> Result<AuthenticatedUser> {
        let request = self.client.auth_user(bearer_token);
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            // Any store-reported rejection of the token is an auth failure
            // from the caller's point of view.
            Err(TasklaneError::Store(msg) | TasklaneError::NotFound(msg)) => {
                return Err(TasklaneError::AuthRequired(msg));
            }
            Err(other) => return Err(other),
        };

        let body: AuthUserBody = response.json().await.map_err(|err| {
            TasklaneError::Internal(format!("failed to decode auth user: {err}"))
        })?;

        Ok(AuthenticatedUser { id: body.id, email: body.email.unwrap_or_default() })
    }
}
