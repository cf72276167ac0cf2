//! Port interfaces for OAuth credentials and session verification
//!
//! These traits define the boundaries between the token lifecycle logic
//! and infrastructure implementations.

use async_trait::async_trait;
use tasklane_domain::{AuthenticatedUser, Result, TokenRecord, TokenSet};
use uuid::Uuid;

/// Trait for the remote token-record store
///
/// At most one record exists per user; `upsert_record` has full
/// replace-or-insert semantics keyed by `user_id`.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the user's token record, if any.
    async fn find_record(&self, user_id: Uuid) -> Result<Option<TokenRecord>>;

    /// Insert or fully replace the user's token record.
    async fn upsert_record(&self, record: &TokenRecord) -> Result<()>;
}

/// Trait for the OAuth provider endpoints
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Deterministic consent-screen URL. No side effects.
    fn authorization_url(&self) -> String;

    /// Trade a one-time authorization code for an initial token set.
    ///
    /// Fails with `AuthExchange` when the provider rejects the code.
    async fn exchange_code(&self, code: &str) -> Result<TokenSet>;

    /// Regenerate an access token from a refresh token.
    ///
    /// Fails with `AuthRefresh` when the refresh token is revoked or invalid.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet>;
}

/// Trait for resolving a request's bearer token to a user
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Resolve the session token, failing with `AuthRequired` when it is
    /// missing, expired, or unknown to the store.
    async fn verify(&self, bearer_token: &str) -> Result<AuthenticatedUser>;
}
