//! OAuth token lifecycle - core business logic
//!
//! Obtains, persists, validates, and refreshes third-party access tokens.
//! The single staleness decision lives in [`TokenManager::get_valid_access_token`].

use std::sync::Arc;

use chrono::{Duration, Utc};
use tasklane_domain::constants::TOKEN_REFRESH_LEEWAY_SECS;
use tasklane_domain::{Result, TasklaneError, TokenRecord, TokenSet};
use tracing::{debug, info};
use uuid::Uuid;

use super::ports::{AuthProvider, TokenStore};

/// OAuth token manager
///
/// State machine per user: `Unauthorized -> Authorized(valid) <->
/// Authorized(expired)`; a failed refresh leaves the record in place but
/// unusable until the user re-authorizes.
pub struct TokenManager {
    provider: Arc<dyn AuthProvider>,
    store: Arc<dyn TokenStore>,
    refresh_leeway: Duration,
}

impl TokenManager {
    /// Create a new manager with the default expiry leeway.
    pub fn new(provider: Arc<dyn AuthProvider>, store: Arc<dyn TokenStore>) -> Self {
        Self { provider, store, refresh_leeway: Duration::seconds(TOKEN_REFRESH_LEEWAY_SECS) }
    }

    /// Override the expiry leeway. Zero restores the exact `now > expiry`
    /// comparison with no safety margin.
    pub fn with_refresh_leeway(mut self, leeway: Duration) -> Self {
        self.refresh_leeway = leeway;
        self
    }

    /// Consent-screen URL for starting the authorization flow.
    pub fn authorization_url(&self) -> String {
        self.provider.authorization_url()
    }

    /// Exchange an authorization code and persist the initial record.
    pub async fn connect(&self, user_id: Uuid, code: &str) -> Result<TokenRecord> {
        let token_set = self.provider.exchange_code(code).await?;
        let record = self.persist(user_id, token_set).await?;
        info!(%user_id, "calendar authorization established");
        Ok(record)
    }

    /// Return a usable access token, refreshing once if the stored one has
    /// expired (or falls within the leeway window).
    pub async fn get_valid_access_token(&self, user_id: Uuid) -> Result<String> {
        let record = self
            .store
            .find_record(user_id)
            .await?
            .ok_or_else(|| TasklaneError::NoToken(format!("no token record for user {user_id}")))?;

        if Utc::now() + self.refresh_leeway > record.expiry_date {
            debug!(%user_id, expiry = %record.expiry_date, "access token expired, refreshing");
            return self.refresh_record(user_id, record).await;
        }

        Ok(record.access_token)
    }

    /// Force a refresh from the stored refresh token.
    ///
    /// Refresh failures propagate; the caller must restart the authorization
    /// flow when the provider rejects the refresh token.
    pub async fn refresh(&self, user_id: Uuid) -> Result<String> {
        let record = self.store.find_record(user_id).await?.ok_or_else(|| {
            TasklaneError::NoRefreshToken(format!("no token record for user {user_id}"))
        })?;

        self.refresh_record(user_id, record).await
    }

    async fn refresh_record(&self, user_id: Uuid, record: TokenRecord) -> Result<String> {
        let refresh_token = record.refresh_token.clone().ok_or_else(|| {
            TasklaneError::NoRefreshToken(format!("no refresh token stored for user {user_id}"))
        })?;

        let mut token_set = self.provider.refresh(&refresh_token).await?;

        // Providers rarely reissue the refresh token; carry the stored one
        // forward so the upsert never loses it.
        if token_set.refresh_token.is_none() {
            token_set.refresh_token = Some(refresh_token);
        }

        let record = self.persist(user_id, token_set).await?;
        Ok(record.access_token)
    }

    /// Upsert the record keyed by user id, preserving an existing refresh
    /// token when the new set omits one.
    async fn persist(&self, user_id: Uuid, token_set: TokenSet) -> Result<TokenRecord> {
        let refresh_token = match token_set.refresh_token {
            Some(token) => Some(token),
            None => self
                .store
                .find_record(user_id)
                .await?
                .and_then(|existing| existing.refresh_token),
        };

        let record = TokenRecord {
            user_id,
            access_token: token_set.access_token,
            refresh_token,
            expiry_date: token_set.expiry_date,
        };

        self.store.upsert_record(&record).await?;
        Ok(record)
    }
}
