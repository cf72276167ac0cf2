//! OAuth token-record store backed by the remote store

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tasklane_core::auth::ports::TokenStore;
use tasklane_domain::{Result, TasklaneError, TokenRecord};
use uuid::Uuid;

use super::client::StoreClient;

const TOKENS_TABLE: &str = "user_google_tokens";

/// `TokenStore` implementation over the store's REST interface.
///
/// One row per user; the upsert is keyed on `user_id` and replaces the full
/// row, which is why callers must send the refresh token they intend to keep.
pub struct StoreTokenRepository {
    client: Arc<StoreClient>,
}

impl StoreTokenRepository {
    /// Create a repository over a shared store client.
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TokenStore for StoreTokenRepository {
    async fn find_record(&self, user_id: Uuid) -> Result<Option<TokenRecord>> {
        let request = self
            .client
            .table(Method::GET, TOKENS_TABLE)
            .query(&[("select", "*".to_string()), ("user_id", format!("eq.{user_id}"))]);
        let response = self.client.execute(request).await?;

        let mut rows: Vec<TokenRecord> = response.json().await.map_err(|err| {
            TasklaneError::Internal(format!("failed to decode token record: {err}"))
        })?;

        Ok(rows.pop())
    }

    async fn upsert_record(&self, record: &TokenRecord) -> Result<()> {
        let request = self
            .client
            .table(Method::POST, TOKENS_TABLE)
            .query(&[("on_conflict", "user_id")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(record);
        self.client.execute(request).await?;
        Ok(())
    }
}
