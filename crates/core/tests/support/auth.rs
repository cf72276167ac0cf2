//! Mock implementations of the auth ports for testing

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tasklane_core::auth::ports::{AuthProvider, TokenStore};
use tasklane_domain::{Result as DomainResult, TasklaneError, TokenRecord, TokenSet};
use uuid::Uuid;

/// In-memory mock for `TokenStore` keyed by user id.
#[derive(Default, Clone)]
pub struct MockTokenStore {
    records: Arc<Mutex<HashMap<Uuid, TokenRecord>>>,
}

impl MockTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience helper for seeding a record.
    pub fn with_record(self, record: TokenRecord) -> Self {
        self.records.lock().unwrap().insert(record.user_id, record);
        self
    }

    /// Direct read-back for assertions.
    pub fn record(&self, user_id: Uuid) -> Option<TokenRecord> {
        self.records.lock().unwrap().get(&user_id).cloned()
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn find_record(&self, user_id: Uuid) -> DomainResult<Option<TokenRecord>> {
        Ok(self.records.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert_record(&self, record: &TokenRecord) -> DomainResult<()> {
        self.records.lock().unwrap().insert(record.user_id, record.clone());
        Ok(())
    }
}

/// Scripted mock for `AuthProvider` with call counters.
///
/// A `None` response makes the corresponding operation fail the way the
/// provider would (invalid code / revoked refresh token).
#[derive(Default)]
pub struct MockAuthProvider {
    exchange_response: Mutex<Option<TokenSet>>,
    refresh_response: Mutex<Option<TokenSet>>,
    exchange_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
}

impl MockAuthProvider {
    /// Create a provider that rejects every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the response to `exchange_code`.
    pub fn with_exchange_response(self, token_set: TokenSet) -> Self {
        *self.exchange_response.lock().unwrap() = Some(token_set);
        self
    }

    /// Script the response to `refresh`.
    pub fn with_refresh_response(self, token_set: TokenSet) -> Self {
        *self.refresh_response.lock().unwrap() = Some(token_set);
        self
    }

    /// Number of `exchange_code` calls observed.
    pub fn exchange_calls(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }

    /// Number of `refresh` calls observed.
    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    fn authorization_url(&self) -> String {
        "https://accounts.google.com/o/oauth2/v2/auth?client_id=test".to_string()
    }

    async fn exchange_code(&self, _code: &str) -> DomainResult<TokenSet> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        self.exchange_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| TasklaneError::AuthExchange("invalid_grant".into()))
    }

    async fn refresh(&self, _refresh_token: &str) -> DomainResult<TokenSet> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refresh_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| TasklaneError::AuthRefresh("invalid_grant".into()))
    }
}
