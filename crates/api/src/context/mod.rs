//! Application context - dependency injection container

use std::sync::Arc;

use tasklane_core::auth::ports::{AuthProvider, SessionVerifier, TokenStore};
use tasklane_core::tasks::ports::TaskRepository;
use tasklane_core::{TaskService, TokenManager};
use tasklane_domain::{Config, Result};
use tasklane_infra::{
    CalendarPublisher, GoogleAuthProvider, GoogleAuthSettings, SlackNotifier, StoreClient,
    StoreSessionVerifier, StoreTaskRepository, StoreTokenRepository,
};
use tracing::info;

/// Application context - holds all services and dependencies
///
/// Collaborators are constructed once at startup and injected into request
/// handlers through shared state; nothing builds ad hoc clients per call.
pub struct AppContext {
    pub config: Config,
    pub tasks: TaskService,
    pub tokens: Arc<TokenManager>,
    pub calendar: CalendarPublisher,
    pub sessions: Arc<dyn SessionVerifier>,
}

impl AppContext {
    /// Wire the production implementations against the configured store and
    /// providers.
    pub fn new(config: Config) -> Result<Self> {
        let store = Arc::new(StoreClient::new(&config.store, &config.http)?);

        let task_repository: Arc<dyn TaskRepository> =
            Arc::new(StoreTaskRepository::new(store.clone()));
        let token_store: Arc<dyn TokenStore> = Arc::new(StoreTokenRepository::new(store.clone()));
        let sessions: Arc<dyn SessionVerifier> = Arc::new(StoreSessionVerifier::new(store));

        let provider: Arc<dyn AuthProvider> = Arc::new(GoogleAuthProvider::new(
            GoogleAuthSettings::new(&config.google),
            &config.http,
        )?);
        let tokens = Arc::new(TokenManager::new(provider, token_store));

        let mut calendar = CalendarPublisher::new(tokens.clone(), &config.http)?;
        if let Some(api_base) = &config.google.api_base {
            calendar = calendar.with_api_base(api_base.clone());
        }

        let mut tasks = TaskService::new(task_repository);
        match &config.slack.webhook_url {
            Some(url) => {
                tasks = tasks.with_notifier(Arc::new(SlackNotifier::new(url, &config.http)?));
                info!("Slack notifications enabled");
            }
            None => info!("Slack notifications disabled (no webhook configured)"),
        }

        Ok(Self { config, tasks, tokens, calendar, sessions })
    }
}
