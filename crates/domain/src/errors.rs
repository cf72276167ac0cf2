//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Tasklane
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TasklaneError {
    /// Query or constraint failure reported by the remote store.
    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    /// No authenticated user session for the request.
    #[error("Authentication required: {0}")]
    AuthRequired(String),

    /// No OAuth token record exists for the user.
    #[error("No token record: {0}")]
    NoToken(String),

    /// Token record exists but carries no refresh token.
    #[error("No refresh token: {0}")]
    NoRefreshToken(String),

    /// Provider rejected the authorization-code exchange.
    #[error("Authorization code exchange failed: {0}")]
    AuthExchange(String),

    /// Provider rejected the refresh request; caller must re-authorize.
    #[error("Token refresh failed: {0}")]
    AuthRefresh(String),

    /// Remote provider rejected an otherwise well-formed request.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Tasklane operations
pub type Result<T> = std::result::Result<T, TasklaneError>;
