//! # Tasklane API
//!
//! HTTP application layer - routes and main entry point.
//!
//! This crate contains:
//! - axum routes (HTTP -> service bridge)
//! - Application context (dependency injection)
//! - Request extractors and error mapping
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Provides the HTTP surface for clients

pub mod context;
pub mod error;
pub mod extract;
pub mod routes;
pub mod utils;

// Re-export for convenience
pub use context::AppContext;
pub use error::ApiError;
pub use routes::router;
