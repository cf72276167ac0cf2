//! Remote store access (tasks, token records, sessions)

pub mod client;
pub mod sessions;
pub mod task_repository;
pub mod token_repository;

pub use client::StoreClient;
pub use sessions::StoreSessionVerifier;
pub use task_repository::StoreTaskRepository;
pub use token_repository::StoreTokenRepository;
