//! Shared test helpers for `tasklane-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that
//! service tests can focus on behaviour instead of boilerplate.

pub mod auth;
pub mod repositories;
