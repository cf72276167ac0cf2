//! Shared HTTP plumbing for outbound calls

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
