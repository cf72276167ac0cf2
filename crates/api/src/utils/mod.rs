//! API-layer utilities

pub mod logging;
