//! Google OAuth and Calendar integration

pub mod calendar;
pub mod oauth;

pub use calendar::CalendarPublisher;
pub use oauth::{GoogleAuthProvider, GoogleAuthSettings};
