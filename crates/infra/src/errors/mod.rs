//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use tasklane_domain::TasklaneError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TasklaneError);

impl From<InfraError> for TasklaneError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TasklaneError> for InfraError {
    fn from(value: TasklaneError) -> Self {
        InfraError(value)
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        let error = if value.is_timeout() {
            TasklaneError::Network(format!("http request timed out: {value}"))
        } else if value.is_connect() {
            TasklaneError::Network(format!("http connection failed: {value}"))
        } else if value.is_decode() {
            TasklaneError::Internal(format!("failed to decode http response: {value}"))
        } else if value.is_builder() {
            TasklaneError::Config(format!("invalid http request: {value}"))
        } else {
            TasklaneError::Network(format!("http request failed: {value}"))
        };

        InfraError(error)
    }
}
