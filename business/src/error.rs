use thiserror::Error;

use crate::http::HttpError;

/// Failure of the user-list fetch.
///
/// Every variant is handled the same way (logged, then an empty list); the split only
/// exists so the log line says what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("API returned status: {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Parse(String),
}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        Self::Network(err.message)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
