//! Error types for registry API operations

pub mod handlers;

use reqwest::StatusCode;
use std::fmt;

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Connection, DNS and TLS failures reported by the HTTP stack
    #[error("Network error: {0}")]
    Network(String),
    /// The transport gave up waiting for the server
    #[error("Timeout: {0}")]
    Timeout(String),
    /// The server answered with a non-2xx status
    #[error(transparent)]
    Api(#[from] ApiError),
    /// A successful response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// An outgoing value could not be serialized
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Invalid URL: {0}")]
    Url(String),
    /// The caller's cancellation token fired before the response arrived
    #[error("Request cancelled")]
    Cancelled,
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The Docker config payload could not be interpreted
    #[error("Invalid docker credentials: {0}")]
    Credentials(String),
}

impl RegistryError {
    /// HTTP status of the failed call, when the server produced one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RegistryError::Api(err) => Some(err.status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<url::ParseError> for RegistryError {
    fn from(err: url::ParseError) -> Self {
        RegistryError::Url(err.to_string())
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        handlers::NetworkErrorHandler::handle_network_error(&err, "registry API request")
    }
}

/// Error returned by the API for a non-2xx response.
///
/// The server usually answers with `{"id": ..., "message": ..., "request_id": ...}`;
/// when the body is not in that shape the raw text becomes the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    /// Machine-readable error identifier such as `not_found`
    pub id: Option<String>,
    pub message: String,
    pub request_id: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error {}: {}", self.status, self.message)?;
        if let Some(request_id) = &self.request_id {
            write!(f, " (request id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_request_id() {
        let err = ApiError {
            status: StatusCode::NOT_FOUND,
            id: Some("not_found".to_string()),
            message: "registry not found".to_string(),
            request_id: Some("abc-123".to_string()),
        };

        assert_eq!(
            err.to_string(),
            "API error 404 Not Found: registry not found (request id: abc-123)"
        );
    }

    #[test]
    fn test_status_and_not_found() {
        let err = RegistryError::from(ApiError {
            status: StatusCode::NOT_FOUND,
            id: None,
            message: "missing".to_string(),
            request_id: None,
        });
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(err.is_not_found());

        assert_eq!(RegistryError::Cancelled.status(), None);
        assert!(!RegistryError::Cancelled.is_not_found());
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let err: RegistryError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, RegistryError::Url(_)));
    }
}
