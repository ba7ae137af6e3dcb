//! Standardized translation of HTTP failures into registry errors

use crate::error::{ApiError, RegistryError};
use reqwest::StatusCode;
use serde::Deserialize;

/// Error body shape used by the API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    request_id: Option<String>,
}

/// Builds [`ApiError`] values from non-2xx responses
pub struct HttpErrorHandler;

impl HttpErrorHandler {
    /// Build an API error from the status and raw body of a failed response
    pub fn api_error(status: StatusCode, body: &[u8]) -> ApiError {
        let parsed = serde_json::from_slice::<ErrorBody>(body).ok();
        let (id, request_id) = match &parsed {
            Some(parsed) => (parsed.id.clone(), parsed.request_id.clone()),
            None => (None, None),
        };

        if let Some(message) = parsed
            .and_then(|parsed| parsed.message)
            .filter(|m| !m.is_empty())
        {
            return ApiError {
                status,
                id,
                message,
                request_id,
            };
        }

        let text = String::from_utf8_lossy(body).trim().to_string();
        let message = if text.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            text
        };

        ApiError {
            status,
            id,
            message,
            request_id,
        }
    }
}

/// Network error categorization
pub struct NetworkErrorHandler;

impl NetworkErrorHandler {
    /// Categorize a reqwest failure and attach the operation context
    pub fn handle_network_error(error: &reqwest::Error, context: &str) -> RegistryError {
        if error.is_timeout() {
            RegistryError::Timeout(format!("{} timed out: {}", context, error))
        } else if error.is_connect() {
            RegistryError::Network(format!("Connection error during {}: {}", context, error))
        } else if error.is_builder() {
            RegistryError::Url(format!("Could not build {}: {}", context, error))
        } else if error.is_decode() || error.is_body() {
            RegistryError::Network(format!("Failed to read {} body: {}", context, error))
        } else {
            RegistryError::Network(format!("{} failed: {}", context, error))
        }
    }
}
