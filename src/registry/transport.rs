//! Request executor seam between the registry client and the HTTP stack
//!
//! [`RegistryClient`](crate::registry::RegistryClient) only ever talks to a
//! [`Transport`]. [`HttpTransport`] is the reqwest-backed implementation; tests
//! substitute their own.

use crate::config::ClientConfig;
use crate::error::handlers::{HttpErrorHandler, NetworkErrorHandler};
use crate::error::{RegistryError, Result};
use crate::registry::pagination::{Envelope, Links, Meta, Response};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

/// A fully resolved API request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    /// JSON-encoded body
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
        }
    }

    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body).map_err(RegistryError::Encode)?);
        Ok(self)
    }
}

/// A successful (2xx) response with its pagination envelope already extracted
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Bytes,
    pub links: Option<Links>,
    pub meta: Option<Meta>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Bytes) -> Self {
        let envelope = Envelope::from_body(&body);
        Self {
            status,
            body,
            links: envelope.links,
            meta: envelope.meta,
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Response metadata taken leniently from the body; non-JSON bodies
    /// simply carry no pagination
    pub fn response(&self) -> Response {
        Response {
            status: self.status,
            links: self.links.clone(),
            meta: self.meta,
        }
    }

    /// Response metadata for a JSON entity body. A malformed `links` or
    /// `meta` is a [`RegistryError::Decode`].
    pub fn entity_response(&self) -> Result<Response> {
        let envelope = Envelope::decode(&self.body)?;
        Ok(Response {
            status: self.status,
            links: envelope.links,
            meta: envelope.meta,
        })
    }
}

/// Executes one request and returns the decorated response.
///
/// Implementations must map non-2xx statuses to [`RegistryError::Api`] and a
/// fired `cancel` token to [`RegistryError::Cancelled`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest, cancel: &CancellationToken)
    -> Result<ApiResponse>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                RegistryError::Configuration("API token contains invalid characters".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| {
                RegistryError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = self.client.request(request.method.clone(), request.url.clone());
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, "registry API request"))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, "registry API response"))?;

        if !status.is_success() {
            let err = HttpErrorHandler::api_error(status, &body);
            warn!(
                method = %request.method,
                url = %request.url,
                status = status.as_u16(),
                message = %err.message,
                "Registry API request failed"
            );
            return Err(err.into());
        }

        debug!(
            method = %request.method,
            url = %request.url,
            status = status.as_u16(),
            bytes = body.len(),
            "Registry API request succeeded"
        );
        Ok(ApiResponse::new(status, body))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse> {
        if cancel.is_cancelled() {
            return Err(RegistryError::Cancelled);
        }

        debug!(method = %request.method, url = %request.url, "Sending registry API request");

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Registry API request cancelled");
                Err(RegistryError::Cancelled)
            }
            result = self.send(request) => result,
        }
    }
}
