//! In-memory transport double for unit tests

use crate::error::{RegistryError, Result};
use crate::error::handlers::HttpErrorHandler;
use crate::registry::client::RegistryClient;
use crate::registry::transport::{ApiRequest, ApiResponse, Transport};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Answers every request with the same canned response and records what it saw
pub(crate) struct FakeTransport {
    status: StatusCode,
    body: Bytes,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.into(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn ok(body: &'static str) -> Arc<Self> {
        Self::new(StatusCode::OK, body)
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The single request issued so far
    pub fn only_request(&self) -> ApiRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }

    pub fn client(self: &Arc<Self>) -> RegistryClient {
        RegistryClient::builder()
            .with_api_url("https://api.example.com/")
            .with_transport(self.clone())
            .build()
            .unwrap()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse> {
        if cancel.is_cancelled() {
            return Err(RegistryError::Cancelled);
        }
        self.requests.lock().unwrap().push(request);

        if !self.status.is_success() {
            return Err(HttpErrorHandler::api_error(self.status, &self.body).into());
        }
        Ok(ApiResponse::new(self.status, self.body.clone()))
    }
}
