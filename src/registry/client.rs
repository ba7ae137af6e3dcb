// RegistryClient binds the registry API operations to a Transport. The
// operations themselves live in registry/operations, one file per resource
// family; this file holds construction and the shared request plumbing.

use crate::config::ClientConfig;
use crate::error::{RegistryError, Result};
use crate::registry::pagination::Response;
use crate::registry::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

pub struct RegistryClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl RegistryClientBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            transport: None,
        }
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.config.api_url = api_url.into();
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.config.token = token;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Whole-request timeout. `Duration::ZERO` disables it.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.set_timeout(timeout);
        self
    }

    /// Use a custom transport instead of the reqwest one built from the config.
    /// Token, user agent and timeout are then the transport's business.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<RegistryClient> {
        let base_url = self.config.base_url()?;
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };

        Ok(RegistryClient {
            transport,
            base_url,
        })
    }
}

impl Default for RegistryClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the container registry API.
///
/// Holds no mutable state; clones share the same transport.
#[derive(Clone)]
pub struct RegistryClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
}

impl fmt::Debug for RegistryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RegistryClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().with_config(config).build()
    }

    pub fn builder() -> RegistryClientBuilder {
        RegistryClientBuilder::new()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `segments` under the base URL. Each segment is percent-encoded
    /// on its own, so `test/repository` becomes `test%2Frepository`.
    pub(crate) fn endpoint<I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RegistryError::Url(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn execute(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse> {
        self.transport.execute(request, cancel).await
    }

    /// Execute and decode the body into `T`
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<(T, Response)> {
        let response = self.execute(request, cancel).await?;
        let decoded = response.json()?;
        Ok((decoded, response.entity_response()?))
    }

    /// Execute without decoding an entity
    pub(crate) async fn fetch_empty(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        let response = self.execute(request, cancel).await?;
        Ok(response.response())
    }
}
