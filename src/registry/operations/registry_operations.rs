//! Registry-level operations
//!
//! - Create, get and delete the account's registry (`/v2/registry`)
//! - Docker credentials (`GET /v2/registry/docker-credentials`)

use crate::error::Result;
use crate::registry::client::RegistryClient;
use crate::registry::pagination::Response;
use crate::registry::transport::ApiRequest;
use crate::registry::types::{
    DockerCredentials, Registry, RegistryCreateRequest, RegistryDockerCredentialsRequest,
    RegistryRoot,
};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::debug;

impl RegistryClient {
    pub async fn create(
        &self,
        request: &RegistryCreateRequest,
        cancel: &CancellationToken,
    ) -> Result<(Registry, Response)> {
        debug!(registry = %request.name, "Creating registry");

        let url = self.endpoint(["v2", "registry"])?;
        let request = ApiRequest::new(Method::POST, url).with_json(request)?;
        let (root, response): (RegistryRoot, _) = self.fetch(request, cancel).await?;
        Ok((root.registry, response))
    }

    pub async fn get(&self, cancel: &CancellationToken) -> Result<(Registry, Response)> {
        let url = self.endpoint(["v2", "registry"])?;
        let (root, response): (RegistryRoot, _) =
            self.fetch(ApiRequest::new(Method::GET, url), cancel).await?;
        Ok((root.registry, response))
    }

    pub async fn delete(&self, cancel: &CancellationToken) -> Result<Response> {
        debug!("Deleting registry");

        let url = self.endpoint(["v2", "registry"])?;
        self.fetch_empty(ApiRequest::new(Method::DELETE, url), cancel)
            .await
    }

    /// Fetch a Docker `config.json` granting access to the registry.
    ///
    /// The payload is returned byte-for-byte; see [`DockerCredentials::config`]
    /// for parsing it.
    pub async fn docker_credentials(
        &self,
        request: &RegistryDockerCredentialsRequest,
        cancel: &CancellationToken,
    ) -> Result<(DockerCredentials, Response)> {
        let mut url = self.endpoint(["v2", "registry", "docker-credentials"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("read_write", if request.read_write { "true" } else { "false" });
            if let Some(expiry_seconds) = request.expiry_seconds {
                query.append_pair("expiry_seconds", &expiry_seconds.to_string());
            }
        }

        let response = self
            .execute(ApiRequest::new(Method::GET, url), cancel)
            .await?;
        let credentials = DockerCredentials {
            docker_config_json: response.body.to_vec(),
        };
        Ok((credentials, response.response()))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::RegistryError;
    use crate::registry::testing::FakeTransport;
    use crate::registry::types::{RegistryCreateRequest, RegistryDockerCredentialsRequest};
    use chrono::{TimeZone, Utc};
    use reqwest::{Method, StatusCode};
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_create() {
        let transport = FakeTransport::ok(
            r#"{"registry": {"name": "test-registry", "created_at": "2020-04-01T00:00:00Z"}}"#,
        );
        let request = RegistryCreateRequest {
            name: "test-registry".to_string(),
        };

        let (registry, response) = transport
            .client()
            .create(&request, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(registry.name, "test-registry");
        assert_eq!(
            registry.created_at,
            Some(Utc.with_ymd_and_hms(2020, 4, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(response.status, StatusCode::OK);

        let sent = transport.only_request();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url.as_str(), "https://api.example.com/v2/registry");
        let body: RegistryCreateRequest = serde_json::from_slice(&sent.body.unwrap()).unwrap();
        assert_eq!(body, request);
    }

    #[tokio::test]
    async fn test_get_and_delete_send_no_body() {
        let transport = FakeTransport::ok(r#"{"registry": {"name": "test-registry"}}"#);
        let client = transport.client();
        let cancel = CancellationToken::new();

        let (registry, _) = client.get(&cancel).await.unwrap();
        assert_eq!(registry.name, "test-registry");
        assert_eq!(registry.created_at, None);

        client.delete(&cancel).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[1].method, Method::DELETE);
        for request in &requests {
            assert_eq!(request.url.path(), "/v2/registry");
            assert!(request.body.is_none());
        }
    }

    #[tokio::test]
    async fn test_docker_credentials_query() {
        let cases = [
            (RegistryDockerCredentialsRequest::default(), "read_write=false"),
            (
                RegistryDockerCredentialsRequest {
                    read_write: true,
                    expiry_seconds: None,
                },
                "read_write=true",
            ),
            (
                RegistryDockerCredentialsRequest {
                    read_write: false,
                    expiry_seconds: Some(3600),
                },
                "read_write=false&expiry_seconds=3600",
            ),
            (
                RegistryDockerCredentialsRequest {
                    read_write: true,
                    expiry_seconds: Some(3600),
                },
                "read_write=true&expiry_seconds=3600",
            ),
        ];

        for (request, expected_query) in cases {
            let transport = FakeTransport::ok("this could be a docker config");
            let (credentials, _) = transport
                .client()
                .docker_credentials(&request, &CancellationToken::new())
                .await
                .unwrap();

            assert_eq!(credentials.docker_config_json, b"this could be a docker config");

            let sent = transport.only_request();
            assert_eq!(sent.method, Method::GET);
            assert_eq!(sent.url.path(), "/v2/registry/docker-credentials");
            assert_eq!(sent.url.query(), Some(expected_query));
        }
    }

    #[tokio::test]
    async fn test_create_propagates_api_error() {
        let transport = FakeTransport::new(
            StatusCode::CONFLICT,
            r#"{"id": "conflict", "message": "registry already exists"}"#,
        );
        let request = RegistryCreateRequest {
            name: "taken".to_string(),
        };

        let err = transport
            .client()
            .create(&request, &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            RegistryError::Api(api) => {
                assert_eq!(api.status, StatusCode::CONFLICT);
                assert_eq!(api.message, "registry already exists");
            }
            other => panic!("Expected Api error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_malformed_body_is_decode_error() {
        let transport = FakeTransport::ok(r#"{"registry": "not an object"}"#);
        let err = transport
            .client()
            .get(&CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Decode(_)));
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let transport = FakeTransport::ok(r#"{"registry": {"name": "r"}}"#);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = transport.client().delete(&cancel).await.unwrap_err();
        assert!(matches!(err, RegistryError::Cancelled));
        assert!(transport.requests().is_empty());
    }
}
