//! Repository operations for registry client
//!
//! - Repository listing (GET /v2/registry/{registry}/repositories)
//! - Tag listing (GET /v2/registry/{registry}/repositories/{repository}/tags)
//! - Tag and manifest deletion
//!
//! Repository names may contain `/`; they always travel as a single
//! percent-encoded path segment.

use crate::error::Result;
use crate::registry::client::RegistryClient;
use crate::registry::pagination::{ListOptions, Response};
use crate::registry::transport::ApiRequest;
use crate::registry::types::{Repository, RepositoryTag, RepositoriesRoot, RepositoryTagsRoot};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::debug;

impl RegistryClient {
    pub async fn list_repositories(
        &self,
        registry: &str,
        options: Option<&ListOptions>,
        cancel: &CancellationToken,
    ) -> Result<(Vec<Repository>, Response)> {
        let mut url = self.endpoint(["v2", "registry", registry, "repositories"])?;
        if let Some(options) = options {
            options.apply(&mut url);
        }

        let (root, response): (RepositoriesRoot, _) =
            self.fetch(ApiRequest::new(Method::GET, url), cancel).await?;
        debug!(
            registry,
            count = root.repositories.len(),
            "Listed repositories"
        );
        Ok((root.repositories, response))
    }

    pub async fn list_repository_tags(
        &self,
        registry: &str,
        repository: &str,
        options: Option<&ListOptions>,
        cancel: &CancellationToken,
    ) -> Result<(Vec<RepositoryTag>, Response)> {
        let mut url = self.endpoint([
            "v2",
            "registry",
            registry,
            "repositories",
            repository,
            "tags",
        ])?;
        if let Some(options) = options {
            options.apply(&mut url);
        }

        let (root, response): (RepositoryTagsRoot, _) =
            self.fetch(ApiRequest::new(Method::GET, url), cancel).await?;
        debug!(
            registry,
            repository,
            count = root.tags.len(),
            "Listed repository tags"
        );
        Ok((root.tags, response))
    }

    pub async fn delete_tag(
        &self,
        registry: &str,
        repository: &str,
        tag: &str,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        debug!(registry, repository, tag, "Deleting tag");

        let url = self.endpoint([
            "v2",
            "registry",
            registry,
            "repositories",
            repository,
            "tags",
            tag,
        ])?;
        self.fetch_empty(ApiRequest::new(Method::DELETE, url), cancel)
            .await
    }

    /// Delete a manifest by its `algorithm:hex` digest
    pub async fn delete_manifest(
        &self,
        registry: &str,
        repository: &str,
        digest: &str,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        debug!(registry, repository, digest, "Deleting manifest");

        let url = self.endpoint([
            "v2",
            "registry",
            registry,
            "repositories",
            repository,
            "digests",
            digest,
        ])?;
        self.fetch_empty(ApiRequest::new(Method::DELETE, url), cancel)
            .await
    }
}
