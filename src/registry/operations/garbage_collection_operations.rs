//! Garbage collection job operations
//!
//! A registry has at most one active garbage collection at a time
//! (`/garbage-collection`); past runs are listed under `/garbage-collections`.

use crate::error::Result;
use crate::registry::client::RegistryClient;
use crate::registry::pagination::{ListOptions, Response};
use crate::registry::transport::ApiRequest;
use crate::registry::types::{
    GarbageCollection, GarbageCollectionRoot, GarbageCollectionsRoot,
    UpdateGarbageCollectionRequest,
};
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::debug;

impl RegistryClient {
    pub async fn start_garbage_collection(
        &self,
        registry: &str,
        cancel: &CancellationToken,
    ) -> Result<(GarbageCollection, Response)> {
        debug!(registry, "Starting garbage collection");

        let url = self.endpoint(["v2", "registry", registry, "garbage-collection"])?;
        let (root, response): (GarbageCollectionRoot, _) =
            self.fetch(ApiRequest::new(Method::POST, url), cancel).await?;
        Ok((root.garbage_collection, response))
    }

    /// The currently active garbage collection of `registry`
    pub async fn get_garbage_collection(
        &self,
        registry: &str,
        cancel: &CancellationToken,
    ) -> Result<(GarbageCollection, Response)> {
        let url = self.endpoint(["v2", "registry", registry, "garbage-collection"])?;
        let (root, response): (GarbageCollectionRoot, _) =
            self.fetch(ApiRequest::new(Method::GET, url), cancel).await?;
        Ok((root.garbage_collection, response))
    }

    pub async fn list_garbage_collections(
        &self,
        registry: &str,
        options: Option<&ListOptions>,
        cancel: &CancellationToken,
    ) -> Result<(Vec<GarbageCollection>, Response)> {
        let mut url = self.endpoint(["v2", "registry", registry, "garbage-collections"])?;
        if let Some(options) = options {
            options.apply(&mut url);
        }

        let (root, response): (GarbageCollectionsRoot, _) =
            self.fetch(ApiRequest::new(Method::GET, url), cancel).await?;
        Ok((root.garbage_collections, response))
    }

    pub async fn update_garbage_collection(
        &self,
        registry: &str,
        uuid: &str,
        request: &UpdateGarbageCollectionRequest,
        cancel: &CancellationToken,
    ) -> Result<(GarbageCollection, Response)> {
        debug!(registry, uuid, cancel = request.cancel, "Updating garbage collection");

        let url = self.endpoint(["v2", "registry", registry, "garbage-collection", uuid])?;
        let request = ApiRequest::new(Method::PUT, url).with_json(request)?;
        let (root, response): (GarbageCollectionRoot, _) = self.fetch(request, cancel).await?;
        Ok((root.garbage_collection, response))
    }
}
