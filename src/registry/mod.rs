//! Registry module for container registry API interactions
//!
//! This module provides the client, transport and wire types for the
//! registry API: registries, repositories, tags, manifests and garbage
//! collection jobs.

pub mod client;
pub mod operations;
pub mod pagination;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{RegistryClient, RegistryClientBuilder};
pub use pagination::{Links, ListOptions, Meta, Pages, Response};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use types::{
    DockerAuth, DockerConfig, DockerCredentials, GarbageCollection, Registry,
    RegistryCreateRequest, RegistryDockerCredentialsRequest, Repository, RepositoryTag,
    UpdateGarbageCollectionRequest,
};
