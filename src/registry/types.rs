//! Request and response records exchanged with the registry API

use crate::error::{RegistryError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named container image storage namespace, one per account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryCreateRequest {
    pub name: String,
}

/// Parameters for fetching Docker credentials.
///
/// Sent as query parameters; `read_write` is always emitted and
/// `expiry_seconds` only when set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDockerCredentialsRequest {
    #[serde(default)]
    pub read_write: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_seconds: Option<u64>,
}

/// Docker `config.json` payload returned by the credentials endpoint, kept as raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerCredentials {
    pub docker_config_json: Vec<u8>,
}

impl DockerCredentials {
    /// Parse the payload as a Docker `config.json` document
    pub fn config(&self) -> Result<DockerConfig> {
        serde_json::from_slice(&self.docker_config_json)
            .map_err(|e| RegistryError::Credentials(format!("not a docker config: {}", e)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerConfig {
    /// Registry host to credentials
    #[serde(default)]
    pub auths: BTreeMap<String, DockerAuth>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerAuth {
    /// Base64 of `username:password`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

impl DockerAuth {
    /// Decode the `auth` field into a `(username, password)` pair
    pub fn decode_auth(&self) -> Result<(String, String)> {
        let encoded = self
            .auth
            .as_deref()
            .ok_or_else(|| RegistryError::Credentials("missing auth field".to_string()))?;

        let decoded = STANDARD
            .decode(encoded)
            .map_err(|e| RegistryError::Credentials(format!("auth is not base64: {}", e)))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|e| RegistryError::Credentials(format!("auth is not UTF-8: {}", e)))?;

        match decoded.split_once(':') {
            Some((username, password)) => Ok((username.to_string(), password.to_string())),
            None => Err(RegistryError::Credentials(
                "auth must have the form username:password".to_string(),
            )),
        }
    }
}

/// A named collection of tagged image manifests within a registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub registry_name: String,
    pub name: String,
    #[serde(default)]
    pub tag_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_tag: Option<RepositoryTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryTag {
    pub registry_name: String,
    pub repository: String,
    pub tag: String,
    /// Content digest in `algorithm:hex` form
    pub manifest_digest: String,
    #[serde(default)]
    pub compressed_size_bytes: u64,
    #[serde(default)]
    pub size_bytes: u64,
    pub updated_at: DateTime<Utc>,
}

/// A server-side job reclaiming storage held by unreferenced blobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarbageCollection {
    pub uuid: String,
    pub registry_name: String,
    /// Server-defined state such as `requested`, `running` or `succeeded`.
    /// Unknown values are passed through untouched.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub blobs_deleted: u64,
    #[serde(default)]
    pub freed_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateGarbageCollectionRequest {
    pub cancel: bool,
}

// Response envelopes, keyed by resource name

#[derive(Debug, Deserialize)]
pub(crate) struct RegistryRoot {
    pub registry: Registry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoriesRoot {
    #[serde(default)]
    pub repositories: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryTagsRoot {
    #[serde(default)]
    pub tags: Vec<RepositoryTag>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GarbageCollectionRoot {
    pub garbage_collection: GarbageCollection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GarbageCollectionsRoot {
    #[serde(default)]
    pub garbage_collections: Vec<GarbageCollection>,
}
