//! Container Registry API Client
//!
//! Typed bindings for a cloud provider's container registry REST API:
//! registries, repositories and tags, Docker credentials and garbage
//! collection jobs. Every operation maps onto exactly one HTTP request.

pub mod cli;
pub mod config;
pub mod error;
pub mod registry;

pub use config::ClientConfig;
pub use error::{ApiError, RegistryError, Result};
pub use registry::{RegistryClient, RegistryClientBuilder};
