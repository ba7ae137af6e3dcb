//! Registry API operations, grouped by resource family
//!
//! Each submodule adds methods to [`RegistryClient`](crate::registry::RegistryClient);
//! every method issues exactly one request.

pub mod garbage_collection_operations;
pub mod registry_operations;
pub mod repository_operations;
