//! Maps parsed commands onto client calls and prints the results

use crate::cli::args::{Args, Command, GarbageCollectionCommand, PageArgs};
use crate::config::ClientConfig;
use crate::error::{RegistryError, Result};
use crate::registry::{
    ListOptions, RegistryClient, RegistryCreateRequest, RegistryDockerCredentialsRequest,
    Response, UpdateGarbageCollectionRequest,
};
use serde::Serialize;
use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub struct Runner {
    args: Args,
    client: RegistryClient,
}

impl Runner {
    /// Build a runner whose client is configured from the environment,
    /// overridden by command-line flags
    pub fn new(args: Args) -> Result<Self> {
        let config = Self::resolve_config(&args, ClientConfig::from_env()?);
        debug!(api_url = %config.api_url, has_token = config.token.is_some(), "Resolved client configuration");

        let client = RegistryClient::new(config)?;
        Ok(Self { args, client })
    }

    pub fn with_client(args: Args, client: RegistryClient) -> Self {
        Self { args, client }
    }

    fn resolve_config(args: &Args, mut config: ClientConfig) -> ClientConfig {
        if let Some(api_url) = &args.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(token) = &args.token {
            config.token = Some(token.clone());
        }
        if let Some(timeout) = args.timeout {
            config.set_timeout(Duration::from_secs(timeout));
        }
        config
    }

    pub async fn run<W: Write>(&self, out: &mut W, cancel: &CancellationToken) -> Result<()> {
        let client = &self.client;

        match &self.args.command {
            Command::Create { name } => {
                let request = RegistryCreateRequest { name: name.clone() };
                let (registry, _) = client.create(&request, cancel).await?;
                print_json(out, &registry)
            }
            Command::Get => {
                let (registry, _) = client.get(cancel).await?;
                print_json(out, &registry)
            }
            Command::Delete => {
                client.delete(cancel).await?;
                writeln!(out, "Registry deleted")?;
                Ok(())
            }
            Command::DockerCredentials {
                read_write,
                expiry_seconds,
            } => {
                let request = RegistryDockerCredentialsRequest {
                    read_write: *read_write,
                    expiry_seconds: *expiry_seconds,
                };
                let (credentials, _) = client.docker_credentials(&request, cancel).await?;
                out.write_all(&credentials.docker_config_json)?;
                writeln!(out)?;
                Ok(())
            }
            Command::Repositories { registry, page } => {
                let (repositories, response) = client
                    .list_repositories(registry, list_options(page).as_ref(), cancel)
                    .await?;
                print_page(out, "repositories", &repositories, &response)
            }
            Command::Tags {
                registry,
                repository,
                page,
            } => {
                let (tags, response) = client
                    .list_repository_tags(registry, repository, list_options(page).as_ref(), cancel)
                    .await?;
                print_page(out, "tags", &tags, &response)
            }
            Command::DeleteTag {
                registry,
                repository,
                tag,
            } => {
                client.delete_tag(registry, repository, tag, cancel).await?;
                writeln!(out, "Deleted tag {}:{}", repository, tag)?;
                Ok(())
            }
            Command::DeleteManifest {
                registry,
                repository,
                digest,
            } => {
                client
                    .delete_manifest(registry, repository, digest, cancel)
                    .await?;
                writeln!(out, "Deleted manifest {}@{}", repository, digest)?;
                Ok(())
            }
            Command::GarbageCollection(command) => self.run_gc(out, command, cancel).await,
        }
    }

    async fn run_gc<W: Write>(
        &self,
        out: &mut W,
        command: &GarbageCollectionCommand,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let client = &self.client;

        match command {
            GarbageCollectionCommand::Start { registry } => {
                let (gc, _) = client.start_garbage_collection(registry, cancel).await?;
                print_json(out, &gc)
            }
            GarbageCollectionCommand::Get { registry } => {
                let (gc, _) = client.get_garbage_collection(registry, cancel).await?;
                print_json(out, &gc)
            }
            GarbageCollectionCommand::List { registry, page } => {
                let (gcs, response) = client
                    .list_garbage_collections(registry, list_options(page).as_ref(), cancel)
                    .await?;
                print_page(out, "garbage_collections", &gcs, &response)
            }
            GarbageCollectionCommand::Cancel { registry, uuid } => {
                let request = UpdateGarbageCollectionRequest { cancel: true };
                let (gc, _) = client
                    .update_garbage_collection(registry, uuid, &request, cancel)
                    .await?;
                print_json(out, &gc)
            }
        }
    }
}

fn list_options(page: &PageArgs) -> Option<ListOptions> {
    if page.page == 0 && page.per_page == 0 {
        None
    } else {
        Some(ListOptions::new(page.page, page.per_page))
    }
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(RegistryError::Encode)?;
    writeln!(out)?;
    Ok(())
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(RegistryError::Encode)
}

/// Print a list with its pagination metadata
fn print_page<W: Write, T: Serialize>(
    out: &mut W,
    key: &str,
    items: &[T],
    response: &Response,
) -> Result<()> {
    let mut page = serde_json::Map::new();
    page.insert(key.to_string(), to_value(items)?);
    if let Some(links) = &response.links {
        page.insert("links".to_string(), to_value(links)?);
    }
    if let Some(meta) = &response.meta {
        page.insert("meta".to_string(), to_value(meta)?);
    }
    print_json(out, &page)
}
