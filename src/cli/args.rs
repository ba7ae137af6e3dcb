//! Command-line argument parsing

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "registryctl")]
#[command(about = "Manage a container registry through its REST API")]
#[command(version)]
pub struct Args {
    /// API base URL (defaults to REGISTRY_API_URL or the public API)
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// API token (defaults to REGISTRY_API_TOKEN)
    #[arg(long = "token", global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds, 0 for none
    #[arg(long = "timeout", global = true)]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the account's registry
    Create {
        /// Registry name
        name: String,
    },
    /// Show the account's registry
    Get,
    /// Delete the account's registry
    Delete,
    /// Print a Docker config.json granting access to the registry
    DockerCredentials {
        /// Request push access in addition to pull
        #[arg(long = "read-write")]
        read_write: bool,
        /// Credential lifetime in seconds
        #[arg(long = "expiry-seconds")]
        expiry_seconds: Option<u64>,
    },
    /// List repositories of a registry
    Repositories {
        registry: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// List tags of a repository
    Tags {
        registry: String,
        repository: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Delete a tag from a repository
    DeleteTag {
        registry: String,
        repository: String,
        tag: String,
    },
    /// Delete a manifest by digest
    DeleteManifest {
        registry: String,
        repository: String,
        /// Manifest digest, e.g. sha256:...
        digest: String,
    },
    /// Garbage collection commands
    #[command(subcommand, visible_alias = "gc")]
    GarbageCollection(GarbageCollectionCommand),
}

#[derive(Subcommand, Debug)]
pub enum GarbageCollectionCommand {
    /// Start a garbage collection
    Start { registry: String },
    /// Show the active garbage collection
    Get { registry: String },
    /// List past garbage collections
    List {
        registry: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Cancel a garbage collection
    Cancel { registry: String, uuid: String },
}

#[derive(ClapArgs, Debug, Clone, Copy, Default)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long = "page", default_value_t = 0)]
    pub page: u32,
    /// Items per page
    #[arg(long = "per-page", default_value_t = 0)]
    pub per_page: u32,
}
