//! Command-line argument structures.
//!
//! Isolates clap derivations so `main.rs` stays focused on runtime logic.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

/// Strategy used to talk to the GraphQL endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Query handle with `refetch` and derived loading/error states.
    #[default]
    Hook,
    /// Hand-written POST mapped into organization and errors.
    Post,
}

/// Options that apply to every sub-command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// GitHub token for authenticated API requests
    #[arg(long, value_name = "TOKEN", global = true)]
    pub github_token: Option<String>,
    /// GraphQL endpoint; defaults to `GITHUB_GRAPHQL_URL` or api.github.com
    #[arg(long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,
    /// Write an HTTP transcript to this file for debugging
    #[arg(long, global = true)]
    pub transcript: Option<PathBuf>,
    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub http_timeout: Option<u64>,
    /// Retries for transient failures (network errors, 5xx, 429)
    #[arg(long, value_name = "N", global = true)]
    pub retries: Option<usize>,
}

/// Parameters accepted by the `issues` sub-command.
#[derive(Parser, Deserialize, Serialize, Debug, OrthoConfig, Clone, Default)]
#[command(name = "issues")]
#[ortho_config(prefix = "LASTFIVE")]
pub struct IssuesArgs {
    /// Repository as <organization>/<repository>
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Fetch strategy
    #[arg(long, value_enum)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<FetchMode>,
}

/// Parameters accepted by the `browse` sub-command.
///
/// `path` pre-fills the form; each line read from stdin is a new submission.
#[derive(Parser, Deserialize, Serialize, Debug, OrthoConfig, Clone, Default)]
#[command(name = "browse")]
#[ortho_config(prefix = "LASTFIVE")]
pub struct BrowseArgs {
    /// Initial repository as <organization>/<repository>
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Fetch strategy
    #[arg(long, value_enum)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<FetchMode>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the last five issues of a repository
    Issues(IssuesArgs),
    /// Search repeatedly, one `org/repo` per input line
    Browse(BrowseArgs),
}

#[derive(Parser, Debug)]
#[command(
    name = "lastfive",
    version,
    about = "Show the last five issues of a GitHub repository"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}
