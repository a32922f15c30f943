//! Fetch the last five issues of a GitHub repository over GraphQL.
//!
//! The crate splits an `organization/repository` path, posts the issues
//! query through [`GraphQLClient`] using either the query-hook strategy
//! ([`hook`]) or a hand-written POST ([`fetcher`]), keeps the result in an
//! [`App`] and renders it with [`render`].

pub mod api;
pub mod app;
pub mod auth;
pub mod cli_args;
pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod fetcher;
pub mod graphql_queries;
pub mod hook;
pub mod models;
pub mod render;
pub mod repo_path;
pub mod test_utils;

pub use api::{GraphQLClient, GraphQLError, GraphQLResponse, RetryConfig};
pub use app::{App, View};
pub use cli_args::{BrowseArgs, FetchMode, GlobalArgs, IssuesArgs};
pub use error::LastFiveError;
pub use fetcher::{RepositoryState, fetch_issues_of_repository};
pub use graphql_queries::{ISSUES_OF_REPOSITORY_QUERY, IssuesVariables};
pub use hook::{QueryHook, QueryState};
pub use models::{Issue, IssuesData, Organization, Repository};
pub use repo_path::{DEFAULT_PATH, RepoPath};
