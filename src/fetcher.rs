//! Hand-written fetch of a repository's issues.
//!
//! One POST per call with no retry; the raw response is mapped into the
//! state shape the presentation layer consumes.

use log::debug;

use crate::LastFiveError;
use crate::api::{GraphQLClient, GraphQLError, GraphQLResponse};
use crate::graphql_queries::{ISSUES_OF_REPOSITORY_QUERY, IssuesVariables};
use crate::models::{IssuesData, Organization};
use crate::repo_path::RepoPath;

/// State owned by the top-level application: the searched path plus the
/// last result for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryState {
    pub path: String,
    pub organization: Option<Organization>,
    pub errors: Option<Vec<GraphQLError>>,
}

impl RepositoryState {
    /// State for `path` before anything has been fetched.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Map a raw GraphQL response for `path` into state.
    ///
    /// An empty `errors` array counts as no errors.
    #[must_use]
    pub fn from_response(path: impl Into<String>, response: GraphQLResponse<IssuesData>) -> Self {
        Self {
            path: path.into(),
            organization: response.data.and_then(|data| data.organization),
            errors: response.errors.filter(|errors| !errors.is_empty()),
        }
    }

    /// Messages of the GraphQL errors, joined by a space.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.errors.as_ref().map(|errors| {
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
    }
}

/// Split `path`, POST the issues query once and map the response.
///
/// # Errors
///
/// Returns [`LastFiveError::InvalidPath`] for a path without a repository,
/// and transport, status or decode errors from the request. GraphQL errors
/// are not failures; they end up in [`RepositoryState::errors`].
pub async fn fetch_issues_of_repository(
    client: &GraphQLClient,
    path: &str,
) -> Result<RepositoryState, LastFiveError> {
    let repo = RepoPath::split(path)?;
    debug!("posting issues query for {repo}");
    let response = client
        .post::<_, IssuesData>(ISSUES_OF_REPOSITORY_QUERY, IssuesVariables::from(repo))
        .await?;
    Ok(RepositoryState::from_response(path, response))
}
