//! GraphQL documents and the variables they take.

use serde::Serialize;

use crate::repo_path::RepoPath;

/// Organization and repository with the last five issues, oldest first.
pub const ISSUES_OF_REPOSITORY_QUERY: &str = r"
    query IssuesOfRepository($organization: String!, $repository: String!) {
      organization(login: $organization) {
        name
        url
        repository(name: $repository) {
          name
          url
          issues(last: 5) {
            edges {
              node {
                id
                title
                url
              }
            }
          }
        }
      }
    }
";

/// Variables for [`ISSUES_OF_REPOSITORY_QUERY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuesVariables {
    pub organization: String,
    pub repository: String,
}

impl From<&RepoPath> for IssuesVariables {
    fn from(path: &RepoPath) -> Self {
        Self {
            organization: path.organization.clone(),
            repository: path.repository.clone(),
        }
    }
}

impl From<RepoPath> for IssuesVariables {
    fn from(path: RepoPath) -> Self {
        Self {
            organization: path.organization,
            repository: path.repository,
        }
    }
}
