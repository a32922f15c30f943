//! Data structures for GraphQL responses.

use serde::Deserialize;

/// `data` payload of the issues query.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct IssuesData {
    pub organization: Option<Organization>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Organization {
    /// Display name; GitHub returns `null` when the organization has none.
    pub name: Option<String>,
    pub url: String,
    pub repository: Option<Repository>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub url: String,
    pub issues: IssueConnection,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct IssueConnection {
    pub edges: Vec<IssueEdge>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct IssueEdge {
    pub node: Issue,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub url: String,
}

impl IssueConnection {
    /// Issues in the order the server returned them.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.edges.iter().map(|edge| &edge.node)
    }
}
