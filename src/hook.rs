//! Query handle in the style of a GraphQL client library's query hook.
//!
//! The handle owns the current variables and derives `loading`/`error`
//! states itself; callers only ever run or refetch it.

use log::{debug, info};

use crate::api::GraphQLClient;
use crate::graphql_queries::{ISSUES_OF_REPOSITORY_QUERY, IssuesVariables};
use crate::models::IssuesData;

/// Observable state of a [`QueryHook`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryState {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    Loading,
    /// Last request succeeded; the organization went to the caller.
    Ready,
    /// Last request failed with this user-facing message.
    Failed(String),
}

impl QueryState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The issues query bound to a client and a set of variables.
pub struct QueryHook<'c> {
    client: &'c GraphQLClient,
    variables: IssuesVariables,
    state: QueryState,
}

impl<'c> QueryHook<'c> {
    #[must_use]
    pub fn new(client: &'c GraphQLClient, variables: IssuesVariables) -> Self {
        Self {
            client,
            variables,
            state: QueryState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    #[must_use]
    pub fn variables(&self) -> &IssuesVariables {
        &self.variables
    }

    /// Run the query with the current variables.
    ///
    /// Returns the response data on completion. Failures are recorded in
    /// [`QueryHook::state`] and yield `None`.
    pub async fn run(&mut self) -> Option<IssuesData> {
        self.state = QueryState::Loading;
        debug!(
            "running issues query for {}/{}",
            self.variables.organization, self.variables.repository
        );
        match self
            .client
            .run_query::<_, IssuesData>(ISSUES_OF_REPOSITORY_QUERY, &self.variables)
            .await
        {
            Ok(data) => {
                self.state = QueryState::Ready;
                Some(data)
            }
            Err(e) => {
                info!("issues query failed: {e}");
                self.state = QueryState::Failed(e.display_message());
                None
            }
        }
    }

    /// Replace the variables and run the query again.
    pub async fn refetch(&mut self, variables: IssuesVariables) -> Option<IssuesData> {
        self.variables = variables;
        self.run().await
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryHook, QueryState};
    use crate::api::GraphQLClient;
    use crate::graphql_queries::IssuesVariables;
    use rstest::rstest;

    #[rstest]
    #[case(QueryState::Idle, false, None)]
    #[case(QueryState::Loading, true, None)]
    #[case(QueryState::Ready, false, None)]
    #[case(QueryState::Failed("boom".into()), false, Some("boom"))]
    fn derived_flags(
        #[case] state: QueryState,
        #[case] loading: bool,
        #[case] error: Option<&str>,
    ) {
        assert_eq!(state.is_loading(), loading);
        assert_eq!(state.error(), error);
    }

    #[tokio::test]
    async fn unreachable_endpoint_records_failure() {
        let client = GraphQLClient::with_endpoint("", "http://127.0.0.1:9/graphql", None)
            .expect("client");
        let vars = IssuesVariables {
            organization: "o".into(),
            repository: "r".into(),
        };
        let mut hook = QueryHook::new(&client, vars);
        assert!(hook.run().await.is_none());
        assert!(hook.state().error().is_some());
        assert_eq!(hook.variables().repository, "r");
    }
}
