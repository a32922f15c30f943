//! GitHub GraphQL transport.
//!
//! [`GraphQLClient`] posts `{query, variables}` documents to the GraphQL
//! endpoint with bearer authentication. [`GraphQLClient::run_query`] behaves
//! like a GraphQL client library (errors are failures, optional retries);
//! [`GraphQLClient::post`] hands back the raw `data`/`errors` envelope.

mod client;
pub mod retry;

pub use client::{
    Endpoint, GITHUB_GRAPHQL_URL, GraphQLClient, GraphQLError, GraphQLResponse, Query, Token,
};
pub use retry::RetryConfig;
