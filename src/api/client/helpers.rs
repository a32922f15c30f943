//! Helper utilities for GraphQL request handling.

use log::warn;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use super::types::{GraphQLError, Token};
use crate::LastFiveError;

/// Maximum number of characters kept from a response body in errors and the
/// transcript.
pub(super) const BODY_SNIPPET_LEN: usize = 500;
/// Maximum number of characters kept from a request payload in error context.
pub(super) const REQUEST_SNIPPET_LEN: usize = 1024;
/// Maximum number of characters kept from a `data` value in decode errors.
pub(super) const VALUE_SNIPPET_LEN: usize = 200;

/// Trim `text` to `max` characters, appending `...` when truncated.
pub(super) fn snippet(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out = text.chars().take(max).collect::<String>();
        out.push_str("...");
        out
    }
}

/// Serialise `payload` for error context, truncated to [`REQUEST_SNIPPET_LEN`].
pub(super) fn payload_snippet(payload: &Value) -> String {
    match serde_json::to_string(payload) {
        Ok(json) => snippet(&json, REQUEST_SNIPPET_LEN),
        Err(e) => {
            warn!("failed to serialise payload snippet: {e}");
            "<failed to serialise payload>".into()
        }
    }
}

/// Name of the operation in `query`, e.g. `IssuesOfRepository`.
///
/// Returns `None` for anonymous operations.
pub(super) fn operation_name(query: &str) -> Option<&str> {
    let trimmed = query.trim_start();
    ["query", "mutation", "subscription"]
        .into_iter()
        .filter_map(|prefix| trimmed.strip_prefix(prefix))
        // "queryX" is not an operation keyword
        .filter(|rest| rest.starts_with(|c: char| c == '{' || c == '(' || c.is_whitespace()))
        .find_map(|rest| {
            rest.trim_start()
                .split(|c: char| c.is_whitespace() || c == '(' || c == '{')
                .next()
                .filter(|name| !name.is_empty())
        })
}

/// Collect the messages of a GraphQL `errors` array.
pub(super) fn graphql_error_messages(errors: Vec<GraphQLError>) -> LastFiveError {
    LastFiveError::ApiErrors(errors.into_iter().map(|e| e.message).collect())
}

/// Build request headers, adding `Authorization` only when a token is set.
pub(super) fn build_headers(token: &Token) -> Result<HeaderMap, LastFiveError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("lastfive"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    if !token.is_empty() {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str())).map_err(
            |e| LastFiveError::RequestContext {
                context: "parse Authorization header".to_string(),
                source: Box::new(e),
            },
        )?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}
