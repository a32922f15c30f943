//! GraphQL client implementation and request orchestration.

mod helpers;
mod transcript;
mod types;

use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Mutex;

use backon::Retryable;
use log::{debug, warn};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::time::sleep;

use crate::LastFiveError;

use self::helpers::{
    BODY_SNIPPET_LEN, VALUE_SNIPPET_LEN, build_headers, graphql_error_messages, operation_name,
    payload_snippet, snippet,
};
use self::types::HttpResponse;
use super::retry::{RetryConfig, build_retry_builder, should_retry};

pub use self::types::{Endpoint, GITHUB_GRAPHQL_URL, GraphQLError, GraphQLResponse, Query, Token};

/// Client for communicating with the GitHub GraphQL API.
///
/// The client handles authentication headers and optional request
/// transcription for debugging.
pub struct GraphQLClient {
    client: reqwest::Client,
    headers: HeaderMap,
    endpoint: Endpoint,
    transcript: Option<Mutex<BufWriter<std::fs::File>>>,
    retry: RetryConfig,
}

impl GraphQLClient {
    /// Create a client targeting a custom API endpoint.
    ///
    /// # Errors
    ///
    /// See [`GraphQLClient::with_endpoint_retry`].
    pub fn with_endpoint(
        token: impl Into<Token>,
        endpoint: impl Into<Endpoint>,
        transcript: Option<PathBuf>,
    ) -> Result<Self, LastFiveError> {
        Self::with_endpoint_retry(token, endpoint, transcript, RetryConfig::default())
    }

    /// Create a client targeting a custom API endpoint with custom retry settings.
    ///
    /// # Errors
    ///
    /// Returns a [`LastFiveError`] if the transcript file cannot be created,
    /// the endpoint is not a URL or the authorization header is invalid.
    pub fn with_endpoint_retry(
        token: impl Into<Token>,
        endpoint: impl Into<Endpoint>,
        transcript: Option<PathBuf>,
        retry: RetryConfig,
    ) -> Result<Self, LastFiveError> {
        let token = token.into();
        let endpoint = endpoint.into();
        url::Url::parse(endpoint.as_str()).map_err(|source| LastFiveError::InvalidEndpoint {
            endpoint: endpoint.as_str().to_owned(),
            source,
        })?;
        let transcript = transcript
            .map(|p| std::fs::File::create(p).map(|file| Mutex::new(BufWriter::new(file))))
            .transpose()?;
        let headers = build_headers(&token)?;
        Ok(Self {
            client: reqwest::Client::new(),
            headers,
            endpoint,
            transcript,
            retry,
        })
    }

    /// POST `payload` once and return the status code and body.
    ///
    /// # Errors
    ///
    /// Returns [`LastFiveError::RequestContext`] if the request cannot be sent
    /// or its body read, and [`LastFiveError::Status`] for non-2xx replies.
    async fn execute_single_request(
        &self,
        payload: &Value,
        operation: &str,
    ) -> Result<HttpResponse, LastFiveError> {
        let context = |status: Option<u16>| {
            let base = format!("operation {operation}; {}", payload_snippet(payload));
            match status {
                Some(s) => format!("{base}; status {s}"),
                None => base,
            }
        };

        debug!("POST {} operation={operation}", self.endpoint.as_str());
        let response = self
            .client
            .post(self.endpoint.as_str())
            .headers(self.headers.clone())
            .json(payload)
            .timeout(self.retry.request_timeout)
            .send()
            .await
            .map_err(|e| LastFiveError::RequestContext {
                context: context(None),
                source: e.into(),
            })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LastFiveError::RequestContext {
                context: context(Some(status)),
                source: e.into(),
            })?;
        let resp = HttpResponse { status, body };
        self.log_transcript(payload, operation, &resp);
        if !(200..300).contains(&status) {
            return Err(LastFiveError::Status {
                status,
                snippet: snippet(&resp.body, BODY_SNIPPET_LEN),
            });
        }
        Ok(resp)
    }

    /// Split a response body into typed `data` and the raw `errors` array.
    ///
    /// # Errors
    ///
    /// Returns [`LastFiveError::BadResponseSerde`] if the body is not a
    /// GraphQL envelope or `data` does not match `T`; the message names the
    /// offending JSON path.
    fn parse_envelope<T>(resp: &HttpResponse) -> Result<GraphQLResponse<T>, LastFiveError>
    where
        T: DeserializeOwned,
    {
        let status = resp.status;
        let envelope: GraphQLResponse<Value> =
            serde_json::from_str(&resp.body).map_err(|e| LastFiveError::BadResponseSerde {
                status,
                message: e.to_string(),
                snippet: snippet(&resp.body, BODY_SNIPPET_LEN),
            })?;
        let data = envelope
            .data
            .map(|value| {
                serde_path_to_error::deserialize::<_, T>(&value).map_err(|e| {
                    let snippet = match serde_json::to_string_pretty(&value) {
                        Ok(json) => snippet(&json, VALUE_SNIPPET_LEN),
                        Err(err) => {
                            warn!("failed to serialise error snippet: {err}");
                            "<failed to serialise error snippet>".to_string()
                        }
                    };
                    let path = e.path().to_string();
                    LastFiveError::BadResponseSerde {
                        status,
                        message: format!("{} at {path}", e.into_inner()),
                        snippet,
                    }
                })
            })
            .transpose()?;
        Ok(GraphQLResponse {
            data,
            errors: envelope.errors,
        })
    }

    fn request_payload<V>(query: &Query, variables: V) -> (Value, String)
    where
        V: serde::Serialize,
    {
        let op_name = operation_name(query.as_str());
        let operation = op_name.map_or_else(|| snippet(query.as_str(), 64), str::to_string);
        let mut payload = json!({ "query": query.as_str(), "variables": variables });
        if let (Some(name), Some(obj)) = (op_name, payload.as_object_mut()) {
            obj.insert("operationName".into(), json!(name));
        }
        (payload, operation)
    }

    /// Execute a query the way a GraphQL client library does: GraphQL errors
    /// become an `Err`, transient failures are retried per [`RetryConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`LastFiveError::ApiErrors`] when the response carries an
    /// `errors` array, [`LastFiveError::EmptyResponse`] when `data` is absent,
    /// and transport or decode errors otherwise.
    pub async fn run_query<V, T>(
        &self,
        query: impl Into<Query>,
        variables: V,
    ) -> Result<T, LastFiveError>
    where
        V: serde::Serialize,
        T: DeserializeOwned,
    {
        let query = query.into();
        let (payload, operation) = Self::request_payload(&query, variables);
        let builder = build_retry_builder(self.retry);
        (|| async {
            let resp = self.execute_single_request(&payload, &operation).await?;
            let envelope = Self::parse_envelope::<T>(&resp)?;
            if let Some(errs) = envelope.errors.filter(|errs| !errs.is_empty()) {
                return Err(graphql_error_messages(errs));
            }
            envelope.data.ok_or_else(|| LastFiveError::EmptyResponse {
                status: resp.status,
                operation: operation.clone(),
                snippet: snippet(&resp.body, BODY_SNIPPET_LEN),
            })
        })
        .retry(builder)
        .sleep(sleep)
        .when(should_retry)
        .notify(|err: &LastFiveError, dur| warn!("retrying GraphQL query after {dur:?}: {err}"))
        .await
    }

    /// POST a query once and return the whole response envelope, leaving the
    /// interpretation of `data` next to `errors` to the caller.
    ///
    /// # Errors
    ///
    /// Returns transport, status and decode errors. GraphQL errors are not
    /// errors here; they are returned in [`GraphQLResponse::errors`].
    pub async fn post<V, T>(
        &self,
        query: impl Into<Query>,
        variables: V,
    ) -> Result<GraphQLResponse<T>, LastFiveError>
    where
        V: serde::Serialize,
        T: DeserializeOwned,
    {
        let query = query.into();
        let (payload, operation) = Self::request_payload(&query, variables);
        let resp = self.execute_single_request(&payload, &operation).await?;
        Self::parse_envelope(&resp)
    }
}
