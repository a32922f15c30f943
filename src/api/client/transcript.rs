//! JSON-lines transcript of GraphQL exchanges.

use std::io::Write as _;

use log::warn;
use serde_json::json;

use super::GraphQLClient;
use super::helpers::{BODY_SNIPPET_LEN, snippet};
use super::types::HttpResponse;

impl GraphQLClient {
    /// Append one line describing `payload` and `resp` when a transcript is
    /// configured. Failures are logged and otherwise ignored.
    pub(super) fn log_transcript(
        &self,
        payload: &serde_json::Value,
        operation: &str,
        resp: &HttpResponse,
    ) {
        let Some(transcript) = &self.transcript else {
            return;
        };
        let line = json!({
            "operation": operation,
            "status": resp.status,
            "request": payload,
            "response": snippet(&resp.body, BODY_SNIPPET_LEN)
        });
        let Ok(mut file) = transcript.lock() else {
            warn!("failed to lock transcript for op={operation}");
            return;
        };
        if let Err(e) = writeln!(file, "{line}").and_then(|()| file.flush()) {
            warn!("failed to write transcript for op={operation}: {e}");
        }
    }
}
