//! Error type shared by the library and the binary.

use thiserror::Error;

/// Errors returned by library functions.
#[derive(Error, Debug)]
#[allow(clippy::module_name_repetitions, reason = "exported for tests")]
pub enum LastFiveError {
    #[error("invalid repository path '{0}': expected <organization>/<repository>")]
    InvalidPath(String),
    #[error("request failed when running {context}: {source}")]
    RequestContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("HTTP status {status} | body snippet: {snippet}")]
    Status { status: u16, snippet: String },
    #[error("malformed response (status {status}): {message} | snippet: {snippet}")]
    BadResponseSerde {
        status: u16,
        message: String,
        snippet: String,
    },
    #[error("empty response for {operation} (status {status}) | snippet: {snippet}")]
    EmptyResponse {
        status: u16,
        operation: String,
        snippet: String,
    },
    #[error("API errors: {}", .0.join(", "))]
    ApiErrors(Vec<String>),
    #[error("invalid endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(#[from] std::sync::Arc<ortho_config::OrthoError>),
}

impl LastFiveError {
    /// Text shown to the user after `Something went wrong:`.
    ///
    /// GraphQL errors render as their messages joined by a space; every other
    /// failure renders as its full description.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::ApiErrors(messages) => messages.join(" "),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LastFiveError;
    use rstest::rstest;

    #[rstest]
    #[case(vec!["Not Found"], "Not Found")]
    #[case(vec!["one", "two"], "one two")]
    fn api_errors_display_message_joins_with_space(
        #[case] messages: Vec<&str>,
        #[case] expected: &str,
    ) {
        let err = LastFiveError::ApiErrors(messages.into_iter().map(String::from).collect());
        assert_eq!(err.display_message(), expected);
    }

    #[test]
    fn api_errors_display_joins_with_comma() {
        let err = LastFiveError::ApiErrors(vec!["one".into(), "two".into()]);
        assert_eq!(err.to_string(), "API errors: one, two");
    }

    #[test]
    fn invalid_path_display_message_describes_expected_shape() {
        let err = LastFiveError::InvalidPath("nope".into());
        assert_eq!(
            err.display_message(),
            "invalid repository path 'nope': expected <organization>/<repository>"
        );
    }
}
