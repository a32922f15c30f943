//! Retry configuration and policy helpers for GraphQL requests.

use backon::ExponentialBuilder;
use tokio::time::Duration;

use crate::LastFiveError;

/// Retry and timeout settings for the GraphQL client.
///
/// Retries are disabled by default so each submission issues exactly one
/// request; `--retries` opts in.
#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
    /// Retries after the initial request. Zero disables retrying.
    pub retries: usize,
    /// Base delay for the exponential backoff.
    pub base_delay: Duration,
    /// Request timeout applied to each HTTP call.
    pub request_timeout: Duration,
    /// Whether to jitter the backoff delay.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 0,
            base_delay: Duration::from_millis(200),
            request_timeout: Duration::from_secs(30),
            jitter: true,
        }
    }
}

/// Build the backoff policy for `config`.
///
/// `request_timeout` is applied per request by the client and plays no part
/// here.
pub fn build_retry_builder(config: RetryConfig) -> ExponentialBuilder {
    let builder = ExponentialBuilder::default()
        .with_min_delay(config.base_delay)
        .with_max_times(config.retries);
    if config.jitter {
        builder.with_jitter()
    } else {
        builder
    }
}

/// Whether `err` is transient and worth another attempt.
///
/// Transport failures and 5xx/429 responses are retried. GraphQL errors,
/// malformed bodies and invalid input are not.
pub fn should_retry(err: &LastFiveError) -> bool {
    match err {
        LastFiveError::RequestContext { .. } => true,
        LastFiveError::Status { status, .. } => is_transient_status(*status),
        LastFiveError::BadResponseSerde {
            status, snippet, ..
        } => is_transient_status(*status) || snippet.trim_start().starts_with('<'),
        _ => false,
    }
}

fn is_transient_status(status: u16) -> bool {
    status >= 500 || status == 429
}
