//! Command execution for `lastfive`.
//!
//! Owns the runtime flow of each subcommand: token resolution, client setup,
//! driving the [`App`] and writing its views to stdout.

use std::io::{ErrorKind, IsTerminal, Write};
use std::sync::LazyLock;

use log::{error, info, warn};
use regex::Regex;
use termimad::MadSkin;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Duration;

use crate::api::{Endpoint, GraphQLClient, RetryConfig, Token};
use crate::app::{App, View};
use crate::auth::resolve_github_token;
use crate::cli_args::{BrowseArgs, FetchMode, GlobalArgs, IssuesArgs};
use crate::config::SearchSettings;
use crate::render::{FORM_LABEL, write_app, write_failure, write_loading};
use crate::{LastFiveError, environment};

static UTF8_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bUTF-?8\b").expect("valid regex"));

fn locale_is_utf8() -> bool {
    environment::var("LC_ALL")
        .or_else(|_| environment::var("LC_CTYPE"))
        .or_else(|_| environment::var("LANG"))
        .is_ok_and(|v| UTF8_RE.is_match(&v))
}

fn warn_on_missing_token_and_locale(token: &Token) {
    if token.is_empty() {
        warn!("GitHub token not set; GitHub's GraphQL API rejects anonymous requests");
    }
    if !locale_is_utf8() {
        warn!("terminal locale is not UTF-8; issue titles may not render correctly");
    }
}

fn retry_config(global: &GlobalArgs) -> RetryConfig {
    let defaults = RetryConfig::default();
    RetryConfig {
        retries: global.retries.unwrap_or(defaults.retries),
        request_timeout: global
            .http_timeout
            .map_or(defaults.request_timeout, Duration::from_secs),
        ..defaults
    }
}

fn endpoint(global: &GlobalArgs) -> Endpoint {
    global
        .endpoint
        .clone()
        .or_else(|| environment::non_empty_var("GITHUB_GRAPHQL_URL"))
        .map(Endpoint::from)
        .unwrap_or_default()
}

/// Create a [`GraphQLClient`], falling back to no transcript when the
/// transcript file cannot be created.
fn build_graphql_client(global: &GlobalArgs) -> Result<GraphQLClient, LastFiveError> {
    let token = resolve_github_token(global.github_token.as_deref());
    warn_on_missing_token_and_locale(&token);
    let endpoint = endpoint(global);
    let retry = retry_config(global);
    match GraphQLClient::with_endpoint_retry(
        token.clone(),
        endpoint.clone(),
        global.transcript.clone(),
        retry,
    ) {
        Err(LastFiveError::Io(e)) => {
            warn!("failed to create transcript: {e}");
            GraphQLClient::with_endpoint_retry(token, endpoint, None, retry)
        }
        other => other,
    }
}

/// Plain output when `NO_COLOR` is set or stdout is not a terminal.
fn skin() -> MadSkin {
    if environment::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        MadSkin::no_style()
    } else {
        MadSkin::default()
    }
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|c| {
        c.downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == ErrorKind::BrokenPipe)
    })
}

/// Write `view` to stdout. Returns `false` once stdout has been closed.
fn print_view(skin: &MadSkin, view: View<'_>) -> bool {
    let result = write_app(std::io::stdout().lock(), skin, view);
    match result {
        Err(e) if is_broken_pipe(&e) => false,
        Err(e) => {
            error!("error printing results: {e}");
            true
        }
        Ok(()) => true,
    }
}

/// Show the last issues of one repository and exit.
///
/// # Errors
///
/// Returns an error when the path cannot be split or the client cannot be
/// built. Request failures are rendered, not returned.
pub async fn run_issues(args: IssuesArgs, global: &GlobalArgs) -> Result<(), LastFiveError> {
    let settings = SearchSettings::new(args.path, args.mode);
    let client = build_graphql_client(global)?;
    let mut app = App::new(&client, settings.mode, settings.path)?;
    app.mount().await?;
    print_view(&skin(), app.view());
    Ok(())
}

/// Interactive form: fetch the pre-filled path, then one search per line of
/// stdin until end of input. An empty line searches the current path again.
///
/// # Errors
///
/// Returns an error when the initial path cannot be split, the client
/// cannot be built or stdin cannot be read.
pub async fn run_browse(args: BrowseArgs, global: &GlobalArgs) -> Result<(), LastFiveError> {
    let settings = SearchSettings::new(args.path, args.mode);
    let client = build_graphql_client(global)?;
    let mut app = App::new(&client, settings.mode, settings.path)?;
    let skin = skin();

    announce_loading(app.mode());
    app.mount().await?;
    if !print_view(&skin, app.view()) {
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(&app.state().path);
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let typed = line.trim();
        let path = if typed.is_empty() {
            app.state().path.clone()
        } else {
            typed.to_owned()
        };
        info!("searching {path}");
        announce_loading(app.mode());
        if let Err(e) = app.search(path).await {
            let mut stdout = std::io::stdout().lock();
            if write_failure(&mut stdout, &skin, &e.display_message()).is_err() {
                return Ok(());
            }
            continue;
        }
        if !print_view(&skin, app.view()) {
            break;
        }
    }
    Ok(())
}

fn announce_loading(mode: FetchMode) {
    if mode == FetchMode::Hook {
        let _ = write_loading(std::io::stdout().lock());
    }
}

/// Prompt on stderr so stdout carries only rendered results.
fn prompt(current: &str) {
    let mut stderr = std::io::stderr().lock();
    let _ = write!(stderr, "{FORM_LABEL}[{current}] ").and_then(|()| stderr.flush());
}
