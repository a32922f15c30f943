//! The top-level application: owns the search state and wires the form to
//! whichever fetch strategy is selected.

use log::{debug, warn};

use crate::LastFiveError;
use crate::api::GraphQLClient;
use crate::cli_args::FetchMode;
use crate::fetcher::{RepositoryState, fetch_issues_of_repository};
use crate::graphql_queries::IssuesVariables;
use crate::hook::{QueryHook, QueryState};
use crate::models::IssuesData;
use crate::repo_path::RepoPath;

/// What the presentation layer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Loading,
    Failed(&'a str),
    Ready(&'a RepositoryState),
}

pub struct App<'c> {
    client: &'c GraphQLClient,
    mode: FetchMode,
    state: RepositoryState,
    hook: QueryHook<'c>,
}

impl<'c> App<'c> {
    /// Create the application with `path` pre-filled in the form.
    ///
    /// # Errors
    ///
    /// Returns [`LastFiveError::InvalidPath`] if `path` cannot be split.
    pub fn new(
        client: &'c GraphQLClient,
        mode: FetchMode,
        path: impl Into<String>,
    ) -> Result<Self, LastFiveError> {
        let path = path.into();
        let variables = IssuesVariables::from(RepoPath::split(&path)?);
        Ok(Self {
            client,
            mode,
            state: RepositoryState::new(path),
            hook: QueryHook::new(client, variables),
        })
    }

    #[must_use]
    pub fn state(&self) -> &RepositoryState {
        &self.state
    }

    #[must_use]
    pub fn query_state(&self) -> &QueryState {
        self.hook.state()
    }

    #[must_use]
    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    #[must_use]
    pub fn view(&self) -> View<'_> {
        match self.mode {
            FetchMode::Hook => match self.hook.state() {
                QueryState::Loading => View::Loading,
                QueryState::Failed(message) => View::Failed(message),
                QueryState::Idle | QueryState::Ready => View::Ready(&self.state),
            },
            FetchMode::Post => View::Ready(&self.state),
        }
    }

    /// Issue the initial fetch for the pre-filled path.
    ///
    /// # Errors
    ///
    /// Only fails in post mode, when the path cannot be split.
    pub async fn mount(&mut self) -> Result<(), LastFiveError> {
        match self.mode {
            FetchMode::Hook => {
                let data = self.hook.run().await;
                self.complete(data);
                Ok(())
            }
            FetchMode::Post => self.fetch_current_path().await,
        }
    }

    /// Record a new value typed into the path field.
    ///
    /// Hook mode keeps only the new path until the next submit. Post mode
    /// replaces the state and, like an effect keyed on the path, fetches
    /// straight away when the path actually changed.
    ///
    /// The `browse` command does not call this: each input line is typed and
    /// submitted at once through [`App::search`], so a line costs one request.
    ///
    /// # Errors
    ///
    /// Returns [`LastFiveError::InvalidPath`] when post mode fetches a path
    /// that cannot be split; the typed path is kept either way.
    pub async fn change(&mut self, path: impl Into<String>) -> Result<(), LastFiveError> {
        let path = path.into();
        let changed = path != self.state.path;
        self.state = RepositoryState::new(path);
        if changed && self.mode == FetchMode::Post {
            self.fetch_current_path().await?;
        }
        Ok(())
    }

    /// Submit the form: fetch issues for the current path.
    ///
    /// # Errors
    ///
    /// Returns [`LastFiveError::InvalidPath`] when the path cannot be split.
    /// Request failures never surface here: hook mode records them in
    /// [`App::query_state`], post mode logs and drops them.
    pub async fn submit(&mut self) -> Result<(), LastFiveError> {
        match self.mode {
            FetchMode::Hook => {
                let variables = IssuesVariables::from(RepoPath::split(&self.state.path)?);
                let data = self.hook.refetch(variables).await;
                self.complete(data);
                Ok(())
            }
            FetchMode::Post => self.fetch_current_path().await,
        }
    }

    /// Type `path` and submit it as one action, issuing exactly one request.
    ///
    /// # Errors
    ///
    /// See [`App::submit`].
    pub async fn search(&mut self, path: impl Into<String>) -> Result<(), LastFiveError> {
        self.state = RepositoryState::new(path);
        self.submit().await
    }

    /// Merge a completed hook result into the state.
    fn complete(&mut self, data: Option<IssuesData>) {
        if let Some(data) = data {
            self.state.organization = data.organization;
            self.state.errors = None;
        }
    }

    async fn fetch_current_path(&mut self) -> Result<(), LastFiveError> {
        match fetch_issues_of_repository(self.client, &self.state.path).await {
            Ok(state) => {
                debug!("post fetch for {} completed", state.path);
                self.state = state;
                Ok(())
            }
            Err(e @ LastFiveError::InvalidPath(_)) => Err(e),
            Err(e) => {
                warn!("fetch for {} failed: {e}", self.state.path);
                Ok(())
            }
        }
    }
}
