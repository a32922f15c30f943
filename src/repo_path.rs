//! Splitting of `organization/repository` paths typed into the search form.

use std::fmt;

use crate::LastFiveError;

/// Path searched when nothing else is configured.
pub const DEFAULT_PATH: &str = "the-road-to-learn-react/the-road-to-learn-react";

/// Organization and repository names taken from a path such as
/// `rust-lang/rust`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath {
    pub organization: String,
    pub repository: String,
}

impl RepoPath {
    /// Split `path` on `/` into organization and repository.
    ///
    /// Only the first two segments are used; anything after a second `/` is
    /// ignored. No other validation is performed.
    ///
    /// # Errors
    ///
    /// Returns [`LastFiveError::InvalidPath`] when `path` has no `/` or the
    /// repository segment is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use lastfive::RepoPath;
    ///
    /// let path = RepoPath::split("rust-lang/rust").expect("valid path");
    /// assert_eq!(path.organization, "rust-lang");
    /// assert_eq!(path.repository, "rust");
    /// ```
    pub fn split(path: &str) -> Result<Self, LastFiveError> {
        let mut parts = path.split('/');
        let organization = parts.next().unwrap_or_default();
        let repository = parts
            .next()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| LastFiveError::InvalidPath(path.to_owned()))?;
        Ok(Self {
            organization: organization.to_owned(),
            repository: repository.to_owned(),
        })
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.repository)
    }
}
