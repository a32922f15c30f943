//! Configuration loading helpers.
//!
//! Subcommand arguments are merged with the `[cmds.<name>]` section of the
//! configuration file and `LASTFIVE_CMDS_<NAME>_*` environment variables.
//! Precedence: defaults < file < environment < command line.

use ortho_config::{OrthoConfig, load_and_merge_subcommand_for};

use crate::LastFiveError;
use crate::cli_args::FetchMode;
use crate::repo_path::DEFAULT_PATH;

/// Merge `cli_args` with configuration file and environment sources.
///
/// # Errors
///
/// Returns [`LastFiveError::Config`] when a configuration source cannot be
/// read or does not match the argument structure.
pub fn load_subcommand<T>(cli_args: &T) -> Result<T, LastFiveError>
where
    T: OrthoConfig + serde::Serialize + Default + clap::CommandFactory,
{
    load_and_merge_subcommand_for::<T>(cli_args).map_err(LastFiveError::from)
}

/// Path and mode after configuration merging, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub path: String,
    pub mode: FetchMode,
}

impl SearchSettings {
    #[must_use]
    pub fn new(path: Option<String>, mode: Option<FetchMode>) -> Self {
        Self {
            path: path.unwrap_or_else(|| DEFAULT_PATH.to_owned()),
            mode: mode.unwrap_or_default(),
        }
    }
}
