//! Terminal rendering of the application state.
//!
//! Every writer is a pure function of its arguments; styling comes from the
//! [`MadSkin`] passed in, so `MadSkin::no_style()` yields plain text.

use std::io::Write;

use termimad::MadSkin;

use crate::app::View;
use crate::fetcher::RepositoryState;
use crate::models::{Organization, Repository};

pub const HEADING: &str = "Learn React & Graphql";
pub const FORM_LABEL: &str = "Show open issues for https://github.com/";
pub const LOADING: &str = "Loading ...";
pub const FAILURE_LABEL: &str = "Something went wrong:";
pub const NO_INFORMATION: &str = "No information yet ...";

const RULE_WIDTH: usize = 40;

pub fn write_loading<W: Write>(mut out: W) -> std::io::Result<()> {
    writeln!(out, "{LOADING}")
}

/// Bold failure label directly followed by `message`.
pub fn write_failure<W: Write>(mut out: W, skin: &MadSkin, message: &str) -> std::io::Result<()> {
    writeln!(out, "{}{message}", skin.bold.apply_to(FAILURE_LABEL))
}

/// Draw whichever branch `view` selects: loading, failure or the form with
/// its results.
pub fn write_app<W: Write>(mut out: W, skin: &MadSkin, view: View<'_>) -> anyhow::Result<()> {
    match view {
        View::Loading => write_loading(&mut out)?,
        View::Failed(message) => write_failure(&mut out, skin, message)?,
        View::Ready(state) => write_ready(&mut out, skin, state)?,
    }
    Ok(())
}

fn write_ready<W: Write>(mut out: W, skin: &MadSkin, state: &RepositoryState) -> anyhow::Result<()> {
    writeln!(out, "{}", skin.bold.apply_to(HEADING))?;
    writeln!(out, "{FORM_LABEL}{}", state.path)?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    if let Some(message) = state.error_message() {
        write_failure(&mut out, skin, &message)?;
    } else if let Some(organization) = &state.organization {
        write_organization(&mut out, skin, organization)?;
    } else {
        writeln!(out, "{NO_INFORMATION}")?;
    }
    Ok(())
}

pub fn write_organization<W: Write>(
    mut out: W,
    skin: &MadSkin,
    organization: &Organization,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "{} {} ({})",
        skin.bold.apply_to("Issues from Organization:"),
        organization.name.as_deref().unwrap_or_default(),
        organization.url
    )?;
    if let Some(repository) = &organization.repository {
        write_repository(&mut out, skin, repository)?;
    }
    Ok(())
}

/// Repository line followed by one bullet per issue, in server order.
///
/// Titles are written verbatim; GitHub titles are plain text, not markdown.
pub fn write_repository<W: Write>(
    mut out: W,
    skin: &MadSkin,
    repository: &Repository,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "{} {} ({})",
        skin.bold.apply_to("In Repository:"),
        repository.name,
        repository.url
    )?;
    for issue in repository.issues.issues() {
        writeln!(out, "  \u{2022} {} ({})", issue.title, issue.url)?;
    }
    Ok(())
}
