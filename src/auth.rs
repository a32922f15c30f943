//! GitHub token resolution.
//!
//! The `--github-token` flag wins, then `LASTFIVE_GITHUB_TOKEN`, then
//! `GITHUB_TOKEN`. Empty values are skipped. No token means anonymous access,
//! which GitHub's GraphQL API rejects with `401`.

use crate::api::Token;
use crate::environment;

pub const TOKEN_ENV_VARS: [&str; 2] = ["LASTFIVE_GITHUB_TOKEN", "GITHUB_TOKEN"];

#[must_use]
pub fn resolve_github_token(cli_token: Option<&str>) -> Token {
    cli_token
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .or_else(|| TOKEN_ENV_VARS.into_iter().find_map(environment::non_empty_var))
        .map(Token::from)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::resolve_github_token;
    use crate::environment::{self, remove_var, set_var};
    use rstest::rstest;
    use serial_test::serial;

    fn with_token_env<F>(lastfive: Option<&str>, github: Option<&str>, op: F)
    where
        F: FnOnce(),
    {
        let old_lastfive = environment::var("LASTFIVE_GITHUB_TOKEN").ok();
        let old_github = environment::var("GITHUB_TOKEN").ok();
        let apply = |key: &str, value: Option<&str>| match value {
            Some(v) => set_var(key, v),
            None => remove_var(key),
        };

        apply("LASTFIVE_GITHUB_TOKEN", lastfive);
        apply("GITHUB_TOKEN", github);
        op();
        apply("LASTFIVE_GITHUB_TOKEN", old_lastfive.as_deref());
        apply("GITHUB_TOKEN", old_github.as_deref());
    }

    #[rstest]
    #[case(Some("cli"), Some("lf"), Some("gh"), "cli")]
    #[case(None, Some("lf"), Some("gh"), "lf")]
    #[case(None, None, Some("gh"), "gh")]
    #[case(Some(""), Some(""), Some("gh"), "gh")]
    #[case(None, None, None, "")]
    #[serial]
    fn token_precedence(
        #[case] cli: Option<&str>,
        #[case] lastfive: Option<&str>,
        #[case] github: Option<&str>,
        #[case] expected: &str,
    ) {
        with_token_env(lastfive, github, || {
            assert_eq!(resolve_github_token(cli).as_str(), expected);
        });
    }
}
