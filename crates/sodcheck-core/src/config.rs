//! Environment configuration
//!
//! Everything is validated here, before the first remote call.

use crate::error::{Error, Result};
use crate::types::PullRequestRef;

/// `owner/repo` identifier of the repository under check
pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
/// Pull request number
pub const ENV_PR_NUMBER: &str = "PR_NUMBER";
/// Bearer token for the GitHub API
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
/// Optional API base URL (GitHub Enterprise Server)
pub const ENV_API_URL: &str = "GITHUB_API_URL";

/// Variables that must be present and non-empty
pub const REQUIRED_ENV_VARS: [&str; 3] = [ENV_REPOSITORY, ENV_PR_NUMBER, ENV_TOKEN];

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Validated run configuration
#[derive(Clone)]
pub struct Config {
    /// Pull request under check
    pub pull_request: PullRequestRef,
    /// API token
    pub token: String,
    /// API base URL without trailing slash
    pub api_url: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("pull_request", &self.pull_request)
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Unset and empty variables both count as missing; every missing name is
    /// reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let (repository, pr_number, token) =
            match (get(ENV_REPOSITORY), get(ENV_PR_NUMBER), get(ENV_TOKEN)) {
                (Some(repository), Some(pr_number), Some(token)) => (repository, pr_number, token),
                (repository, pr_number, token) => {
                    let missing: Vec<&str> = REQUIRED_ENV_VARS
                        .iter()
                        .zip([repository.is_none(), pr_number.is_none(), token.is_none()])
                        .filter_map(|(&name, is_missing)| is_missing.then_some(name))
                        .collect();
                    return Err(Error::Config(format!(
                        "Missing required environment variables: {}",
                        missing.join(", ")
                    )));
                }
            };

        let number = parse_pr_number(&pr_number)?;
        let pull_request = PullRequestRef::parse(repository.trim(), number)?;

        let api_url = get(ENV_API_URL)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            pull_request,
            token,
            api_url,
        })
    }
}

/// Parse `PR_NUMBER`: a positive integer, surrounding whitespace tolerated
pub fn parse_pr_number(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(Error::Config(format!(
            "Invalid PR_NUMBER: {}. Must be a positive integer.",
            raw
        ))),
        Ok(n) => Ok(n),
        Err(_) => Err(Error::Config(format!(
            "Invalid PR_NUMBER: {}. Must be an integer.",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_valid_config() {
        let config = Config::from_lookup(lookup_from(&[
            ("GITHUB_REPOSITORY", "acme/widgets"),
            ("PR_NUMBER", "17"),
            ("GITHUB_TOKEN", "ghp_test"),
        ]))
        .unwrap();

        assert_eq!(config.pull_request, PullRequestRef::new("acme", "widgets", 17));
        assert_eq!(config.token, "ghp_test");
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_all_missing_vars_reported_together() {
        let err = Config::from_lookup(lookup_from(&[("GITHUB_REPOSITORY", "acme/widgets")]))
            .unwrap_err();
        assert_eq!(
            err.message(),
            "Missing required environment variables: PR_NUMBER, GITHUB_TOKEN"
        );
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let err = Config::from_lookup(lookup_from(&[
            ("GITHUB_REPOSITORY", "acme/widgets"),
            ("PR_NUMBER", ""),
            ("GITHUB_TOKEN", "t"),
        ]))
        .unwrap_err();
        assert_eq!(
            err.message(),
            "Missing required environment variables: PR_NUMBER"
        );
    }

    #[test]
    fn test_non_numeric_pr_number() {
        let err = Config::from_lookup(lookup_from(&[
            ("GITHUB_REPOSITORY", "acme/widgets"),
            ("PR_NUMBER", "abc"),
            ("GITHUB_TOKEN", "t"),
        ]))
        .unwrap_err();
        assert_matches!(err, Error::Config(ref msg) if msg == "Invalid PR_NUMBER: abc. Must be an integer.");
    }

    #[test]
    fn test_parse_pr_number_edges() {
        assert_eq!(parse_pr_number(" 42\n").unwrap(), 42);
        assert_matches!(parse_pr_number("0"), Err(Error::Config(_)));
        assert_matches!(parse_pr_number("-3"), Err(Error::Config(_)));
        assert_matches!(parse_pr_number("4.2"), Err(Error::Config(_)));
        assert_matches!(parse_pr_number("99999999999999999999999"), Err(Error::Config(_)));
    }

    #[test]
    fn test_invalid_repository() {
        let err = Config::from_lookup(lookup_from(&[
            ("GITHUB_REPOSITORY", "widgets"),
            ("PR_NUMBER", "1"),
            ("GITHUB_TOKEN", "t"),
        ]))
        .unwrap_err();
        assert!(err.message().starts_with("Invalid GITHUB_REPOSITORY format: widgets"));
    }

    #[test]
    fn test_api_url_override_trims_slash() {
        let config = Config::from_lookup(lookup_from(&[
            ("GITHUB_REPOSITORY", "acme/widgets"),
            ("PR_NUMBER", "1"),
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3/"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = Config::from_lookup(lookup_from(&[
            ("GITHUB_REPOSITORY", "acme/widgets"),
            ("PR_NUMBER", "1"),
            ("GITHUB_TOKEN", "ghp_ConfigSecret42"),
        ]))
        .unwrap();
        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("ghp_ConfigSecret42"));
        assert!(debug_output.contains("<redacted>"));
    }
}
