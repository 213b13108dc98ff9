//! Error types for sodcheck-core

use crate::types::Violation;
use thiserror::Error;

/// Result type alias for sodcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sodcheck operations
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration (environment variables)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token rejected by the GitHub API
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Repository or pull request does not exist (or is not visible to the token)
    #[error("Not found: {0}")]
    NotFound(String),

    /// At least one committer also approved the pull request
    #[error("{0}")]
    PolicyViolation(Violation),

    /// API rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// HTTP/API error (transport, unexpected status, malformed body)
    #[error("HTTP error: {0}")]
    Http(String),
}

/// Fieldless error category for zero-cost pattern matching.
///
/// Single byte representation (`#[repr(u8)]`), `Copy`, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Fatal, non-retryable setup failure: bad environment, bad token, unknown PR
    Configuration,
    /// Committer/approver overlap
    PolicyViolation,
    /// Network or API-layer failure; the CI runner may re-run the job
    Transient,
}

impl Error {
    /// Get the error kind, zero allocation, returns a Copy enum.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::Auth(_) | Error::NotFound(_) => ErrorKind::Configuration,
            Error::PolicyViolation(_) => ErrorKind::PolicyViolation,
            Error::RateLimitExceeded(_) | Error::Http(_) => ErrorKind::Transient,
        }
    }

    /// Borrow the error message, zero allocation.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::Config(msg)
            | Error::Auth(msg)
            | Error::NotFound(msg)
            | Error::RateLimitExceeded(msg)
            | Error::Http(msg) => msg,
            Error::PolicyViolation(_) => "policy violation",
        }
    }

    /// Offending logins when this is a policy violation
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Error::PolicyViolation(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_is_copy() {
        let err = Error::Auth("test".to_string());
        let k = err.kind();
        let k2 = k; // Copy, no move
        assert_eq!(k, k2);
    }

    #[test]
    fn test_error_kind_repr_u8() {
        assert_eq!(std::mem::size_of::<ErrorKind>(), 1);
    }

    #[test]
    fn test_error_message_borrows() {
        let err = Error::Config("bad config".to_string());
        let msg: &str = err.message();
        assert_eq!(msg, "bad config");
    }

    #[test]
    fn test_all_error_variants_have_kind() {
        let violation = Violation::from_logins(["alice"]);
        let cases: Vec<(Error, ErrorKind)> = vec![
            (Error::Config("c".into()), ErrorKind::Configuration),
            (Error::Auth("a".into()), ErrorKind::Configuration),
            (Error::NotFound("n".into()), ErrorKind::Configuration),
            (Error::PolicyViolation(violation), ErrorKind::PolicyViolation),
            (Error::RateLimitExceeded("rl".into()), ErrorKind::Transient),
            (Error::Http("h".into()), ErrorKind::Transient),
        ];

        for (err, expected_kind) in cases {
            assert_eq!(err.kind(), expected_kind, "Mismatch for {:?}", err);
        }
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            Error::Config("PR_NUMBER".into()).to_string(),
            "Configuration error: PR_NUMBER"
        );
        assert_eq!(
            Error::RateLimitExceeded("0 left".into()).to_string(),
            "Rate limit exceeded: 0 left"
        );
    }

    #[test]
    fn test_policy_violation_display_lists_logins() {
        let err = Error::PolicyViolation(Violation::from_logins(["bob", "alice"]));
        assert_eq!(
            err.to_string(),
            "Security violation: The following users both committed code and approved the PR: alice, bob"
        );
        assert_eq!(err.violation().map(|v| v.len()), Some(2));
        assert!(Error::Http("x".into()).violation().is_none());
    }

    #[test]
    fn test_error_messages_never_contain_token_patterns() {
        let token_patterns = ["ghp_", "gho_", "ghs_", "github_pat_", "Bearer "];
        let errors: Vec<Error> = vec![
            Error::Config("config error".into()),
            Error::Auth("GitHub API returned 401 Unauthorized".into()),
            Error::NotFound("repository acme/widgets".into()),
            Error::Http("http error".into()),
            Error::RateLimitExceeded("rate limit exceeded".into()),
        ];

        for err in &errors {
            let display = format!("{}", err);
            let debug = format!("{:?}", err);
            for pattern in &token_patterns {
                assert!(
                    !display.contains(pattern),
                    "Error Display contains token pattern '{}': {}",
                    pattern,
                    display
                );
                assert!(
                    !debug.contains(pattern),
                    "Error Debug contains token pattern '{}': {}",
                    pattern,
                    debug
                );
            }
        }
    }
}
