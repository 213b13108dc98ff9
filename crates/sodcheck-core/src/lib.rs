//! # sodcheck core
//!
//! Separation-of-duties gate for GitHub pull requests: nobody who committed to a
//! pull request may also be one of its approvers.
//!
//! The library is split into:
//! - **config**: environment validation, done before any remote call
//! - **http**: GitHub REST client, drains every page of the list endpoints
//! - **coordination**: the policy (pure set logic) and the `ApprovalChecker`
//! - **traits**: the `PullRequestSource` seam between the two
//!
//! ## Example
//!
//! ```no_run
//! use sodcheck_core::{check_pull_request, Config};
//!
//! # async fn example() -> sodcheck_core::Result<()> {
//! let config = Config::from_env()?;
//! check_pull_request(&config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod coordination;
pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use config::Config;
pub use coordination::ApprovalChecker;
pub use error::{Error, ErrorKind, Result};
pub use http::GitHubApiClient;
pub use traits::{PullRequestInfo, PullRequestSource};
pub use types::{Commit, LoginSet, PullRequestRef, Review, ReviewState, Violation};

/// Check a pull request against the GitHub API described by `config`.
///
/// This is the main entry point for the library. It handles:
/// - Repository and pull request lookup
/// - Commit and review listing (all pages)
/// - Committer/approver intersection
///
/// Returns `Ok(())` when no committer approved the pull request.
pub async fn check_pull_request(config: &Config) -> Result<()> {
    let client = GitHubApiClient::from_config(config);
    let checker = ApprovalChecker::connect(client, config.pull_request.clone()).await?;
    checker.check().await
}
