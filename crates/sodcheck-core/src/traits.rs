//! Seam between the approval policy and the code-hosting service

use crate::error::Result;
use crate::types::{Commit, PullRequestRef, Review};
use std::future::Future;

/// Summary of a pull request, returned once its repository and number resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    /// Pull request number
    pub number: u64,
    /// Title, if the API returned one
    pub title: Option<String>,
    /// `open` or `closed`
    pub state: String,
    /// Login of the pull request author
    pub author: Option<String>,
}

/// Read-only access to a pull request's commits and reviews.
///
/// Implementations return complete listings: every page is drained before the
/// future resolves. Static dispatch only, the futures are not boxed.
pub trait PullRequestSource {
    /// Resolve the repository and pull request.
    ///
    /// Fails with a configuration-kind error when the token is rejected or
    /// either lookup comes back empty.
    fn resolve<'a>(
        &'a self,
        pr: &'a PullRequestRef,
    ) -> impl Future<Output = Result<PullRequestInfo>> + Send + 'a;

    /// All commits on the pull request
    fn commits<'a>(
        &'a self,
        pr: &'a PullRequestRef,
    ) -> impl Future<Output = Result<Vec<Commit>>> + Send + 'a;

    /// All submitted reviews on the pull request
    fn reviews<'a>(
        &'a self,
        pr: &'a PullRequestRef,
    ) -> impl Future<Output = Result<Vec<Review>>> + Send + 'a;
}
