//! Approval checker: fetch committers and approvers, fail on overlap

use crate::coordination::policy::{approvers_of, committers_of, find_violation};
use crate::error::{Error, Result};
use crate::traits::{PullRequestInfo, PullRequestSource};
use crate::types::{LoginSet, PullRequestRef};
use futures::future::try_join;

fn log_pull_request(pull_request: &PullRequestRef, info: &PullRequestInfo) {
    tracing::info!(
        "Checking pull request {}: {} by {} (state: {})",
        pull_request,
        info.title.as_deref().unwrap_or("No title"),
        info.author.as_deref().unwrap_or("unknown author"),
        info.state
    );
}

/// Checks one pull request against the separation-of-duties policy.
///
/// Bound to a resolved pull request: construction fails if the repository or
/// pull request cannot be looked up. Nothing is cached, every `check` fetches
/// fresh listings.
pub struct ApprovalChecker<S> {
    source: S,
    pull_request: PullRequestRef,
}

impl<S: PullRequestSource> ApprovalChecker<S> {
    /// Resolve the pull request and bind a checker to it
    pub async fn connect(source: S, pull_request: PullRequestRef) -> Result<Self> {
        let info = source.resolve(&pull_request).await?;

        log_pull_request(&pull_request, &info);

        Ok(Self {
            source,
            pull_request,
        })
    }

    /// Logins of everyone who committed on the pull request
    pub async fn fetch_committers(&self) -> Result<LoginSet> {
        let commits = self.source.commits(&self.pull_request).await?;
        let committers = committers_of(&commits);
        tracing::debug!(
            commits = commits.len(),
            committers = committers.len(),
            "collected committers"
        );
        Ok(committers)
    }

    /// Logins of everyone who submitted an approving review
    pub async fn fetch_approvers(&self) -> Result<LoginSet> {
        let reviews = self.source.reviews(&self.pull_request).await?;
        let approvers = approvers_of(&reviews);
        tracing::debug!(
            reviews = reviews.len(),
            approvers = approvers.len(),
            "collected approvers"
        );
        Ok(approvers)
    }

    /// Run the check once.
    ///
    /// Returns `Error::PolicyViolation` listing every login that both committed
    /// and approved. Any fetch error is returned as-is, without retrying.
    pub async fn check(&self) -> Result<()> {
        let (committers, approvers) =
            try_join(self.fetch_committers(), self.fetch_approvers()).await?;

        let violation = find_violation(&committers, &approvers);
        if !violation.is_empty() {
            return Err(Error::PolicyViolation(violation));
        }

        tracing::info!("Approval validation passed: No committers found among approvers");
        Ok(())
    }
}
