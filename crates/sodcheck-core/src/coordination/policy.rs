//! Separation-of-duties policy: nobody approves code they committed
//!
//! Pure set logic, no I/O. The committer and approver sets are built with
//! set semantics, so a user with ten commits counts once.

use crate::types::{Commit, LoginSet, Review, ReviewState, Violation};

/// Distinct committer logins. Commits without a linked account are skipped.
pub fn committers_of(commits: &[Commit]) -> LoginSet {
    commits
        .iter()
        .filter_map(|c| c.committer.as_deref())
        .map(str::to_owned)
        .collect()
}

/// Distinct logins of reviewers who submitted an `APPROVED` review.
///
/// Every approving review counts, even if the same reviewer later commented
/// or requested changes.
pub fn approvers_of(reviews: &[Review]) -> LoginSet {
    reviews
        .iter()
        .filter(|r| r.state == ReviewState::Approved)
        .filter_map(|r| r.reviewer.as_deref())
        .map(str::to_owned)
        .collect()
}

/// Logins present in both sets
pub fn find_violation(committers: &LoginSet, approvers: &LoginSet) -> Violation {
    Violation::from_logins(committers.intersection(approvers).cloned())
}
