//! Core type definitions

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Set of distinct GitHub logins, ordered for deterministic output
pub type LoginSet = BTreeSet<String>;

/// Identifies one pull request: `owner/repo#number`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PullRequestRef {
    owner: String,
    repo: String,
    number: u64,
}

impl PullRequestRef {
    /// Build from already-split parts
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }

    /// Parse a `GITHUB_REPOSITORY`-style `owner/repo` identifier
    pub fn parse(repository: &str, number: u64) -> Result<Self> {
        let (owner, repo) = split_repository(repository)?;
        Ok(Self::new(owner, repo, number))
    }

    /// Repository owner (user or organization)
    #[inline]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    #[inline]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Pull request number
    #[inline]
    pub fn number(&self) -> u64 {
        self.number
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Split `owner/repo` into its two segments (zero-copy).
///
/// Exactly one `/`, both sides non-empty and limited to the characters GitHub
/// allows in account and repository names (ASCII alphanumerics, `-`, `_`, `.`).
pub fn split_repository(repository: &str) -> Result<(&str, &str)> {
    let invalid = || {
        Error::Config(format!(
            "Invalid GITHUB_REPOSITORY format: {}. Expected owner/repo.",
            repository
        ))
    };

    let (owner, repo) = repository.split_once('/').ok_or_else(invalid)?;
    let well_formed = |s: &str| {
        !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    if !well_formed(owner) || !well_formed(repo) {
        return Err(invalid());
    }

    Ok((owner, repo))
}

/// A commit on the pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Commit SHA
    pub sha: String,
    /// Login of the linked committer account, absent when GitHub could not
    /// associate the committer email with a user
    pub committer: Option<String>,
}

/// Review state as reported by the GitHub API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    /// `APPROVED`
    Approved,
    /// `COMMENTED`
    Commented,
    /// `CHANGES_REQUESTED`
    ChangesRequested,
    /// `DISMISSED`
    Dismissed,
    /// `PENDING`
    Pending,
    /// Anything else, including differently-cased spellings
    Unknown,
}

impl ReviewState {
    /// Parse the API's state string. Case-sensitive, matching the canonical values.
    pub fn parse(s: &str) -> Self {
        match s {
            "APPROVED" => Self::Approved,
            "COMMENTED" => Self::Commented,
            "CHANGES_REQUESTED" => Self::ChangesRequested,
            "DISMISSED" => Self::Dismissed,
            "PENDING" => Self::Pending,
            _ => Self::Unknown,
        }
    }

    /// Canonical API spelling
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Commented => "COMMENTED",
            Self::ChangesRequested => "CHANGES_REQUESTED",
            Self::Dismissed => "DISMISSED",
            Self::Pending => "PENDING",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// A submitted review on the pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Reviewer login, absent for deleted ("ghost") accounts
    pub reviewer: Option<String>,
    /// Review state
    pub state: ReviewState,
}

/// Logins found both among committers and approvers.
///
/// Always sorted and de-duplicated. Empty means the policy holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violation {
    logins: Vec<String>,
}

impl Violation {
    /// Build from any collection of logins
    pub fn from_logins<I, S>(logins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: LoginSet = logins.into_iter().map(Into::into).collect();
        Self {
            logins: set.into_iter().collect(),
        }
    }

    /// True when no login is in both sets
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.logins.is_empty()
    }

    /// Number of offending logins
    #[inline]
    pub fn len(&self) -> usize {
        self.logins.len()
    }

    /// Offending logins, sorted
    #[inline]
    pub fn logins(&self) -> &[String] {
        &self.logins
    }

    /// Whether `login` is implicated
    pub fn contains(&self, login: &str) -> bool {
        self.logins.binary_search_by(|l| l.as_str().cmp(login)).is_ok()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Security violation: The following users both committed code and approved the PR: {}",
            self.logins.join(", ")
        )
    }
}
