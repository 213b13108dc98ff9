//! GitHub REST API client for pull request commits and reviews

use crate::config::Config;
use crate::error::{Error, Result};
use crate::traits::{PullRequestInfo, PullRequestSource};
use crate::types::{Commit, PullRequestRef, Review, ReviewState};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;

/// Largest page size the API accepts
const PER_PAGE: &str = "100";

/// Safety limit to prevent infinite pagination loops
const MAX_PAGES: u32 = 100;

/// GitHub rejects requests without one
const USER_AGENT: &str = concat!("sodcheck/", env!("CARGO_PKG_VERSION"));

/// GitHub API user object (only the login is needed)
#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: Option<String>,
}

/// GitHub API repository object
#[derive(Debug, Deserialize)]
struct GitHubRepository {
    full_name: String,
}

/// GitHub API pull request object
#[derive(Debug, Deserialize)]
struct GitHubPullRequest {
    number: u64,
    title: Option<String>,
    state: String,
    user: Option<GitHubUser>,
}

/// Entry of `GET /repos/{owner}/{repo}/pulls/{number}/commits`
#[derive(Debug, Deserialize)]
struct GitHubCommit {
    sha: String,
    /// Linked GitHub account of the committer; null when the email is unknown
    committer: Option<GitHubUser>,
}

/// Entry of `GET /repos/{owner}/{repo}/pulls/{number}/reviews`
#[derive(Debug, Deserialize)]
struct GitHubReview {
    /// Null for deleted accounts
    user: Option<GitHubUser>,
    state: String,
}

fn login_of(user: Option<GitHubUser>) -> Option<String> {
    user.and_then(|u| u.login).filter(|l| !l.is_empty())
}

fn convert_commit(commit: GitHubCommit) -> Commit {
    Commit {
        sha: commit.sha,
        committer: login_of(commit.committer),
    }
}

fn convert_review(review: GitHubReview) -> Review {
    Review {
        reviewer: login_of(review.user),
        state: ReviewState::parse(&review.state),
    }
}

fn convert_pull_request(pr: GitHubPullRequest) -> PullRequestInfo {
    PullRequestInfo {
        number: pr.number,
        title: pr.title,
        state: pr.state,
        author: login_of(pr.user),
    }
}

/// True when a 403 is GitHub throttling rather than a permission failure.
///
/// Primary limit: `x-ratelimit-remaining: 0`. Secondary limit: remaining is
/// non-zero but the response carries `retry-after` or a body naming the limit.
fn is_rate_limited(headers: &HeaderMap, body: &str) -> bool {
    let remaining = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok());

    remaining == Some("0")
        || headers.contains_key("retry-after")
        || body.to_ascii_lowercase().contains("rate limit")
}

/// Map a non-success response to an error
fn classify_failure(status: StatusCode, headers: &HeaderMap, body: &str, what: &str) -> Error {
    match status {
        StatusCode::UNAUTHORIZED => Error::Auth(format!(
            "GitHub API rejected the token ({}) while fetching {}. Check GITHUB_TOKEN.",
            status, what
        )),
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimitExceeded(format!(
            "GitHub API returned {} while fetching {}",
            status, what
        )),
        StatusCode::FORBIDDEN if is_rate_limited(headers, body) => {
            let retry_after = headers
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            Error::RateLimitExceeded(format!(
                "GitHub API rate limit exceeded while fetching {}. Retry after: {}s.",
                what, retry_after
            ))
        }
        StatusCode::FORBIDDEN => Error::Auth(format!(
            "GitHub API denied access ({}) to {}. Check the token's permissions.",
            status, what
        )),
        StatusCode::NOT_FOUND => Error::NotFound(format!(
            "{} ({}). Check GITHUB_REPOSITORY, PR_NUMBER and the token's access.",
            what, status
        )),
        _ => Error::Http(format!(
            "GitHub API returned error for {}: {}",
            what, status
        )),
    }
}

/// True when a `Link` header advertises another page
fn has_next_page(link: Option<&str>) -> bool {
    link.map(|link| link.contains("rel=\"next\"")).unwrap_or(false)
}

/// GitHub API client for pull request lookups
pub struct GitHubApiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for GitHubApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(base_url: String, token: String) -> Self {
        let client = match reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                // GitHub answers requests without a user agent with 403
                tracing::warn!(
                    "failed to configure HTTP client ({e}); falling back to defaults without user agent or timeout"
                );
                reqwest::Client::new()
            }
        };

        Self {
            client,
            base_url,
            token,
        }
    }

    /// Create from a validated configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone(), config.token.clone())
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    async fn send(&self, request: reqwest::RequestBuilder, what: &str) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(format!("GitHub API request for {} failed: {}", what, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status, &headers, &body, what))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let response = self.send(self.get(url), what).await?;
        response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse {} response: {}", what, e)))
    }

    /// Fetch every page of a list endpoint
    async fn get_paginated<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page = 1u32;

        loop {
            let page_str = page.to_string();
            let request = self
                .get(url)
                .query(&[("per_page", PER_PAGE), ("page", page_str.as_str())]);
            let response = self.send(request, what).await?;

            let has_next = has_next_page(
                response
                    .headers()
                    .get("Link")
                    .and_then(|v| v.to_str().ok()),
            );

            let items: Vec<T> = response
                .json()
                .await
                .map_err(|e| Error::Http(format!("Failed to parse {} response: {}", what, e)))?;

            tracing::debug!(what, page, count = items.len(), "fetched page");

            if items.is_empty() {
                break;
            }
            all_items.extend(items);

            if !has_next {
                break;
            }

            page += 1;
            if page > MAX_PAGES {
                return Err(Error::Http(format!(
                    "Too many pages in GitHub API response for {}",
                    what
                )));
            }
        }

        Ok(all_items)
    }

    /// Look up a repository, returning its `owner/repo` full name
    ///
    /// Endpoint: GET /repos/{owner}/{repo}
    pub async fn get_repository(&self, owner: &str, repo: &str) -> Result<String> {
        let url = format!("{}/repos/{}/{}", self.base_url, owner, repo);
        let what = format!("repository {}/{}", owner, repo);
        let repository: GitHubRepository = self.get_json(&url, &what).await?;
        Ok(repository.full_name)
    }

    /// Look up a pull request
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/pulls/{number}
    pub async fn get_pull_request(&self, pr: &PullRequestRef) -> Result<PullRequestInfo> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}",
            self.base_url,
            pr.owner(),
            pr.repo(),
            pr.number()
        );
        let what = format!("pull request {}", pr);
        let pull: GitHubPullRequest = self.get_json(&url, &what).await?;
        Ok(convert_pull_request(pull))
    }

    /// List all commits on a pull request
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/pulls/{number}/commits
    pub async fn list_commits(&self, pr: &PullRequestRef) -> Result<Vec<Commit>> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/commits",
            self.base_url,
            pr.owner(),
            pr.repo(),
            pr.number()
        );
        let what = format!("commits of {}", pr);
        let commits: Vec<GitHubCommit> = self.get_paginated(&url, &what).await?;
        Ok(commits.into_iter().map(convert_commit).collect())
    }

    /// List all reviews on a pull request
    ///
    /// Endpoint: GET /repos/{owner}/{repo}/pulls/{number}/reviews
    pub async fn list_reviews(&self, pr: &PullRequestRef) -> Result<Vec<Review>> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/reviews",
            self.base_url,
            pr.owner(),
            pr.repo(),
            pr.number()
        );
        let what = format!("reviews of {}", pr);
        let reviews: Vec<GitHubReview> = self.get_paginated(&url, &what).await?;
        Ok(reviews.into_iter().map(convert_review).collect())
    }
}

impl PullRequestSource for GitHubApiClient {
    fn resolve<'a>(
        &'a self,
        pr: &'a PullRequestRef,
    ) -> impl Future<Output = Result<PullRequestInfo>> + Send + 'a {
        async move {
            let full_name = self.get_repository(pr.owner(), pr.repo()).await?;
            tracing::debug!(repository = %full_name, "repository resolved");
            self.get_pull_request(pr).await
        }
    }

    fn commits<'a>(
        &'a self,
        pr: &'a PullRequestRef,
    ) -> impl Future<Output = Result<Vec<Commit>>> + Send + 'a {
        self.list_commits(pr)
    }

    fn reviews<'a>(
        &'a self,
        pr: &'a PullRequestRef,
    ) -> impl Future<Output = Result<Vec<Review>>> + Send + 'a {
        self.list_reviews(pr)
    }
}
