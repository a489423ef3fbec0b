//! GitHub API client
//!
//! Minimal GitHub API client for the repository statistics endpoints. The client owns the
//! default headers and transport limits, and classifies every response into a
//! [`FetchResult`] so callers never see a raw transport error.

use super::{FetchResult, RepoSpec};
use crate::Result;
use crate::config::Config;
use chrono::{DateTime, Utc};
use ohno::app_err;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

const LOG_TARGET: &str = "    client";

/// Media type for version 3 of the GitHub REST API
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

#[derive(Debug, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub watchers_count: Option<u64>,
    pub open_issues_count: Option<u64>,
    pub default_branch: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub license: Option<License>,
}

#[derive(Debug, Deserialize)]
pub struct License {
    pub name: Option<String>,
}

/// Account summary embedded in contributors, pull requests and issues
#[derive(Debug, Default, Deserialize)]
pub struct User {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Contributor {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub contributions: Option<u64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Issue or pull request state: open or closed
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
    pub user: Option<User>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub comments: Option<u64>,
    pub draft: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub html_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub user: Option<User>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub comments: Option<u64>,

    /// Present when the issues listing returns a pull request.
    pub pull_request: Option<IgnoredAny>,
}

impl Issue {
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// One weekly bucket of `/stats/commit_activity`
#[derive(Debug, Deserialize)]
pub struct WeekActivity {
    /// Start of the week, in seconds since the Unix epoch
    #[serde(default)]
    pub week: i64,
    #[serde(default)]
    pub total: u64,
    pub days: Option<Vec<u64>>,
}

#[derive(Debug, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub html_url: Option<String>,
    pub prerelease: Option<bool>,
}

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// GitHub API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: Url,
    permits: Arc<Semaphore>,
}

impl Client {
    /// Create a new GitHub API client with the given token and transport settings
    pub fn new(token: &str, config: &Config) -> Result<Self> {
        let mut auth_val = HeaderValue::from_str(&format!("token {token}"))?;
        auth_val.set_sensitive(true);

        let mut headers = HeaderMap::new();
        let _ = headers.insert(AUTHORIZATION, auth_val);
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .pool_max_idle_per_host(config.max_connections_per_host)
            .build()?;

        // every request goes to the same host, so the per-host limit is the binding one
        let max_in_flight = config.max_connections.min(config.max_connections_per_host);

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            permits: Arc::new(Semaphore::new(max_in_flight)),
        })
    }

    /// Build `<base>/repos/<owner>/<repo>/<resource...>`
    pub fn repo_url(&self, repo: &RepoSpec, resource: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        let _ = url
            .path_segments_mut()
            .map_err(|()| app_err!("API base URL '{}' cannot be a base", self.base_url))?
            .pop_if_empty()
            .extend(["repos", repo.owner(), repo.repo()])
            .extend(resource);
        Ok(url)
    }

    /// Issue a GET against a repository resource and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, repo: &RepoSpec, resource: &[&str], query: &[(&str, String)]) -> FetchResult<T> {
        let url = match self.repo_url(repo, resource) {
            Ok(url) => url,
            Err(e) => return FetchResult::Unavailable(Arc::new(e)),
        };

        let _permit = self.permits.acquire().await.expect("semaphore is never closed");

        log::debug!(target: LOG_TARGET, "GET {url}");

        let resp = match self.client.get(url.clone()).query(query).send().await {
            Ok(resp) => resp,
            Err(e) if e.is_timeout() => {
                log::error!(target: LOG_TARGET, "Timeout accessing GitHub API: {url}");
                return FetchResult::Unavailable(Arc::new(app_err!("timed out accessing '{url}'")));
            }
            Err(e) => {
                log::error!(target: LOG_TARGET, "Error making request to {url}: {e}");
                return FetchResult::Unavailable(Arc::new(app_err!("could not reach '{url}': {e}")));
            }
        };

        let status = resp.status();
        match status {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                log::warn!(target: LOG_TARGET, "GitHub API 404: {url}");
                return FetchResult::NotFound;
            }
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                match extract_rate_limit_from_headers(resp.headers()) {
                    Some(info) => log::error!(target: LOG_TARGET,
                        "GitHub API rate limit exceeded: {url} (remaining={}, reset={})", info.remaining, info.reset_at),
                    None => log::error!(target: LOG_TARGET, "GitHub API rate limit exceeded: {url}"),
                }
                return FetchResult::Unavailable(Arc::new(app_err!("rate limited by GitHub ({status}) for '{url}'")));
            }
            _ => {
                log::error!(target: LOG_TARGET, "GitHub API error {}: {url}", status.as_u16());
                return FetchResult::Unavailable(Arc::new(app_err!("GitHub answered {status} for '{url}'")));
            }
        }

        let bytes = match resp.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!(target: LOG_TARGET, "Error reading response body from {url}: {e}");
                return FetchResult::Unavailable(Arc::new(app_err!("could not read response body from '{url}': {e}")));
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(data) => FetchResult::Found(data),
            Err(e) => {
                log::error!(target: LOG_TARGET, "Malformed response from {url}: {e}");
                FetchResult::Malformed(Arc::new(app_err!("malformed JSON from '{url}': {e}")))
            }
        }
    }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}
