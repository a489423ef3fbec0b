use super::client::{Client, Contributor, Issue, PullRequest, Release, Repository, WeekActivity};
use super::{
    CommitActivity, ComprehensiveStats, ContributorInfo, FetchResult, IssueStats, Languages, PullRequestStats, ReleaseInfo, RepoSpec,
    RepositoryInfo, StatsError,
};
use crate::Result;
use crate::config::{Config, StateFilter};
use ohno::{app_err, bail};
use std::sync::Arc;
use tokio::task::JoinError;

const LOG_TARGET: &str = "aggregator";

/// Fetches repository statistics from the GitHub API
///
/// An aggregator owns one HTTP connection pool. Cloning it shares that pool, which is
/// how the comprehensive fetch hands the client to its concurrent tasks.
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: Client,
    max_contributors: usize,
    max_pull_requests: usize,
    max_issues: usize,
    max_releases: usize,
    recent_weeks: usize,
    state_filter: StateFilter,
}

impl Aggregator {
    /// Create an aggregator authenticated with the given token
    pub fn new(token: Option<&str>, config: &Config) -> Result<Self> {
        let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
            bail!("a GitHub token is required; pass --github-token or set GITHUB_TOKEN");
        };

        Ok(Self {
            client: Client::new(token, config)?,
            max_contributors: config.max_contributors,
            max_pull_requests: config.max_pull_requests,
            max_issues: config.max_issues,
            max_releases: config.max_releases,
            recent_weeks: config.recent_weeks,
            state_filter: config.state_filter,
        })
    }

    /// Descriptive metadata for the repository
    pub async fn get_repo_info(&self, repo: &RepoSpec) -> FetchResult<RepositoryInfo> {
        self.client
            .get_json::<Repository>(repo, &[], &[])
            .await
            .map(RepositoryInfo::from)
    }

    /// Top contributors, in the order GitHub ranks them
    pub async fn get_contributors(&self, repo: &RepoSpec) -> FetchResult<Vec<ContributorInfo>> {
        let query = [("per_page", self.max_contributors.to_string()), ("anon", "false".to_string())];

        self.client
            .get_json::<Vec<Contributor>>(repo, &["contributors"], &query)
            .await
            .map(|contributors| contributors.into_iter().map(ContributorInfo::from).collect())
    }

    /// Most recently updated pull requests
    pub async fn get_pull_requests(&self, repo: &RepoSpec) -> FetchResult<PullRequestStats> {
        let query = self.listing_query(self.max_pull_requests);

        self.client
            .get_json::<Vec<PullRequest>>(repo, &["pulls"], &query)
            .await
            .map(|pulls| pulls.into_iter().collect())
    }

    /// Most recently updated issues, excluding pull requests
    pub async fn get_issues(&self, repo: &RepoSpec) -> FetchResult<IssueStats> {
        let query = self.listing_query(self.max_issues);

        self.client
            .get_json::<Vec<Issue>>(repo, &["issues"], &query)
            .await
            .map(|issues| issues.into_iter().collect())
    }

    /// Weekly commit totals for the most recent weeks
    pub async fn get_commit_activity(&self, repo: &RepoSpec) -> FetchResult<Vec<CommitActivity>> {
        let recent_weeks = self.recent_weeks;

        self.client
            .get_json::<Vec<WeekActivity>>(repo, &["stats", "commit_activity"], &[])
            .await
            .map(|weeks| CommitActivity::recent(weeks, recent_weeks))
    }

    /// Bytes of code per language
    pub async fn get_languages(&self, repo: &RepoSpec) -> FetchResult<Languages> {
        self.client.get_json::<Languages>(repo, &["languages"], &[]).await
    }

    /// Most recent releases
    pub async fn get_releases(&self, repo: &RepoSpec) -> FetchResult<Vec<ReleaseInfo>> {
        let query = [("per_page", self.max_releases.to_string())];

        self.client
            .get_json::<Vec<Release>>(repo, &["releases"], &query)
            .await
            .map(|releases| releases.into_iter().map(ReleaseInfo::from).collect())
    }

    /// Fetch every category concurrently and merge the results
    ///
    /// Categories that cannot be fetched are replaced by empty sections. The operation
    /// only fails when the repository itself cannot be retrieved.
    pub async fn get_comprehensive_stats(&self, repo: &RepoSpec) -> core::result::Result<ComprehensiveStats, StatsError> {
        log::info!(target: LOG_TARGET, "Fetching comprehensive statistics for {repo}");

        let repo = Arc::new(repo.clone());

        macro_rules! spawn_fetch {
            ($method:ident) => {{
                let agg = self.clone();
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { agg.$method(&repo).await })
            }};
        }

        let (repo_info, contributors, pull_requests, issues, commit_activity, languages, releases) = tokio::join!(
            spawn_fetch!(get_repo_info),
            spawn_fetch!(get_contributors),
            spawn_fetch!(get_pull_requests),
            spawn_fetch!(get_issues),
            spawn_fetch!(get_commit_activity),
            spawn_fetch!(get_languages),
            spawn_fetch!(get_releases),
        );

        let repository = match joined(repo_info) {
            FetchResult::Found(info) => info,
            FetchResult::Malformed(e) => {
                log::error!(target: LOG_TARGET, "Repository information for {repo} could not be decoded: {e}");
                return Err(StatsError::Unexpected(e));
            }
            other => {
                log::warn!(target: LOG_TARGET, "Repository information for {repo} unavailable ({})", other.status_str());
                return Err(StatsError::RepositoryNotFound { repo: repo.to_string() });
            }
        };

        let stats = ComprehensiveStats::new(
            &repo,
            repository,
            section(&repo, "contributors", joined(contributors)),
            section(&repo, "pull requests", joined(pull_requests)),
            section(&repo, "issues", joined(issues)),
            section(&repo, "commit activity", joined(commit_activity)),
            section(&repo, "languages", joined(languages)),
            section(&repo, "releases", joined(releases)),
        );

        log::info!(target: LOG_TARGET,
            "Collected statistics for {repo}: {} contributors, {} pull requests, {} issues, {} releases",
            stats.contributors.len(), stats.pull_requests.total, stats.issues.total, stats.releases.len());

        Ok(stats)
    }

    fn listing_query(&self, per_page: usize) -> [(&'static str, String); 4] {
        [
            ("state", self.state_filter.to_string()),
            ("per_page", per_page.to_string()),
            ("sort", "updated".to_string()),
            ("direction", "desc".to_string()),
        ]
    }
}

/// Fold a task failure into the category's result
fn joined<T>(result: core::result::Result<FetchResult<T>, JoinError>) -> FetchResult<T> {
    result.unwrap_or_else(|e| {
        log::error!(target: LOG_TARGET, "Fetch task failed: {e}");
        FetchResult::Unavailable(Arc::new(app_err!("fetch task failed: {e}")))
    })
}

/// Unwrap a fetched section, substituting an empty one when the fetch did not succeed
fn section<T: Default>(repo: &RepoSpec, name: &str, result: FetchResult<T>) -> T {
    match result {
        FetchResult::Found(data) => data,
        FetchResult::NotFound => {
            log::warn!(target: LOG_TARGET, "No {name} found for {repo}");
            T::default()
        }
        FetchResult::Unavailable(e) => {
            log::warn!(target: LOG_TARGET, "Could not fetch {name} for {repo}: {e}");
            T::default()
        }
        FetchResult::Malformed(e) => {
            log::warn!(target: LOG_TARGET, "Could not decode {name} for {repo}: {e}");
            T::default()
        }
    }
}
