use super::{CommitActivity, ContributorInfo, IssueStats, Languages, Metrics, PullRequestStats, ReleaseInfo, RepoSpec, RepositoryInfo};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Success,
}

/// Every statistics section for one repository, merged into a single document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComprehensiveStats {
    pub status: Status,

    /// `owner/repo`
    pub repo: String,
    pub repository: RepositoryInfo,
    pub contributors: Vec<ContributorInfo>,
    pub pull_requests: PullRequestStats,
    pub issues: IssueStats,
    pub commit_activity: Vec<CommitActivity>,
    pub languages: Languages,
    pub releases: Vec<ReleaseInfo>,
    pub metrics: Metrics,
}

impl ComprehensiveStats {
    /// Merge the fetched sections and derive the headline metrics from them.
    #[expect(clippy::too_many_arguments, reason = "one argument per statistics section")]
    #[must_use]
    pub fn new(
        repo: &RepoSpec,
        repository: RepositoryInfo,
        contributors: Vec<ContributorInfo>,
        pull_requests: PullRequestStats,
        issues: IssueStats,
        commit_activity: Vec<CommitActivity>,
        languages: Languages,
        releases: Vec<ReleaseInfo>,
    ) -> Self {
        let metrics = Metrics::compute(&repository, &contributors, &pull_requests, &issues, &commit_activity);

        Self {
            status: Status::Success,
            repo: repo.to_string(),
            repository,
            contributors,
            pull_requests,
            issues,
            commit_activity,
            languages,
            releases,
            metrics,
        }
    }
}
