use super::{CommitActivity, ContributorInfo, IssueStats, PullRequestStats, RepositoryInfo};
use serde::{Deserialize, Serialize};

/// Headline numbers derived from the fetched sections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_contributors: u64,

    /// Sum of the weekly totals in the retained commit activity window
    pub total_commits_recent: u64,
    pub stars: u64,
    pub forks: u64,
    pub open_prs: u64,
    pub open_issues: u64,
}

impl Metrics {
    #[must_use]
    pub fn compute(
        repository: &RepositoryInfo,
        contributors: &[ContributorInfo],
        pull_requests: &PullRequestStats,
        issues: &IssueStats,
        commit_activity: &[CommitActivity],
    ) -> Self {
        Self {
            total_contributors: contributors.len() as u64,
            total_commits_recent: commit_activity.iter().map(|week| week.total).sum(),
            stars: repository.stars,
            forks: repository.forks,
            open_prs: pull_requests.open,
            open_issues: issues.open,
        }
    }
}
