use super::AuthorInfo;
use super::client::{IssueState, PullRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display state of a pull request, derived from the raw state and the merge timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    Open,
    Merged,
    Closed,
}

impl PullRequestState {
    /// An open pull request is `Open` whatever its merge timestamp says; a closed one is
    /// `Merged` when it carries a merge timestamp and `Closed` otherwise.
    #[must_use]
    pub const fn derive(state: IssueState, merged_at: Option<DateTime<Utc>>) -> Self {
        match (state, merged_at) {
            (IssueState::Open, _) => Self::Open,
            (IssueState::Closed, Some(_)) => Self::Merged,
            (IssueState::Closed, None) => Self::Closed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestDetail {
    pub number: u64,
    pub title: String,
    pub state: PullRequestState,
    pub url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub author: AuthorInfo,
    pub labels: Vec<String>,
    pub comments: u64,
    pub draft: bool,
}

impl From<PullRequest> for PullRequestDetail {
    fn from(pr: PullRequest) -> Self {
        Self {
            number: pr.number,
            title: pr.title,
            state: PullRequestState::derive(pr.state, pr.merged_at),
            url: pr.html_url,
            created_at: pr.created_at,
            updated_at: pr.updated_at,
            author: AuthorInfo::from(pr.user),
            labels: pr.labels.into_iter().map(|label| label.name).collect(),
            comments: pr.comments.unwrap_or(0),
            draft: pr.draft.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestStats {
    pub open: u64,
    pub closed: u64,
    pub merged: u64,
    pub total: u64,
    pub details: Vec<PullRequestDetail>,
}

impl FromIterator<PullRequest> for PullRequestStats {
    fn from_iter<I: IntoIterator<Item = PullRequest>>(pulls: I) -> Self {
        let mut stats = Self::default();

        for detail in pulls.into_iter().map(PullRequestDetail::from) {
            match detail.state {
                PullRequestState::Open => stats.open += 1,
                PullRequestState::Merged => stats.merged += 1,
                PullRequestState::Closed => stats.closed += 1,
            }
            stats.details.push(detail);
        }

        stats.total = stats.details.len() as u64;
        stats
    }
}
