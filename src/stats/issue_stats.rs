use super::AuthorInfo;
use super::client::{Issue, IssueState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueDisplayState {
    Open,
    Closed,
}

impl From<IssueState> for IssueDisplayState {
    fn from(state: IssueState) -> Self {
        match state {
            IssueState::Open => Self::Open,
            IssueState::Closed => Self::Closed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetail {
    pub number: u64,
    pub title: String,
    pub state: IssueDisplayState,
    pub url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub author: AuthorInfo,
    pub labels: Vec<String>,
    pub comments: u64,
}

impl From<Issue> for IssueDetail {
    fn from(issue: Issue) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            state: issue.state.into(),
            url: issue.html_url,
            created_at: issue.created_at,
            author: AuthorInfo::from(issue.user),
            labels: issue.labels.into_iter().map(|label| label.name).collect(),
            comments: issue.comments.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueStats {
    pub open: u64,
    pub closed: u64,
    pub total: u64,
    pub details: Vec<IssueDetail>,
}

/// Builds issue statistics from a raw issues listing, skipping the pull requests
/// GitHub mixes into it.
impl FromIterator<Issue> for IssueStats {
    fn from_iter<I: IntoIterator<Item = Issue>>(issues: I) -> Self {
        let mut stats = Self::default();

        for detail in issues.into_iter().filter(|issue| !issue.is_pull_request()).map(IssueDetail::from) {
            match detail.state {
                IssueDisplayState::Open => stats.open += 1,
                IssueDisplayState::Closed => stats.closed += 1,
            }
            stats.details.push(detail);
        }

        stats.total = stats.details.len() as u64;
        stats
    }
}
