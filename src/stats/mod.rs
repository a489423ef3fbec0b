//! Repository statistics
//!
//! Parses repository identifiers, fetches the per-category data from the GitHub REST
//! API, and merges it into a [`ComprehensiveStats`] document. Each category fetch
//! reports a [`FetchResult`]; only a missing repository fails the whole operation.

mod aggregator;
mod author_info;
pub mod client;
mod commit_activity;
mod comprehensive_stats;
mod contributor_info;
mod error;
mod fetch_result;
mod issue_stats;
mod languages;
mod metrics;
mod pull_request_stats;
mod release_info;
mod repo_spec;
mod repository_info;

pub use aggregator::Aggregator;
pub use author_info::AuthorInfo;
pub use commit_activity::CommitActivity;
pub use comprehensive_stats::{ComprehensiveStats, Status};
pub use contributor_info::ContributorInfo;
pub use error::StatsError;
pub use fetch_result::FetchResult;
pub use issue_stats::{IssueDetail, IssueDisplayState, IssueStats};
pub use languages::Languages;
pub use metrics::Metrics;
pub use pull_request_stats::{PullRequestDetail, PullRequestState, PullRequestStats};
pub use release_info::ReleaseInfo;
pub use repo_spec::{ACCEPTED_FORMATS, RepoSpec};
pub use repository_info::RepositoryInfo;
