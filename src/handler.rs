//! Repository statistics request handling
//!
//! [`handle_repo_stats`] turns a `{"repo_url": ...}` request into either the
//! comprehensive statistics document or an HTTP status with a `{"detail": ...}` body.
//! It is independent of any web framework; the caller decides how to transmit the result.

use crate::config::Config;
use crate::stats::{Aggregator, ComprehensiveStats, RepoSpec, StatsError};
use core::fmt::{Display, Formatter};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

const LOG_TARGET: &str = "   handler";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStatsRequest {
    /// `owner/repo` or a GitHub repository URL
    pub repo_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// A failed request, ready to be sent back to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl HandlerError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody { detail: detail.into() },
        }
    }
}

impl Display for HandlerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.status, self.body.detail)
    }
}

impl From<StatsError> for HandlerError {
    fn from(error: StatsError) -> Self {
        match error {
            StatsError::InvalidFormat { .. } => Self::new(StatusCode::BAD_REQUEST, error.to_string()),
            StatsError::RepositoryNotFound { .. } => Self::new(StatusCode::NOT_FOUND, error.to_string()),
            StatsError::Unexpected(e) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to analyze repository: {e}")),
        }
    }
}

/// Decode a JSON request body, rejecting malformed bodies with 400
pub fn parse_request(body: &str) -> Result<RepoStatsRequest, HandlerError> {
    serde_json::from_str(body).map_err(|e| {
        log::warn!(target: LOG_TARGET, "Rejected malformed request body: {e}");
        HandlerError::new(StatusCode::BAD_REQUEST, format!("Invalid request body: {e}"))
    })
}

/// Produce comprehensive statistics for the repository named in the request
///
/// Makes a single attempt. Invalid identifiers map to 400, a missing repository to 404,
/// and every other failure to 500.
pub async fn handle_repo_stats(
    request: &RepoStatsRequest,
    token: Option<&str>,
    config: &Config,
) -> Result<ComprehensiveStats, HandlerError> {
    let repo = RepoSpec::parse(&request.repo_url).inspect_err(|e| log::warn!(target: LOG_TARGET, "Rejected request: {e}"))?;

    log::info!(target: LOG_TARGET, "Analyzing repository {repo}");

    let aggregator = Aggregator::new(token, config).map_err(StatsError::from)?;

    match aggregator.get_comprehensive_stats(&repo).await {
        Ok(stats) => Ok(stats),
        Err(e) => {
            log::error!(target: LOG_TARGET, "Failed to analyze {repo}: {e}");
            Err(e.into())
        }
    }
}
