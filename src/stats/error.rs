use super::repo_spec::ACCEPTED_FORMATS;
use std::sync::Arc;
use thiserror::Error;

/// Failures that surface to the caller of the aggregator.
///
/// Per-category upstream failures never show up here; they are absorbed as
/// [`FetchResult`](super::FetchResult) variants and replaced by empty sections.
#[derive(Debug, Clone, Error)]
pub enum StatsError {
    /// The repository identifier could not be parsed.
    #[error("Invalid repository format: '{input}'. Expected: {}", ACCEPTED_FORMATS)]
    InvalidFormat { input: String },

    /// GitHub returned no repository information.
    #[error("Repository {repo} not found")]
    RepositoryNotFound { repo: String },

    /// Anything outside the per-category contracts.
    #[error("{0}")]
    Unexpected(Arc<ohno::AppError>),
}

impl From<ohno::AppError> for StatsError {
    fn from(error: ohno::AppError) -> Self {
        Self::Unexpected(Arc::new(error))
    }
}
