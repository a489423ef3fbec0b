use std::sync::Arc;

/// Outcome of a single category fetch against the GitHub API.
///
/// Category fetchers never fail outright. Anything other than [`FetchResult::Found`]
/// means the section is missing, and the aggregator substitutes an empty default.
#[derive(Debug, Clone)]
pub enum FetchResult<T> {
    /// The request succeeded and the body was decoded.
    Found(T),

    /// GitHub answered 404.
    NotFound,

    /// Rate limiting, an unexpected status code, a timeout, or a transport failure.
    Unavailable(Arc<ohno::AppError>),

    /// GitHub answered 200 but the body did not have the expected shape.
    Malformed(Arc<ohno::AppError>),
}

impl<T> FetchResult<T> {
    /// Transform the data of a `Found` result, leaving the other variants untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        match self {
            Self::Found(data) => FetchResult::Found(f(data)),
            Self::NotFound => FetchResult::NotFound,
            Self::Unavailable(e) => FetchResult::Unavailable(e),
            Self::Malformed(e) => FetchResult::Malformed(e),
        }
    }

    /// Returns a string describing the status of this result.
    #[must_use]
    pub const fn status_str(&self) -> &'static str {
        match self {
            Self::Found(_) => "Found",
            Self::NotFound => "NotFound",
            Self::Unavailable(_) => "Unavailable",
            Self::Malformed(_) => "Malformed",
        }
    }
}
