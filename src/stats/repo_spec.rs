use super::StatsError;
use core::fmt::{Display, Formatter};
use regex::Regex;
use std::sync::LazyLock;

/// Human-readable list of the identifier syntaxes accepted by [`RepoSpec::parse`].
pub const ACCEPTED_FORMATS: &str = "'owner/repo' or 'https://github.com/owner/repo'";

/// `https://github.com/owner/repo`, `github.com/owner/repo`, `git@github.com:owner/repo.git`
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com[:/]([^/]+)/([^/]+?)(?:\.git)?$").expect("invalid regex"));

/// `owner/repo`
static SHORTHAND_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9][-a-zA-Z0-9]*)/([a-zA-Z0-9._-]+)$").expect("invalid regex"));

/// Identifies a single GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    owner: Box<str>,
    repo: Box<str>,
}

impl RepoSpec {
    /// Parse a free-form repository identifier.
    ///
    /// Surrounding whitespace, trailing slashes and a trailing `.git` are ignored. The URL
    /// form is tried first, then the `owner/repo` shorthand. Case is preserved.
    pub fn parse(input: &str) -> Result<Self, StatsError> {
        let normalized = input.trim().trim_end_matches('/');
        let normalized = normalized.strip_suffix(".git").unwrap_or(normalized);

        [&URL_PATTERN, &SHORTHAND_PATTERN]
            .into_iter()
            .find_map(|pattern| pattern.captures(normalized))
            .and_then(|caps| Some(Self::new(caps.get(1)?.as_str(), caps.get(2)?.as_str())))
            .filter(|spec| !spec.owner.is_empty() && !spec.repo.is_empty())
            .ok_or_else(|| StatsError::InvalidFormat { input: input.to_string() })
    }

    #[must_use]
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: Box::from(owner),
            repo: Box::from(repo),
        }
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
