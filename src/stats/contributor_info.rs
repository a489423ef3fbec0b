use super::client::Contributor;
use serde::{Deserialize, Serialize};

const DEFAULT_CONTRIBUTOR_TYPE: &str = "User";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorInfo {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
    pub contributions: u64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<Contributor> for ContributorInfo {
    fn from(contributor: Contributor) -> Self {
        Self {
            login: contributor.login,
            avatar_url: contributor.avatar_url,
            profile_url: contributor.html_url,
            contributions: contributor.contributions.unwrap_or(0),
            kind: contributor.kind.unwrap_or_else(|| DEFAULT_CONTRIBUTOR_TYPE.to_string()),
        }
    }
}
