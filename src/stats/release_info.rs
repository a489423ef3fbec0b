use super::client::Release;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub prerelease: bool,
}

impl From<Release> for ReleaseInfo {
    fn from(release: Release) -> Self {
        Self {
            tag_name: release.tag_name,
            name: release.name,
            published_at: release.published_at,
            url: release.html_url,
            prerelease: release.prerelease.unwrap_or(false),
        }
    }
}
