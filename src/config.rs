//! Configuration for repo-stats
//!
//! Settings are read from `repo-stats.toml` (or an explicit path) and fall back to
//! built-in defaults when no file is present. The GitHub token is deliberately not part
//! of the file; it comes from the command line or the `GITHUB_TOKEN` environment variable.

use crate::Result;
use camino::Utf8Path;
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

const LOG_TARGET: &str = "    config";

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "repo-stats.toml";

/// GitHub rejects page sizes above this value
const MAX_PAGE_SIZE: usize = 100;

/// GitHub's commit activity statistics cover one year
const WEEKS_PER_YEAR: usize = 52;

/// State filter applied to pull request and issue listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StateFilter {
    All,
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: Url,

    /// Value of the `User-Agent` header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of contributors to fetch
    #[serde(default = "default_max_contributors")]
    pub max_contributors: usize,

    /// Maximum number of pull requests to fetch
    #[serde(default = "default_max_items")]
    pub max_pull_requests: usize,

    /// Maximum number of issues to fetch (pull requests returned by the issues listing count towards this)
    #[serde(default = "default_max_items")]
    pub max_issues: usize,

    /// Maximum number of releases to fetch
    #[serde(default = "default_max_releases")]
    pub max_releases: usize,

    /// Number of most recent weeks of commit activity to keep
    #[serde(default = "default_recent_weeks")]
    pub recent_weeks: usize,

    /// State filter for pull request and issue listings
    #[serde(default = "default_state_filter")]
    pub state_filter: StateFilter,

    /// Total time allowed for a single upstream request
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Time allowed to establish a connection
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Time allowed between reads of the response body
    #[serde(default = "default_read_timeout", with = "humantime_serde")]
    pub read_timeout: Duration,

    /// Maximum number of concurrent upstream connections
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Maximum number of concurrent upstream connections to a single host
    #[serde(default = "default_max_connections_per_host")]
    pub max_connections_per_host: usize,
}

fn default_api_base_url() -> Url {
    Url::parse("https://api.github.com").expect("valid default URL")
}

fn default_user_agent() -> String {
    format!("repo-stats/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_max_contributors() -> usize {
    30
}

const fn default_max_items() -> usize {
    50
}

const fn default_max_releases() -> usize {
    10
}

const fn default_recent_weeks() -> usize {
    12
}

const fn default_state_filter() -> StateFilter {
    StateFilter::All
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

const fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

const fn default_read_timeout() -> Duration {
    Duration::from_secs(30)
}

const fn default_max_connections() -> usize {
    50
}

const fn default_max_connections_per_host() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            max_contributors: default_max_contributors(),
            max_pull_requests: default_max_items(),
            max_issues: default_max_items(),
            max_releases: default_max_releases(),
            recent_weeks: default_recent_weeks(),
            state_filter: default_state_filter(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            read_timeout: default_read_timeout(),
            max_connections: default_max_connections(),
            max_connections_per_host: default_max_connections_per_host(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// With no explicit path, `repo-stats.toml` in the current directory is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading repo-stats configuration file '{path}'"))?;
            (path.to_owned(), text)
        } else {
            let path = Utf8Path::new(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(path) {
                Ok(text) => (path.to_owned(), text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!(target: LOG_TARGET, "No '{DEFAULT_CONFIG_FILE}' found, using default configuration");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading repo-stats configuration file '{path}'")),
            }
        };

        Self::from_toml(&text).map_err(|e| e.enrich_with(|| format!("loading configuration file '{final_path}'")))
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or holds invalid values
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).into_app_err("parsing configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a limit is out of range or the timeouts are inconsistent
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_contributors", self.max_contributors),
            ("max_pull_requests", self.max_pull_requests),
            ("max_issues", self.max_issues),
            ("max_releases", self.max_releases),
        ] {
            if !(1..=MAX_PAGE_SIZE).contains(&value) {
                return Err(app_err!("{name} must be between 1 and {MAX_PAGE_SIZE}, got {value}"));
            }
        }

        if !(1..=WEEKS_PER_YEAR).contains(&self.recent_weeks) {
            return Err(app_err!(
                "recent_weeks must be between 1 and {WEEKS_PER_YEAR}, got {}",
                self.recent_weeks
            ));
        }

        if self.max_connections == 0 || self.max_connections_per_host == 0 {
            return Err(app_err!("max_connections and max_connections_per_host must be greater than 0"));
        }

        if self.connect_timeout > self.request_timeout {
            return Err(app_err!(
                "connect_timeout ({:?}) must not exceed request_timeout ({:?})",
                self.connect_timeout,
                self.request_timeout
            ));
        }

        if self.api_base_url.cannot_be_a_base() {
            return Err(app_err!("api_base_url '{}' cannot be used as a base URL", self.api_base_url));
        }

        Ok(())
    }
}
