use super::Host;
use super::common::{LogLevel, init_logging};
use crate::Result;
use crate::config::Config;
use crate::handler::{HandlerError, RepoStatsRequest, handle_repo_stats, parse_request};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use serde::Serialize;
use std::fs;
use std::io::{Read, Write, stdin};
use url::Url;

const LOG_TARGET: &str = "   analyze";

/// Path that selects standard input for `--request`
const STDIN_PATH: &str = "-";

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Repository to analyze, as `owner/repo` or a GitHub URL
    #[arg(value_name = "REPO", required_unless_present = "request", conflicts_with = "request")]
    pub repo: Option<String>,

    /// Read a JSON request body (`{"repo_url": ...}`) from a file, or from stdin with `-`
    #[arg(long, value_name = "PATH")]
    pub request: Option<Utf8PathBuf>,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Path to configuration file (default is `repo-stats.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Base URL of the GitHub API, overriding the configuration file
    #[arg(long, value_name = "URL")]
    pub api_url: Option<Url>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

/// Analyze one repository and print the statistics document
///
/// A failed analysis prints the `{"detail": ...}` body, reports the HTTP status on the
/// error stream, and exits with status code 1.
pub async fn analyze_repository<H: Host>(host: &mut H, args: &AnalyzeArgs) -> Result<()> {
    init_logging(args.log_level);

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(api_url) = &args.api_url {
        config.api_base_url = api_url.clone();
        config.validate()?;
    }

    let outcome = match read_request(args)? {
        Ok(request) => handle_repo_stats(&request, args.github_token.as_deref(), &config).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(stats) => write_json(host, &stats, args.compact),
        Err(HandlerError { status, body }) => {
            log::debug!(target: LOG_TARGET, "Request failed with status {status}");
            write_json(host, &body, args.compact)?;
            let _ = writeln!(host.error(), "HTTP {status}");
            host.exit(1);
            Ok(())
        }
    }
}

/// Build the request from the positional repository or the `--request` body
fn read_request(args: &AnalyzeArgs) -> Result<core::result::Result<RepoStatsRequest, HandlerError>> {
    if let Some(repo) = &args.repo {
        return Ok(Ok(RepoStatsRequest { repo_url: repo.clone() }));
    }

    let body = match args.request.as_deref() {
        Some(path) if path.as_str() == STDIN_PATH => {
            let mut body = String::new();
            let _ = stdin().read_to_string(&mut body).into_app_err("reading request body from stdin")?;
            body
        }
        Some(path) => fs::read_to_string(path).into_app_err_with(|| format!("reading request body from '{path}'"))?,
        None => ohno::bail!("no repository given; pass REPO or --request"),
    };

    Ok(parse_request(&body))
}

fn write_json<H: Host>(host: &mut H, value: &impl Serialize, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .into_app_err("serializing output")?;

    let _ = writeln!(host.output(), "{json}");
    Ok(())
}
