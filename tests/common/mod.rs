//! Mock GitHub API shared by the integration tests

use core::time::Duration;
use repo_stats::config::Config;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const OWNER: &str = "octo";
pub const REPO: &str = "demo";
pub const TOKEN: &str = "test_token";

pub const REPOSITORY: &str = include_str!("../fixtures/repository.json");
pub const CONTRIBUTORS: &str = include_str!("../fixtures/contributors.json");
pub const PULLS: &str = include_str!("../fixtures/pulls.json");
pub const ISSUES: &str = include_str!("../fixtures/issues.json");
pub const LANGUAGES: &str = include_str!("../fixtures/languages.json");
pub const RELEASES: &str = include_str!("../fixtures/releases.json");

/// Sunday 2023-06-04 00:00:00 UTC
pub const FIRST_WEEK: i64 = 1_685_836_800;
pub const WEEK_SECS: i64 = 7 * 24 * 60 * 60;

/// Twenty weekly buckets; week `i` has a total of `i + 1` commits
pub fn commit_activity() -> Value {
    Value::Array(
        (0..20_i64)
            .map(|i| {
                json!({
                    "week": FIRST_WEEK + i * WEEK_SECS,
                    "total": i + 1,
                    "days": [0, i + 1, 0, 0, 0, 0, 0]
                })
            })
            .collect(),
    )
}

pub fn resource_path(resource: &str) -> String {
    if resource.is_empty() {
        format!("/repos/{OWNER}/{REPO}")
    } else {
        format!("/repos/{OWNER}/{REPO}/{resource}")
    }
}

pub fn json_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "application/json")
}

/// Mount a response for one repository resource (empty for the repository itself)
pub async fn mount(server: &MockServer, resource: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(resource_path(resource)))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Mount successful responses for every resource except those in `skip`
pub async fn mount_all_except(server: &MockServer, skip: &[&str]) {
    let activity = commit_activity().to_string();
    let resources = [
        ("", REPOSITORY),
        ("contributors", CONTRIBUTORS),
        ("pulls", PULLS),
        ("issues", ISSUES),
        ("stats/commit_activity", activity.as_str()),
        ("languages", LANGUAGES),
        ("releases", RELEASES),
    ];

    for (resource, body) in resources {
        if !skip.contains(&resource) {
            mount(server, resource, json_response(body)).await;
        }
    }
}

pub async fn mount_all(server: &MockServer) {
    mount_all_except(server, &[]).await;
}

pub fn test_config(server: &MockServer) -> Config {
    Config {
        api_base_url: Url::parse(&server.uri()).unwrap(),
        request_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        read_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}
