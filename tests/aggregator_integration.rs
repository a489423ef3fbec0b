//! Integration tests for the statistics aggregator against a mock GitHub API

mod common;

use common::{OWNER, REPO, TOKEN, json_response, mount, mount_all, mount_all_except, test_config};
use core::time::Duration;
use repo_stats::config::Config;
use repo_stats::stats::{Aggregator, FetchResult, Languages, PullRequestState, RepoSpec, StatsError};
use wiremock::matchers::{header, method, path, query_param};
use std::time::Instant;
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = concat!("repo-stats/", env!("CARGO_PKG_VERSION"));

fn repo() -> RepoSpec {
    RepoSpec::new(OWNER, REPO)
}

#[tokio::test]
async fn test_comprehensive_stats_merges_all_sections() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let aggregator = Aggregator::new(Some(TOKEN), &test_config(&server)).unwrap();
    let stats = aggregator.get_comprehensive_stats(&repo()).await.unwrap();

    assert_eq!(stats.repo, "octo/demo");
    assert_eq!(stats.repository.full_name, "octo/demo");
    assert_eq!(stats.repository.license.as_deref(), Some("MIT License"));
    assert_eq!(stats.contributors.len(), 3);
    assert_eq!(stats.contributors[2].kind, "Bot");

    assert_eq!(stats.pull_requests.open, 1);
    assert_eq!(stats.pull_requests.merged, 1);
    assert_eq!(stats.pull_requests.closed, 1);
    assert_eq!(stats.pull_requests.total, 3);
    assert_eq!(stats.pull_requests.details[1].state, PullRequestState::Merged);
    assert!(stats.pull_requests.details[0].draft);

    assert_eq!(stats.issues.total, 2);
    assert_eq!(stats.issues.open, 1);
    assert_eq!(stats.issues.closed, 1);
    assert!(stats.issues.details.iter().all(|issue| issue.number != 42));

    assert_eq!(stats.commit_activity.len(), 12);
    assert_eq!(stats.commit_activity[0].total, 9);
    assert_eq!(stats.commit_activity[11].total, 20);

    assert_eq!(
        serde_json::to_string(&stats.languages).unwrap(),
        r#"{"Rust":184233,"Shell":2410,"Dockerfile":880}"#
    );

    assert_eq!(stats.releases.len(), 2);
    assert!(stats.releases[0].prerelease);

    assert_eq!(stats.metrics.total_contributors, 3);
    assert_eq!(stats.metrics.total_commits_recent, (9..=20).sum::<u64>());
    assert_eq!(stats.metrics.stars, 1520);
    assert_eq!(stats.metrics.forks, 212);
    assert_eq!(stats.metrics.open_prs, stats.pull_requests.open);
    assert_eq!(stats.metrics.open_issues, stats.issues.open);
}

#[tokio::test]
async fn test_commit_activity_weeks_are_dated() {
    let server = MockServer::start().await;
    mount_all(&server).await;

    let aggregator = Aggregator::new(Some(TOKEN), &test_config(&server)).unwrap();
    let FetchResult::Found(activity) = aggregator.get_commit_activity(&repo()).await else {
        unreachable!("commit activity is mounted");
    };

    // bucket 8 of 20 starts 8 weeks after 2023-06-04
    assert_eq!(activity[0].week, "2023-07-30");
    assert_eq!(activity[0].days, vec![0, 9, 0, 0, 0, 0, 0]);
}

#[tokio::test]
async fn test_missing_repository_is_not_found() {
    let server = MockServer::start().await;
    mount_all_except(&server, &[""]).await;
    mount(&server, "", ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#)).await;

    let aggregator = Aggregator::new(Some(TOKEN), &test_config(&server)).unwrap();
    let err = aggregator.get_comprehensive_stats(&repo()).await.unwrap_err();

    match err {
        StatsError::RepositoryNotFound { repo } => assert_eq!(repo, "octo/demo"),
        other => panic!("Expected RepositoryNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_repository_is_unexpected() {
    let server = MockServer::start().await;
    mount_all_except(&server, &[""]).await;
    mount(&server, "", json_response(r#"{"unexpected": true}"#)).await;

    let aggregator = Aggregator::new(Some(TOKEN), &test_config(&server)).unwrap();
    let err = aggregator.get_comprehensive_stats(&repo()).await.unwrap_err();

    assert!(matches!(err, StatsError::Unexpected(_)), "got {err:?}");
}

#[tokio::test]
async fn test_slow_contributors_yield_empty_section() {
    let server = MockServer::start().await;
    mount_all_except(&server, &["contributors"]).await;
    mount(
        &server,
        "contributors",
        json_response(common::CONTRIBUTORS).set_delay(Duration::from_secs(3)),
    )
    .await;

    let mut config = test_config(&server);
    config.request_timeout = Duration::from_secs(1);
    config.connect_timeout = Duration::from_secs(1);

    let aggregator = Aggregator::new(Some(TOKEN), &config).unwrap();
    let stats = aggregator.get_comprehensive_stats(&repo()).await.unwrap();

    assert!(stats.contributors.is_empty());
    assert_eq!(stats.metrics.total_contributors, 0);
    assert_eq!(serde_json::to_value(&stats).unwrap()["status"], "success");
    assert_eq!(stats.releases.len(), 2);
}

#[tokio::test]
async fn test_rate_limited_sections_are_empty() {
    let server = MockServer::start().await;
    mount_all_except(&server, &["pulls", "issues"]).await;

    let rate_limited = ResponseTemplate::new(403)
        .insert_header("x-ratelimit-remaining", "0")
        .insert_header("x-ratelimit-reset", "1717250000")
        .set_body_string(r#"{"message":"API rate limit exceeded"}"#);
    mount(&server, "pulls", rate_limited.clone()).await;
    mount(&server, "issues", rate_limited).await;

    let aggregator = Aggregator::new(Some(TOKEN), &test_config(&server)).unwrap();

    assert!(matches!(aggregator.get_pull_requests(&repo()).await, FetchResult::Unavailable(_)));

    let stats = aggregator.get_comprehensive_stats(&repo()).await.unwrap();
    assert_eq!(stats.pull_requests.total, 0);
    assert!(stats.pull_requests.details.is_empty());
    assert_eq!(stats.issues.total, 0);
    assert_eq!(stats.metrics.open_prs, 0);
    assert_eq!(stats.metrics.open_issues, 0);
    assert_eq!(stats.contributors.len(), 3);
}

#[tokio::test]
async fn test_missing_optional_sections_are_empty() {
    let server = MockServer::start().await;
    mount_all_except(&server, &["languages", "releases", "stats/commit_activity"]).await;
    mount(&server, "languages", json_response("[1, 2, 3]")).await;
    mount(&server, "stats/commit_activity", ResponseTemplate::new(202).set_body_string("{}")).await;

    let aggregator = Aggregator::new(Some(TOKEN), &test_config(&server)).unwrap();

    assert!(matches!(aggregator.get_languages(&repo()).await, FetchResult::Malformed(_)));
    assert!(matches!(aggregator.get_commit_activity(&repo()).await, FetchResult::Unavailable(_)));
    assert!(matches!(aggregator.get_releases(&repo()).await, FetchResult::NotFound));

    let stats = aggregator.get_comprehensive_stats(&repo()).await.unwrap();
    assert_eq!(stats.languages, Languages::default());
    assert!(stats.commit_activity.is_empty());
    assert!(stats.releases.is_empty());
    assert_eq!(stats.metrics.total_commits_recent, 0);
}

#[tokio::test]
async fn test_requests_carry_headers_and_queries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/demo/contributors"))
        .and(header("authorization", "token test_token"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .and(header("user-agent", USER_AGENT))
        .and(query_param("per_page", "30"))
        .and(query_param("anon", "false"))
        .respond_with(json_response(common::CONTRIBUTORS))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/demo/pulls"))
        .and(query_param("state", "all"))
        .and(query_param("per_page", "50"))
        .and(query_param("sort", "updated"))
        .and(query_param("direction", "desc"))
        .respond_with(json_response(common::PULLS))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/demo/issues"))
        .and(query_param("state", "all"))
        .and(query_param("per_page", "50"))
        .and(query_param("sort", "updated"))
        .and(query_param("direction", "desc"))
        .respond_with(json_response(common::ISSUES))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/demo/releases"))
        .and(query_param("per_page", "10"))
        .respond_with(json_response(common::RELEASES))
        .expect(1)
        .mount(&server)
        .await;

    let aggregator = Aggregator::new(Some(TOKEN), &test_config(&server)).unwrap();

    assert!(matches!(aggregator.get_contributors(&repo()).await, FetchResult::Found(_)));
    assert!(matches!(aggregator.get_pull_requests(&repo()).await, FetchResult::Found(_)));
    assert!(matches!(aggregator.get_issues(&repo()).await, FetchResult::Found(_)));
    assert!(matches!(aggregator.get_releases(&repo()).await, FetchResult::Found(_)));
    server.verify().await;
}

#[tokio::test]
async fn test_connection_limit_serializes_requests() {
    const DELAY: Duration = Duration::from_millis(200);

    let server = MockServer::start().await;

    for resource in ["", "contributors", "pulls", "issues", "stats/commit_activity", "languages", "releases"] {
        let body = match resource {
            "" => common::REPOSITORY.to_string(),
            "languages" => common::LANGUAGES.to_string(),
            "stats/commit_activity" => common::commit_activity().to_string(),
            _ => "[]".to_string(),
        };

        Mock::given(method("GET"))
            .and(path(common::resource_path(resource)))
            .respond_with(json_response(&body).set_delay(DELAY))
            .mount(&server)
            .await;
    }

    let serial = Aggregator::new(
        Some(TOKEN),
        &Config {
            max_connections_per_host: 1,
            ..test_config(&server)
        },
    )
    .unwrap();

    let start = Instant::now();
    let _ = serial.get_comprehensive_stats(&repo()).await.unwrap();
    assert!(start.elapsed() >= DELAY * 7, "requests overlapped: {:?}", start.elapsed());

    let concurrent = Aggregator::new(Some(TOKEN), &test_config(&server)).unwrap();

    let start = Instant::now();
    let _ = concurrent.get_comprehensive_stats(&repo()).await.unwrap();
    assert!(start.elapsed() < DELAY * 7, "requests did not overlap: {:?}", start.elapsed());
}

#[tokio::test]
async fn test_each_category_is_requested_once() {
    let server = MockServer::start().await;

    for resource in ["", "contributors", "pulls", "issues", "stats/commit_activity", "languages", "releases"] {
        let body = match resource {
            "" => common::REPOSITORY.to_string(),
            "languages" => common::LANGUAGES.to_string(),
            "stats/commit_activity" => common::commit_activity().to_string(),
            _ => "[]".to_string(),
        };

        Mock::given(method("GET"))
            .and(path(common::resource_path(resource)))
            .respond_with(json_response(&body))
            .expect(1)
            .mount(&server)
            .await;
    }

    let aggregator = Aggregator::new(Some(TOKEN), &test_config(&server)).unwrap();
    let stats = aggregator.get_comprehensive_stats(&repo()).await.unwrap();

    assert!(stats.contributors.is_empty());
    assert_eq!(stats.pull_requests.total, 0);
    server.verify().await;
}
