//! End-to-end tests for the archive pipeline
//!
//! These tests run the full month-index + post crawl against a wiremock
//! server and check discovery, storage and idempotence.

use fefelog::archive::run_archive;
use fefelog::config::{
    AnalysisConfig, ArchiveConfig, BlogConfig, ClientConfig, Config, OutputConfig, RangeConfig,
};
use fefelog::store::ContentStore;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a configuration pointing at the mock server and a temp directory
fn test_config(server_uri: &str, workdir: &Path, months: (u32, u32)) -> Config {
    Config {
        blog: BlogConfig {
            month_url: format!("{}/?mon=", server_uri),
            post_url: format!("{}/?ts=", server_uri),
            domain: "blog.fefe.de".to_string(),
        },
        range: RangeConfig {
            start_year: 2005,
            start_month: months.0,
            end_year: 2005,
            end_month: months.1,
        },
        archive: ArchiveConfig {
            month_dir: workdir.join("month").to_string_lossy().into_owned(),
            post_dir: workdir.join("post").to_string_lossy().into_owned(),
        },
        client: ClientConfig::default(),
        output: OutputConfig {
            words_path: workdir.join("words.txt").to_string_lossy().into_owned(),
            links_path: workdir.join("links.txt").to_string_lossy().into_owned(),
            domains_path: workdir.join("domains.txt").to_string_lossy().into_owned(),
            filetypes_path: workdir.join("filetypes.txt").to_string_lossy().into_owned(),
            times_chart_path: workdir.join("times.svg").to_string_lossy().into_owned(),
            times_chart_fixed_path: workdir
                .join("times_fixed.svg")
                .to_string_lossy()
                .into_owned(),
        },
        analysis: AnalysisConfig::default(),
    }
}

const MONTH_PAGE: &str = r#"<html><body><h3>March 2005</h3><ul>
<li><a href="?ts=aaa111">[l]</a> first post</li>
<li><a href="?ts=bbb222">[l]</a> second post</li>
<a href="?mon=200502">previous month</a>
</ul></body></html>"#;

fn post_page(text: &str) -> String {
    format!(
        r#"<html><body><ul><li><a href="?ts=x">[l]</a> {}</ul><p><div>footer</div></body></html>"#,
        text
    )
}

async fn mount_month(server: &MockServer, mon: &str, body: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("mon", mon))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_post(server: &MockServer, ts: &str, body: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("ts", ts))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_archive_discovers_and_fetches_posts() {
    let server = MockServer::start().await;
    mount_month(&server, "200503", MONTH_PAGE, 1).await;
    mount_post(&server, "aaa111", &post_page("hello"), 1).await;
    mount_post(&server, "bbb222", &post_page("world"), 1).await;

    let workdir = TempDir::new().unwrap();
    let config = test_config(&server.uri(), workdir.path(), (3, 3));

    let summary = run_archive(&config).await.unwrap();

    assert_eq!(summary.months.stored, 1);
    assert_eq!(summary.refs_discovered, 2);
    assert_eq!(summary.posts.stored, 2);
    assert_eq!(summary.posts.failed, 0);

    let month_store = ContentStore::open(&config.archive.month_dir).unwrap();
    assert!(month_store.contains("200503"));

    let post_store = ContentStore::open(&config.archive.post_dir).unwrap();
    assert!(post_store.contains("aaa111"));
    assert!(post_store.contains("bbb222"));
    assert!(String::from_utf8(post_store.read("aaa111").unwrap())
        .unwrap()
        .contains("hello"));
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let server = MockServer::start().await;
    // Each page may be requested exactly once across both runs
    mount_month(&server, "200503", MONTH_PAGE, 1).await;
    mount_post(&server, "aaa111", &post_page("hello"), 1).await;
    mount_post(&server, "bbb222", &post_page("world"), 1).await;

    let workdir = TempDir::new().unwrap();
    let config = test_config(&server.uri(), workdir.path(), (3, 3));

    let first = run_archive(&config).await.unwrap();
    assert_eq!(first.months.stored, 1);
    assert_eq!(first.posts.stored, 2);

    let second = run_archive(&config).await.unwrap();
    assert_eq!(second.months.stored, 0);
    assert_eq!(second.months.skipped, 1);
    assert_eq!(second.posts.stored, 0);
    assert_eq!(second.posts.skipped, 2);

    // MockServer verifies the expected call counts on drop
}

#[tokio::test]
async fn test_failed_month_contributes_no_references() {
    let server = MockServer::start().await;
    mount_month(&server, "200503", MONTH_PAGE, 1).await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("mon", "200504"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_post(&server, "aaa111", &post_page("hello"), 1).await;
    mount_post(&server, "bbb222", &post_page("world"), 1).await;

    let workdir = TempDir::new().unwrap();
    let config = test_config(&server.uri(), workdir.path(), (3, 4));

    let summary = run_archive(&config).await.unwrap();

    // The failed month is absent and silently shrinks the reference set
    assert_eq!(summary.months.stored, 1);
    assert_eq!(summary.months.failed, 1);
    assert_eq!(summary.refs_discovered, 2);
    assert_eq!(summary.posts.stored, 2);

    let month_store = ContentStore::open(&config.archive.month_dir).unwrap();
    assert!(!month_store.contains("200504"));
}

#[tokio::test]
async fn test_duplicate_references_collapse() {
    let server = MockServer::start().await;
    // Both months reference the same post; it must be fetched once
    mount_month(
        &server,
        "200503",
        r#"<a href="?ts=shared1">[l]</a>"#,
        1,
    )
    .await;
    mount_month(
        &server,
        "200504",
        r#"<a href="?ts=shared1">[l]</a>"#,
        1,
    )
    .await;
    mount_post(&server, "shared1", &post_page("once"), 1).await;

    let workdir = TempDir::new().unwrap();
    let config = test_config(&server.uri(), workdir.path(), (3, 4));

    let summary = run_archive(&config).await.unwrap();

    assert_eq!(summary.refs_discovered, 2);
    assert_eq!(summary.posts.stored, 1);
}
