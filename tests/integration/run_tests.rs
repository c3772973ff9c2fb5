//! End-to-end run tests
//!
//! Each test serves a sitemap and both external services from one mock
//! server and checks the persisted table, the results log and the run
//! history afterwards.

use crate::common::{mount_xml, test_config, url_set, NOTIFY_PATH, SEARCH_PATH};
use serde_json::json;
use sitemap_indexer::storage::{CsvTableStore, RunHistory, RunStatus, TableStore};
use sitemap_indexer::{run, IndexingStatus, RunOptions, RunResult, SubmittingStatus};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn table_at(dir: &Path) -> CsvTableStore {
    CsvTableStore::new(dir.join("URLs.csv"))
}

async fn mount_notifications_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(NOTIFY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "urlNotificationMetadata": {}
        })))
        .mount(server)
        .await;
}

async fn mount_search_indexed(server: &MockServer, url: &str) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("q", format!("site:{}", url)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "link": url }]
        })))
        .mount(server)
        .await;
}

async fn mount_search_empty(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;
}

fn options() -> RunOptions {
    RunOptions {
        config_hash: "test-hash".to_string(),
        ..RunOptions::default()
    }
}

#[tokio::test]
async fn test_full_run_updates_table_log_and_history() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    let pages: Vec<String> = ["a", "b", "c"]
        .iter()
        .map(|p| format!("{}/{}", base, p))
        .collect();
    mount_xml(&server, "/sitemap.xml", url_set(&pages), 1).await;
    mount_notifications_ok(&server).await;
    mount_search_indexed(&server, &pages[0]).await;
    mount_search_empty(&server).await;

    let config = test_config(&base, dir.path(), "", "");
    let result = run(&config, &options()).await.unwrap();

    assert_eq!(
        result,
        RunResult {
            urls_added: 3,
            newly_indexed: 1,
            newly_not_indexed: 2,
            newly_submitted: 3,
            indexing_quota_exceeded: false,
            submission_quota_exceeded: false,
        }
    );

    let table = table_at(dir.path()).load().unwrap();
    assert_eq!(table.urls(), pages);
    for record in table.iter() {
        assert_eq!(record.submitting_status, Some(SubmittingStatus::Submitted));
        assert!(record.date_of_submitting.is_some());
        assert!(record.date_of_index.is_some());
    }
    assert_eq!(
        table.get(&pages[0]).unwrap().indexing_status,
        Some(IndexingStatus::Indexed)
    );
    assert_eq!(
        table.get(&pages[1]).unwrap().indexing_status,
        Some(IndexingStatus::NotIndexed)
    );

    let log = std::fs::read_to_string(dir.path().join("results.txt")).unwrap();
    assert!(log.starts_with("It's done ("));
    assert!(log.contains("1. URLs added from sitemap\n   now = 3\n   overall = 3\n"));
    assert!(log.contains("2. URLs indexed\n   now = 1\n   overall = 1\n"));
    assert!(log.contains("3. URLs NOT indexed\n   now = 2\n   overall = 2\n"));
    assert!(log.contains("4. URLs submitted\n   now = 3\n   overall = 3\n"));
    assert!(log.ends_with("\n\n"));
    assert!(!log.contains("Quota exceeded"));

    let history = RunHistory::open(&dir.path().join("history.db")).unwrap();
    let runs = history.recent_runs(10).unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].status, RunStatus::Completed);
    assert_eq!(runs[0].config_hash, "test-hash");
    assert_eq!(runs[0].result, result);
}

#[tokio::test]
async fn test_submission_quota_stops_batch() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    let pages: Vec<String> = (1..=4).map(|i| format!("{}/p{}", base, i)).collect();
    mount_xml(&server, "/sitemap.xml", url_set(&pages), 1).await;

    Mock::given(method("POST"))
        .and(path(NOTIFY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(NOTIFY_PATH))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(
        &base,
        dir.path(),
        "",
        "[limits]\nmax-submission-urls-per-run = 3",
    );
    let result = run(
        &config,
        &RunOptions {
            skip_verify: true,
            ..options()
        },
    )
    .await
    .unwrap();

    assert_eq!(result.newly_submitted, 2);
    assert!(result.submission_quota_exceeded);

    let table = table_at(dir.path()).load().unwrap();
    let statuses: Vec<Option<SubmittingStatus>> =
        table.iter().map(|r| r.submitting_status).collect();
    assert_eq!(
        statuses,
        vec![
            Some(SubmittingStatus::Submitted),
            Some(SubmittingStatus::Submitted),
            None,
            None
        ]
    );

    let log = std::fs::read_to_string(dir.path().join("results.txt")).unwrap();
    assert!(log.contains("Google Quota exceeded for Submitting (Index API)"));
    assert!(!log.contains("Google Quota exceeded for Indexing (Search API)"));
}

#[tokio::test]
async fn test_rerun_keeps_statuses() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    let pages = vec![format!("{}/a", base), format!("{}/b", base)];
    mount_xml(&server, "/sitemap.xml", url_set(&pages), 2).await;
    mount_notifications_ok(&server).await;

    let config = test_config(&base, dir.path(), "", "");
    let submit_only = RunOptions {
        skip_verify: true,
        ..options()
    };

    let first = run(&config, &submit_only).await.unwrap();
    assert_eq!(first.urls_added, 2);
    let after_first = table_at(dir.path()).load().unwrap();

    let second = run(
        &config,
        &RunOptions {
            skip_submit: true,
            ..submit_only
        },
    )
    .await
    .unwrap();
    assert_eq!(second, RunResult::default());

    let after_second = table_at(dir.path()).load().unwrap();
    assert_eq!(after_first.records(), after_second.records());

    let log = std::fs::read_to_string(dir.path().join("results.txt")).unwrap();
    assert_eq!(log.matches("It's done (").count(), 2);
}

#[tokio::test]
async fn test_prioritized_url_is_submitted_first() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    mount_xml(&server, "/sitemap.xml", url_set(&[format!("{}/a", base)]), 1).await;
    Mock::given(method("POST"))
        .and(path(NOTIFY_PATH))
        .and(body_json(json!({
            "url": format!("{}/landing", base),
            "type": "URL_UPDATED"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    mount_notifications_ok(&server).await;

    let config = test_config(&base, dir.path(), "", "");
    let result = run(
        &config,
        &RunOptions {
            prioritized: vec![format!("{}/landing", base)],
            skip_verify: true,
            ..options()
        },
    )
    .await
    .unwrap();

    assert_eq!(result.newly_submitted, 2);
    let table = table_at(dir.path()).load().unwrap();
    assert_eq!(table.len(), 1);
    assert!(!table.contains(&format!("{}/landing", base)));
}

#[tokio::test]
async fn test_unrecognized_cells_are_left_untouched() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    let edited = format!("{}/a", base);
    let fresh = format!("{}/b", base);
    mount_xml(&server, "/sitemap.xml", url_set(&[edited.clone(), fresh.clone()]), 1).await;
    Mock::given(method("POST"))
        .and(path(NOTIFY_PATH))
        .and(body_json(json!({ "url": fresh, "type": "URL_UPDATED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "urlNotificationMetadata": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    std::fs::write(
        dir.path().join("URLs.csv"),
        format!(
            "URL,Indexing Status,Date of Index,Submitting Status,Date of Submitting\n\
             {},Maybe,last week,pending,\n",
            edited
        ),
    )
    .unwrap();

    let config = test_config(&base, dir.path(), "", "");
    let result = run(
        &config,
        &RunOptions {
            skip_verify: true,
            ..options()
        },
    )
    .await
    .unwrap();

    assert_eq!(result.urls_added, 1);
    assert_eq!(result.newly_submitted, 1);

    let table = table_at(dir.path()).load().unwrap();
    let record = table.get(&edited).unwrap();
    assert_eq!(record.indexing_status, None);
    assert_eq!(record.submitting_status, None);
    assert_eq!(record.unrecognized.indexing_status.as_deref(), Some("Maybe"));
    assert_eq!(record.unrecognized.date_of_index.as_deref(), Some("last week"));
    assert_eq!(record.unrecognized.submitting_status.as_deref(), Some("pending"));

    let csv = std::fs::read_to_string(dir.path().join("URLs.csv")).unwrap();
    assert!(csv.contains(&format!("{},Maybe,last week,pending,\n", edited)));
}

#[tokio::test]
async fn test_table_missing_column_fails_run() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    mount_xml(&server, "/sitemap.xml", url_set(&[format!("{}/a", base)]), 1).await;
    std::fs::write(
        dir.path().join("URLs.csv"),
        "URL,Indexing Status\nhttps://x.example/,Indexed\n",
    )
    .unwrap();

    let config = test_config(&base, dir.path(), "", "");
    let result = run(
        &config,
        &RunOptions {
            skip_submit: true,
            skip_verify: true,
            ..options()
        },
    )
    .await;

    assert!(result.is_err());
    assert!(!dir.path().join("results.txt").exists());

    let history = RunHistory::open(&dir.path().join("history.db")).unwrap();
    let runs = history.recent_runs(1).unwrap();
    assert_eq!(runs[0].status, RunStatus::Failed);
    assert!(runs[0]
        .error_message
        .as_deref()
        .is_some_and(|m| m.contains("Date of Index")));
}

#[tokio::test]
async fn test_missing_token_fails_before_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    // The sitemap must not be fetched
    mount_xml(&server, "/sitemap.xml", url_set(&[]), 0).await;

    let config = test_config(&base, dir.path(), "", "");
    std::fs::remove_file(dir.path().join("token.txt")).unwrap();

    let result = run(&config, &options()).await;
    assert!(matches!(
        result,
        Err(sitemap_indexer::IndexerError::Credential(_))
    ));
}
