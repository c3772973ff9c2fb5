//! Sitemap crawl tests

use crate::common::{mount_xml, sitemap_index, test_config, url_set};
use sitemap_indexer::crawler::{build_http_client, crawl_sitemaps};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_cyclic_sitemap_index_terminates() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    // Root lists itself and a nested index; the nested index points back at root
    mount_xml(
        &server,
        "/sitemap.xml",
        sitemap_index(&[
            format!("{}/sitemap.xml", base),
            format!("{}/nested.xml", base),
        ]),
        1,
    )
    .await;
    mount_xml(
        &server,
        "/nested.xml",
        sitemap_index(&[
            format!("{}/sitemap.xml", base),
            format!("{}/posts.xml", base),
        ]),
        1,
    )
    .await;
    mount_xml(
        &server,
        "/posts.xml",
        url_set(&[format!("{}/post-1", base), format!("{}/post-2", base)]),
        1,
    )
    .await;

    let config = test_config(&base, dir.path(), "", "");
    let client = build_http_client(&config.http).unwrap();
    let outcome = crawl_sitemaps(&client, &config).await;

    assert_eq!(
        outcome.urls,
        vec![format!("{}/post-1", base), format!("{}/post-2", base)]
    );
    assert_eq!(outcome.sitemaps_processed, 3);
    assert_eq!(outcome.sitemaps_failed, 0);
}

#[tokio::test]
async fn test_duplicate_urls_across_sitemaps_kept_once() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    mount_xml(
        &server,
        "/sitemap.xml",
        sitemap_index(&[format!("{}/a.xml", base), format!("{}/b.xml", base)]),
        1,
    )
    .await;
    mount_xml(
        &server,
        "/a.xml",
        url_set(&[format!("{}/one", base), format!("{}/shared", base)]),
        1,
    )
    .await;
    mount_xml(
        &server,
        "/b.xml",
        url_set(&[format!("{}/shared", base), format!("{}/two", base)]),
        1,
    )
    .await;

    let config = test_config(&base, dir.path(), "", "");
    let client = build_http_client(&config.http).unwrap();
    let outcome = crawl_sitemaps(&client, &config).await;

    assert_eq!(
        outcome.urls,
        vec![
            format!("{}/one", base),
            format!("{}/shared", base),
            format!("{}/two", base)
        ]
    );
}

#[tokio::test]
async fn test_excluded_url_not_collected() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    mount_xml(
        &server,
        "/sitemap.xml",
        url_set(&[format!("{}/public", base), format!("{}/private", base)]),
        1,
    )
    .await;

    let top = format!(r#"exclude = ["{}/private"]"#, base);
    let config = test_config(&base, dir.path(), &top, "");
    let client = build_http_client(&config.http).unwrap();
    let outcome = crawl_sitemaps(&client, &config).await;

    assert_eq!(outcome.urls, vec![format!("{}/public", base)]);
    assert_eq!(outcome.excluded, 1);
}

#[tokio::test]
async fn test_exclusions_match_crawled_spelling() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    mount_xml(
        &server,
        "/sitemap.xml",
        url_set(&[
            base.clone(),
            format!("{}/café", base),
            format!("{}/ok", base),
        ]),
        1,
    )
    .await;

    let top = format!(r#"exclude = ["{base}", "{base}/café"]"#);
    let config = test_config(&base, dir.path(), &top, "");
    let client = build_http_client(&config.http).unwrap();
    let outcome = crawl_sitemaps(&client, &config).await;

    assert_eq!(outcome.urls, vec![format!("{}/ok", base)]);
    assert_eq!(outcome.excluded, 2);
}

#[tokio::test]
async fn test_failed_child_sitemap_is_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    mount_xml(
        &server,
        "/sitemap.xml",
        sitemap_index(&[format!("{}/gone.xml", base), format!("{}/ok.xml", base)]),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/gone.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_xml(&server, "/ok.xml", url_set(&[format!("{}/page", base)]), 1).await;

    let config = test_config(&base, dir.path(), "", "");
    let client = build_http_client(&config.http).unwrap();
    let outcome = crawl_sitemaps(&client, &config).await;

    assert_eq!(outcome.urls, vec![format!("{}/page", base)]);
    assert_eq!(outcome.sitemaps_processed, 2);
    assert_eq!(outcome.sitemaps_failed, 1);
}

#[tokio::test]
async fn test_unreachable_root_yields_empty_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config(&base, dir.path(), "", "");
    let client = build_http_client(&config.http).unwrap();
    let outcome = crawl_sitemaps(&client, &config).await;

    assert!(outcome.urls.is_empty());
    assert_eq!(outcome.sitemaps_failed, 1);
}

#[tokio::test]
async fn test_fetched_sitemaps_are_archived() {
    let server = MockServer::start().await;
    let base = server.uri();
    let dir = TempDir::new().unwrap();

    let posts = url_set(&[format!("{}/post", base)]);
    mount_xml(
        &server,
        "/sitemap.xml",
        sitemap_index(&[format!("{}/maps/posts.xml", base)]),
        1,
    )
    .await;
    mount_xml(&server, "/maps/posts.xml", posts.clone(), 1).await;

    let config = test_config(&base, dir.path(), "", "");
    let client = build_http_client(&config.http).unwrap();
    crawl_sitemaps(&client, &config).await;

    let archive = dir.path().join("sitemaps");
    assert!(archive.join("sitemap.xml").exists());
    assert_eq!(
        std::fs::read_to_string(archive.join("posts.xml")).unwrap(),
        posts
    );
}
