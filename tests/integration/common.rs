//! Shared fixtures for the integration tests

use sitemap_indexer::config::{parse_config, Config};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";
pub const NOTIFY_PATH: &str = "/v3/urlNotifications:publish";
pub const SEARCH_PATH: &str = "/customsearch/v1";

/// Builds a config pointing every endpoint at `server_uri` and every file into `dir`
///
/// `top` is inserted before the first table (top-level keys such as
/// `exclude`), `tables` after the last one.
pub fn test_config(server_uri: &str, dir: &Path, top: &str, tables: &str) -> Config {
    std::fs::write(dir.join("token.txt"), TOKEN).unwrap();

    let content = format!(
        r#"
{top}

[site]
url = "{server_uri}"

[files]
files-dir = '{dir}'
results-log = '{dir}/results.txt'

[indexing-api]
endpoint = "{server_uri}{NOTIFY_PATH}"
access-token-file = '{dir}/token.txt'

[search-api]
endpoint = "{server_uri}{SEARCH_PATH}"
api-key = "test-key"
engine-id = "test-cx"

{tables}
"#,
        dir = dir.display(),
    );

    parse_config(&content).unwrap()
}

pub fn url_set(urls: &[String]) -> String {
    let entries: String = urls
        .iter()
        .map(|u| format!("  <url><loc>{}</loc></url>\n", u))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>",
        entries
    )
}

pub fn sitemap_index(locations: &[String]) -> String {
    let entries: String = locations
        .iter()
        .map(|u| format!("  <sitemap><loc>{}</loc></sitemap>\n", u))
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</sitemapindex>",
        entries
    )
}

/// Serves `body` as XML at `route`, expecting exactly `times` fetches
pub async fn mount_xml(server: &MockServer, route: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .expect(times)
        .mount(server)
        .await;
}
