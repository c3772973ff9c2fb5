use serde::Deserialize;
use std::path::PathBuf;

/// Default endpoint of the URL notification publish API
pub const DEFAULT_INDEXING_ENDPOINT: &str =
    "https://indexing.googleapis.com/v3/urlNotifications:publish";

/// Default endpoint of the site-restricted search lookup
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Main configuration structure for Sitemap-Indexer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub sorting: SortingConfig,
    /// Exact URLs that never get a row in the table
    #[serde(default)]
    pub exclude: Vec<String>,
    pub indexing_api: IndexingApiConfig,
    pub search_api: SearchApiConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Absolute URL of the root sitemap
    pub fn root_sitemap_url(&self) -> String {
        let path = self.site.sitemap_path.trim_start_matches('/');
        format!("{}/{}", self.site.url.trim_end_matches('/'), path)
    }
}

/// The web property being serviced
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Base URL of the site, e.g. "https://site.example"
    pub url: String,

    /// Path of the root sitemap relative to the site URL
    #[serde(default = "default_sitemap_path")]
    pub sitemap_path: String,
}

/// Locations of every file the run reads or writes
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FilesConfig {
    /// Base directory for the table, sitemap archive and history
    #[serde(default = "default_files_dir")]
    pub files_dir: PathBuf,

    /// Directory receiving the raw sitemap documents (default: `<files-dir>/sitemaps`)
    pub sitemap_dir: Option<PathBuf>,

    /// The persisted URL table (default: `<files-dir>/URLs.csv`)
    pub table_file: Option<PathBuf>,

    /// Append-only run log
    #[serde(default = "default_results_log")]
    pub results_log: PathBuf,

    /// SQLite run history (default: `<files-dir>/history.db`)
    pub history_db: Option<PathBuf>,
}

impl FilesConfig {
    pub fn sitemap_dir(&self) -> PathBuf {
        self.sitemap_dir
            .clone()
            .unwrap_or_else(|| self.files_dir.join("sitemaps"))
    }

    pub fn table_file(&self) -> PathBuf {
        self.table_file
            .clone()
            .unwrap_or_else(|| self.files_dir.join("URLs.csv"))
    }

    pub fn history_db(&self) -> PathBuf {
        self.history_db
            .clone()
            .unwrap_or_else(|| self.files_dir.join("history.db"))
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            files_dir: default_files_dir(),
            sitemap_dir: None,
            table_file: None,
            results_log: default_results_log(),
            history_db: None,
        }
    }
}

/// Per-run caps
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LimitsConfig {
    /// Maximum number of index-presence lookups per run
    #[serde(default = "default_max_indexing")]
    pub max_indexing_urls_per_run: usize,

    /// Maximum number of notifications sent per run
    #[serde(default = "default_max_submission")]
    pub max_submission_urls_per_run: usize,

    /// Days before a "Not Indexed" URL is looked up again
    #[serde(default = "default_cooldown_days")]
    pub recheck_cooldown_days: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_indexing_urls_per_run: default_max_indexing(),
            max_submission_urls_per_run: default_max_submission(),
            recheck_cooldown_days: default_cooldown_days(),
        }
    }
}

/// Ordering policy for the reconciled table
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SortingConfig {
    /// Sort each rule partition alphabetically
    #[serde(default)]
    pub alphabetical: bool,

    /// Place newly discovered URLs ahead of existing rows before partitioning
    #[serde(default = "default_true")]
    pub new_urls_first: bool,

    /// Keep URLs that match no rule in a trailing partition instead of dropping them
    #[serde(default = "default_true")]
    pub catch_all: bool,

    /// Ordered classification rules
    #[serde(default)]
    pub rules: Vec<SortingRuleConfig>,
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            alphabetical: false,
            new_urls_first: true,
            catch_all: true,
            rules: Vec::new(),
        }
    }
}

/// One named classification rule
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SortingRuleConfig {
    pub name: String,
    pub kind: RuleKind,
    #[serde(default)]
    pub value: String,
}

/// How a sorting rule matches a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// Matches every URL
    All,
    /// URL starts with the value
    Prefix,
    /// URL path starts with the value
    PathPrefix,
    /// URL contains the value
    Contains,
    /// URL ends with the value
    Suffix,
    /// URL matches a `*` wildcard pattern
    Wildcard,
}

/// URL notification API settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IndexingApiConfig {
    #[serde(default = "default_indexing_endpoint")]
    pub endpoint: String,

    /// Environment variable holding an OAuth access token
    pub access_token_env: Option<String>,

    /// File holding an OAuth access token
    pub access_token_file: Option<PathBuf>,

    /// Re-select rows whose last submission ended in "Error"
    #[serde(default)]
    pub retry_failed: bool,
}

/// Search lookup settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SearchApiConfig {
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,

    pub api_key: Option<String>,

    /// Environment variable holding the API key (used when `api-key` is absent)
    pub api_key_env: Option<String>,

    /// Search engine identifier
    pub engine_id: String,
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

fn default_sitemap_path() -> String {
    "/sitemap.xml".to_string()
}

fn default_files_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_results_log() -> PathBuf {
    PathBuf::from("results.txt")
}

fn default_max_indexing() -> usize {
    100
}

fn default_max_submission() -> usize {
    200
}

fn default_cooldown_days() -> i64 {
    7
}

fn default_true() -> bool {
    true
}

fn default_indexing_endpoint() -> String {
    DEFAULT_INDEXING_ENDPOINT.to_string()
}

fn default_search_endpoint() -> String {
    DEFAULT_SEARCH_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    format!("sitemap-indexer/{}", env!("CARGO_PKG_VERSION"))
}
