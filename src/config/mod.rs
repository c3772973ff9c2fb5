//! Configuration module for Sitemap-Indexer
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_indexer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("indexer.toml")).unwrap();
//! println!("Root sitemap: {}", config.root_sitemap_url());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FilesConfig, HttpConfig, IndexingApiConfig, LimitsConfig, RuleKind,
    SearchApiConfig, SiteConfig, SortingConfig, SortingRuleConfig, DEFAULT_INDEXING_ENDPOINT,
    DEFAULT_SEARCH_ENDPOINT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
