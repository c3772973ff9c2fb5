//! Clients for the external indexing services
//!
//! This module provides:
//! - The URL notification client (requests (re)indexing, quota-limited)
//! - The search lookup client (checks index presence, quota-limited)
//! - Credential loading for both
//!
//! Both clients sit behind traits so the pipeline can be driven by fakes.

mod credentials;
mod error;
mod indexing;
mod search;

pub use credentials::{load_access_token, resolve_search_key};
pub use error::ApiError;
pub use indexing::{HttpIndexingClient, IndexingApi};
pub use search::{HttpSearchClient, SearchApi};
