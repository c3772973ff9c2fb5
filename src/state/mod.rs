//! State module for per-URL tracking
//!
//! # Components
//!
//! - `IndexingStatus`: whether a URL was last seen in the search index
//! - `SubmittingStatus`: outcome of the last notification for a URL
//! - `UrlRecord`: one row of the persisted URL table

mod record;
mod status;

// Re-export main types
pub use record::{UnrecognizedCells, UrlRecord};
pub use status::{IndexingStatus, SubmittingStatus};
