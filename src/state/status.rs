//! Status value definitions for the URL table
//!
//! Each status is stored in the table as its display text; an unset status
//! is an empty cell.

use std::fmt;

/// Whether a URL was found in the search index at the last check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexingStatus {
    /// At least one search result was returned for the URL
    Indexed,

    /// The lookup returned no results
    NotIndexed,

    /// A legacy error marker; never written by the status verifier
    Error,
}

impl IndexingStatus {
    /// Converts the status to its table cell text
    pub fn as_cell(&self) -> &'static str {
        match self {
            Self::Indexed => "Indexed",
            Self::NotIndexed => "Not Indexed",
            Self::Error => "Error",
        }
    }

    /// Parses a status from table cell text
    ///
    /// Returns None if the text doesn't match any known status.
    pub fn from_cell(s: &str) -> Option<Self> {
        match s {
            "Indexed" => Some(Self::Indexed),
            "Not Indexed" => Some(Self::NotIndexed),
            "Error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for IndexingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cell())
    }
}

/// Outcome of the last notification sent for a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmittingStatus {
    /// The notification API accepted the URL
    Submitted,

    /// The API reported an error or the request failed in transport
    Error,
}

impl SubmittingStatus {
    pub fn as_cell(&self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::Error => "Error",
        }
    }

    pub fn from_cell(s: &str) -> Option<Self> {
        match s {
            "Submitted" => Some(Self::Submitted),
            "Error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for SubmittingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cell())
    }
}
