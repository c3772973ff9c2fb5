use crate::state::{IndexingStatus, SubmittingStatus};
use chrono::NaiveDate;

/// One row of the URL table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    /// Canonical absolute URL; the table key (exact, case-sensitive)
    pub url: String,

    pub indexing_status: Option<IndexingStatus>,

    /// Day of the last index-presence observation
    pub date_of_index: Option<NaiveDate>,

    pub submitting_status: Option<SubmittingStatus>,

    /// Timestamp of the last submission outcome, kept verbatim
    pub date_of_submitting: Option<String>,

    /// Cell text that could not be interpreted, written back unchanged
    pub unrecognized: UnrecognizedCells,
}

/// Table cells whose text is not a known status or date
///
/// A row carrying an unrecognized status is left alone by both stages
/// until a new observation overwrites the cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnrecognizedCells {
    pub indexing_status: Option<String>,
    pub date_of_index: Option<String>,
    pub submitting_status: Option<String>,
}

impl UnrecognizedCells {
    pub fn is_empty(&self) -> bool {
        self.indexing_status.is_none()
            && self.date_of_index.is_none()
            && self.submitting_status.is_none()
    }
}

impl UrlRecord {
    /// A freshly discovered URL with every status field unset
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            indexing_status: None,
            date_of_index: None,
            submitting_status: None,
            date_of_submitting: None,
            unrecognized: UnrecognizedCells::default(),
        }
    }

    /// Eligible for a notification: never submitted (or failed, when retrying
    /// failures) and not known to be indexed
    pub fn is_submission_candidate(&self, retry_failed: bool) -> bool {
        if self.unrecognized.indexing_status.is_some()
            || self.unrecognized.submitting_status.is_some()
        {
            return false;
        }

        let index_ok = matches!(
            self.indexing_status,
            None | Some(IndexingStatus::NotIndexed)
        );
        let submit_ok = match self.submitting_status {
            None => true,
            Some(SubmittingStatus::Error) => retry_failed,
            Some(SubmittingStatus::Submitted) => false,
        };
        index_ok && submit_ok
    }

    /// Eligible for an index-presence lookup on `today`
    ///
    /// Unchecked URLs are always due. "Not Indexed" URLs are due once their
    /// last check is older than the cooldown; a missing or unreadable date
    /// counts as stale. A cooldown reaching before the earliest
    /// representable date is never over.
    pub fn is_verification_due(&self, today: NaiveDate, cooldown_days: i64) -> bool {
        if self.unrecognized.indexing_status.is_some() {
            return false;
        }

        match self.indexing_status {
            None => true,
            Some(IndexingStatus::NotIndexed) => match self.date_of_index {
                Some(checked) => chrono::Duration::try_days(cooldown_days)
                    .and_then(|cooldown| today.checked_sub_signed(cooldown))
                    .is_some_and(|due_after| checked < due_after),
                None => true,
            },
            Some(IndexingStatus::Indexed) | Some(IndexingStatus::Error) => false,
        }
    }

    pub fn mark_submitted(&mut self, at: String) {
        self.submitting_status = Some(SubmittingStatus::Submitted);
        self.date_of_submitting = Some(at);
        self.unrecognized.submitting_status = None;
    }

    pub fn mark_submit_error(&mut self, at: String) {
        self.submitting_status = Some(SubmittingStatus::Error);
        self.date_of_submitting = Some(at);
        self.unrecognized.submitting_status = None;
    }

    pub fn mark_indexed(&mut self, on: NaiveDate, indexed: bool) {
        self.indexing_status = Some(if indexed {
            IndexingStatus::Indexed
        } else {
            IndexingStatus::NotIndexed
        });
        self.date_of_index = Some(on);
        self.unrecognized.indexing_status = None;
        self.unrecognized.date_of_index = None;
    }

    /// Forgets the indexing observation so the URL is checked again
    pub fn clear_indexing(&mut self) {
        self.indexing_status = None;
        self.date_of_index = None;
        self.unrecognized.indexing_status = None;
        self.unrecognized.date_of_index = None;
    }
}
