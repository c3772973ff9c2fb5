//! CSV implementation of the URL table
//!
//! The file has five columns (`URL`, `Indexing Status`, `Date of Index`,
//! `Submitting Status`, `Date of Submitting`) and can be edited in any
//! spreadsheet tool. Blank cells mean "unset" and are written back as
//! empty strings.

use crate::state::{IndexingStatus, SubmittingStatus, UrlRecord};
use crate::storage::traits::{StorageError, StorageResult, TableStore};
use crate::storage::UrlTable;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};

pub const COL_URL: &str = "URL";
pub const COL_INDEXING_STATUS: &str = "Indexing Status";
pub const COL_DATE_OF_INDEX: &str = "Date of Index";
pub const COL_SUBMITTING_STATUS: &str = "Submitting Status";
pub const COL_DATE_OF_SUBMITTING: &str = "Date of Submitting";

/// Column headers in file order
pub const COLUMNS: [&str; 5] = [
    COL_URL,
    COL_INDEXING_STATUS,
    COL_DATE_OF_INDEX,
    COL_SUBMITTING_STATUS,
    COL_DATE_OF_SUBMITTING,
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV file backend for the URL table
#[derive(Debug, Clone)]
pub struct CsvTableStore {
    path: PathBuf,
}

impl CsvTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TableStore for CsvTableStore {
    fn load(&self) -> StorageResult<UrlTable> {
        if !self.path.exists() {
            tracing::info!(
                "No URL table at {}, starting with an empty table",
                self.path.display()
            );
            return Ok(UrlTable::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let positions = ColumnPositions::from_headers(reader.headers()?)?;

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row?;
            // Header is line 1
            let row_number = i + 2;
            if let Some(record) = positions.parse_row(&row, row_number) {
                records.push(record);
            }
        }

        tracing::debug!("Loaded {} rows from {}", records.len(), self.path.display());
        Ok(UrlTable::from_records(records))
    }

    fn save(&self, table: &UrlTable) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Written beside the target, then renamed over it
        let temp = self.temp_path();
        {
            let mut writer = WriterBuilder::new().from_path(&temp)?;
            writer.write_record(COLUMNS)?;
            for record in table.iter() {
                let raw = &record.unrecognized;
                let date_of_index = match record.date_of_index {
                    Some(day) => day.format(DATE_FORMAT).to_string(),
                    None => raw.date_of_index.clone().unwrap_or_default(),
                };
                writer.write_record([
                    record.url.as_str(),
                    record
                        .indexing_status
                        .map(|s| s.as_cell())
                        .or(raw.indexing_status.as_deref())
                        .unwrap_or(""),
                    date_of_index.as_str(),
                    record
                        .submitting_status
                        .map(|s| s.as_cell())
                        .or(raw.submitting_status.as_deref())
                        .unwrap_or(""),
                    record.date_of_submitting.as_deref().unwrap_or(""),
                ])?;
            }
            writer.flush()?;
        }
        fs::rename(&temp, &self.path)?;

        tracing::debug!("Saved {} rows to {}", table.len(), self.path.display());
        Ok(())
    }
}

/// Index of each required column in the header row
struct ColumnPositions {
    url: usize,
    indexing_status: usize,
    date_of_index: usize,
    submitting_status: usize,
    date_of_submitting: usize,
}

impl ColumnPositions {
    fn from_headers(headers: &StringRecord) -> StorageResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| StorageError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            url: find(COL_URL)?,
            indexing_status: find(COL_INDEXING_STATUS)?,
            date_of_index: find(COL_DATE_OF_INDEX)?,
            submitting_status: find(COL_SUBMITTING_STATUS)?,
            date_of_submitting: find(COL_DATE_OF_SUBMITTING)?,
        })
    }

    /// Parses one row; rows with an empty URL cell are skipped
    ///
    /// Cell text that is not a known status or date is kept verbatim in
    /// `UrlRecord::unrecognized` and logged.
    fn parse_row(&self, row: &StringRecord, row_number: usize) -> Option<UrlRecord> {
        let cell = |i: usize| row.get(i).map(str::trim).unwrap_or("");

        let url = cell(self.url);
        if url.is_empty() {
            return None;
        }

        let mut record = UrlRecord::new(url);

        match cell(self.indexing_status) {
            "" => {}
            text => match IndexingStatus::from_cell(text) {
                Some(status) => record.indexing_status = Some(status),
                None => {
                    warn_unrecognized(row_number, COL_INDEXING_STATUS, text);
                    record.unrecognized.indexing_status = Some(text.to_string());
                }
            },
        }

        match cell(self.date_of_index) {
            "" => {}
            text => match parse_index_date(text) {
                Some(day) => record.date_of_index = Some(day),
                None => {
                    warn_unrecognized(row_number, COL_DATE_OF_INDEX, text);
                    record.unrecognized.date_of_index = Some(text.to_string());
                }
            },
        }

        match cell(self.submitting_status) {
            "" => {}
            text => match SubmittingStatus::from_cell(text) {
                Some(status) => record.submitting_status = Some(status),
                None => {
                    warn_unrecognized(row_number, COL_SUBMITTING_STATUS, text);
                    record.unrecognized.submitting_status = Some(text.to_string());
                }
            },
        }

        match cell(self.date_of_submitting) {
            "" => {}
            text => record.date_of_submitting = Some(text.to_string()),
        }

        Some(record)
    }
}

fn warn_unrecognized(row_number: usize, column: &str, text: &str) {
    tracing::warn!(
        "Row {}: unrecognized {} {:?}, kept as-is",
        row_number,
        column,
        text
    );
}

/// Accepts a plain date or a date followed by a time part
fn parse_index_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .or_else(|| {
            let day = text.split(|c| c == ' ' || c == 'T').next()?;
            NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
        })
}
