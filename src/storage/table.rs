use crate::state::UrlRecord;
use std::collections::HashMap;

/// The in-memory URL table: records in persisted order, keyed by URL
///
/// URLs are unique. Inserting a URL that is already present is a no-op.
#[derive(Debug, Clone, Default)]
pub struct UrlTable {
    records: Vec<UrlRecord>,
    index: HashMap<String, usize>,
}

impl UrlTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from records, keeping the first row for any repeated URL
    pub fn from_records(records: impl IntoIterator<Item = UrlRecord>) -> Self {
        let mut table = Self::new();
        for record in records {
            if table.contains(&record.url) {
                tracing::warn!("Dropping duplicate row for {}", record.url);
                continue;
            }
            table.insert(record);
        }
        table
    }

    /// Appends a record; returns false if its URL is already present
    pub fn insert(&mut self, record: UrlRecord) -> bool {
        if self.index.contains_key(&record.url) {
            return false;
        }
        self.index.insert(record.url.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, url: &str) -> Option<&UrlRecord> {
        self.index.get(url).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, url: &str) -> Option<&mut UrlRecord> {
        match self.index.get(url) {
            Some(&i) => Some(&mut self.records[i]),
            None => None,
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UrlRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[UrlRecord] {
        &self.records
    }

    /// URLs in table order
    pub fn urls(&self) -> Vec<String> {
        self.records.iter().map(|r| r.url.clone()).collect()
    }
}
