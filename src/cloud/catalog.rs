use serde::Serialize;
use std::collections::HashMap;

use super::ImageRecord;

/// Resolved, immutable view of one manifest for one host and backend.
///
/// `index` maps every version id and alias to a position in `records`. When
/// two records claim the same key the later one wins.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    updated_at: String,
    records: Vec<ImageRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub(crate) fn new(updated_at: String, records: Vec<ImageRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            index.insert(record.version_id.clone(), position);
            for alias in &record.aliases {
                index.insert(alias.clone(), position);
            }
        }

        Self {
            updated_at,
            records,
            index,
        }
    }

    /// Find a record by version id or alias.
    pub fn lookup(&self, key: &str) -> Option<&ImageRecord> {
        self.index.get(key).and_then(|&position| self.records.get(position))
    }

    /// The manifest's own `updated` stamp, as published.
    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    /// Records in resolution order: products, then versions, each sorted by key.
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    /// Every lookup key, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.index.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
