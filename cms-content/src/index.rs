//! Cross-collection reference index.

use std::collections::{HashMap, HashSet};

use crate::record::ContentRecord;

/// Lookup table answering "does collection C contain a record with id X".
///
/// Built once from the full load pass, before any record is validated, so a
/// reference resolves regardless of load order.
#[derive(Debug, Clone, Default)]
pub struct CollectionIndex {
    ids: HashMap<String, HashSet<String>>,
}

impl CollectionIndex {
    /// Build the index over all loaded records.
    #[must_use]
    pub fn build(records: &[ContentRecord]) -> Self {
        let mut ids: HashMap<String, HashSet<String>> = HashMap::new();
        for record in records {
            ids.entry(record.collection.clone())
                .or_default()
                .insert(record.id.clone());
        }
        Self { ids }
    }

    /// Whether `collection` contains a record with the given id.
    #[must_use]
    pub fn contains(&self, collection: &str, id: &str) -> bool {
        self.ids
            .get(collection)
            .is_some_and(|set| set.contains(id))
    }

    /// Number of records indexed for a collection (0 when absent).
    #[must_use]
    pub fn len_of(&self, collection: &str) -> usize {
        self.ids.get(collection).map_or(0, HashSet::len)
    }
}
