//! Persisted catalog schema: the document map and its inverted tag index.

use crate::domain::DocumentRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Current schema version of the persisted index.
pub const SCHEMA_VERSION: u32 = 1;

/// The whole persisted catalog state.
///
/// `documents` maps a document's id (its canonical path) to its record;
/// `tags` is the inverted index derived from `documents[*].tags`, mapping a
/// tag to the set of ids carrying it. Both sides are kept consistent by
/// [`CatalogIndex::upsert`], the only mutation entry point: every id listed
/// under a tag belongs to a document that carries that tag, and a tag whose
/// id set becomes empty is removed rather than left behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogIndex {
    version: u32,
    documents: BTreeMap<String, DocumentRecord>,
    tags: BTreeMap<String, BTreeSet<String>>,
}

impl CatalogIndex {
    /// Creates an empty index at the current schema version.
    pub fn empty() -> Self {
        Self {
            version: SCHEMA_VERSION,
            documents: BTreeMap::new(),
            tags: BTreeMap::new(),
        }
    }

    /// Returns the schema version this index was written with.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns all documents, keyed by id.
    pub fn documents(&self) -> &BTreeMap<String, DocumentRecord> {
        &self.documents
    }

    /// Returns the record for `id`, if indexed.
    pub fn get(&self, id: &str) -> Option<&DocumentRecord> {
        self.documents.get(id)
    }

    /// Returns the ids carrying `tag`, if any document does.
    pub fn ids_for_tag(&self, tag: &str) -> Option<&BTreeSet<String>> {
        self.tags.get(tag)
    }

    /// Returns the inverted tag index.
    pub fn tags(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.tags
    }

    /// Returns the number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true when no documents are indexed.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Inserts or replaces the record for `record.id()`.
    ///
    /// When a prior record exists, its tag set is diffed against the new one
    /// and only the delta is applied to the inverted index: the id is removed
    /// from buckets for dropped tags (deleting buckets that become empty) and
    /// added to buckets for new tags. The cost is proportional to the tag
    /// change, not to catalog size.
    pub fn upsert(&mut self, record: DocumentRecord) {
        let id = record.id().to_string();
        let old_tags = self
            .documents
            .get(&id)
            .map(|prior| prior.tags().clone())
            .unwrap_or_default();
        let new_tags = record.tags().clone();

        for dropped in old_tags.difference(&new_tags) {
            let now_empty = match self.tags.get_mut(dropped) {
                Some(ids) => {
                    ids.remove(&id);
                    ids.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.tags.remove(dropped);
            }
        }

        for added in new_tags.difference(&old_tags) {
            self.tags
                .entry(added.clone())
                .or_default()
                .insert(id.clone());
        }

        self.documents.insert(id, record);
    }

    /// Checks the invariants a well-formed index upholds.
    ///
    /// Verifies bidirectional consistency between `documents[*].tags` and the
    /// inverted index, and that no tag bucket is empty. Returns a description
    /// of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        for (id, record) in &self.documents {
            if record.id() != id {
                return Err(format!(
                    "document keyed '{id}' carries mismatched id '{}'",
                    record.id()
                ));
            }
            for tag in record.tags() {
                if !self.tags.get(tag).is_some_and(|ids| ids.contains(id)) {
                    return Err(format!(
                        "document '{id}' carries tag '{tag}' missing from the tag index"
                    ));
                }
            }
        }

        for (tag, ids) in &self.tags {
            if ids.is_empty() {
                return Err(format!("tag '{tag}' has an empty id set"));
            }
            for id in ids {
                if !self
                    .documents
                    .get(id)
                    .is_some_and(|record| record.tags().contains(tag))
                {
                    return Err(format!(
                        "tag '{tag}' lists '{id}', which does not carry it"
                    ));
                }
            }
        }

        Ok(())
    }
}
