//! DocumentRecord: one indexed document's metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Metadata for one indexed document.
///
/// The record's `id` is the document's canonical absolute path and serves as
/// the primary key in the catalog: re-indexing the same canonical path
/// replaces the prior record rather than adding a duplicate.
///
/// `created` and `modified` come from the source file's timestamps;
/// `indexed_at` is when the record was registered or last updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    id: String,
    path: PathBuf,
    filename: String,
    extension: String,
    size: u64,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
    tags: BTreeSet<String>,
    indexed_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Creates a new DocumentRecord with all fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        path: PathBuf,
        filename: impl Into<String>,
        extension: impl Into<String>,
        size: u64,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
        tags: BTreeSet<String>,
        indexed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: path.to_string_lossy().into_owned(),
            path,
            filename: filename.into(),
            extension: extension.into(),
            size,
            created,
            modified,
            tags,
            indexed_at,
        }
    }

    /// Returns the document's id (its canonical absolute path).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the document's canonical path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the document's filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the document's extension, with leading dot (empty when none).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the source file's size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns when the source file was created.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns when the source file was last modified.
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Returns the document's tags.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Returns when the document was registered or last re-indexed.
    pub fn indexed_at(&self) -> DateTime<Utc> {
        self.indexed_at
    }
}
