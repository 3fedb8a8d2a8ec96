//! DocumentCatalog: business rules over the persisted index.

use crate::domain::DocumentRecord;
use crate::error::{CatalogError, CatalogResult};
use crate::index::{CatalogIndex, IndexStore};
use crate::infra::read_text;
use crate::notes::NoteBuilder;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

/// Name of the index file inside the index directory.
const INDEX_FILENAME: &str = "catalog.json";

/// The document catalog: registration, search, metadata lookup, and notes.
///
/// The catalog owns the in-memory [`CatalogIndex`] exclusively, behind a
/// `RwLock`. Mutating operations hold the write lock across the whole
/// read-modify-persist sequence and publish the modified index only after a
/// successful save, so a failed persist never leaves memory and disk
/// disagreeing. Read operations share the read lock and observe the index
/// either fully before or fully after any mutation.
#[derive(Debug)]
pub struct DocumentCatalog {
    store: IndexStore,
    notes: NoteBuilder,
    index: RwLock<CatalogIndex>,
}

impl DocumentCatalog {
    /// Opens the catalog over a documents directory and an index directory.
    ///
    /// Both directories are created on demand; the index is loaded once here.
    ///
    /// # Errors
    ///
    /// Fails with `IndexCorrupt`/`IndexVersion` when the persisted index is
    /// unusable, or `Io` when a directory cannot be created.
    pub fn open(
        documents_dir: impl Into<PathBuf>,
        index_dir: impl Into<PathBuf>,
    ) -> CatalogResult<Self> {
        let documents_dir = documents_dir.into();
        let index_dir = index_dir.into();

        for dir in [&documents_dir, &index_dir] {
            std::fs::create_dir_all(dir).map_err(|e| CatalogError::Io {
                path: dir.clone(),
                source: e,
            })?;
        }

        let store = IndexStore::new(index_dir.join(INDEX_FILENAME));
        let index = store.load()?;
        debug!(documents = index.len(), "catalog opened");

        Ok(Self {
            store,
            notes: NoteBuilder::new(documents_dir),
            index: RwLock::new(index),
        })
    }

    /// Returns the directory new notes are written to.
    pub fn documents_dir(&self) -> &Path {
        self.notes.documents_dir()
    }

    /// Returns the path of the persisted index file.
    pub fn index_path(&self) -> &Path {
        self.store.path()
    }

    /// Registers (or re-registers) a document and returns its id.
    ///
    /// The path is resolved to its canonical absolute form, which becomes the
    /// id; indexing the same canonical path again replaces the prior record,
    /// applying only the tag delta to the inverted index.
    ///
    /// # Errors
    ///
    /// `DocumentNotFound` when the target is absent, unreadable, or not a
    /// regular file; `DocumentFormat` when its content does not decode as
    /// text; `Io` when persisting the updated index fails (in which case the
    /// in-memory catalog is unchanged).
    pub fn index_document(&self, path: &Path, tags: &[String]) -> CatalogResult<String> {
        let record = self.inspect(path, tags)?;
        let id = record.id().to_string();

        let mut guard = self.index.write().unwrap_or_else(PoisonError::into_inner);
        // Mutate a working copy and publish only after the save succeeds, so
        // a failed persist leaves the in-memory index untouched.
        let mut next = (*guard).clone();
        next.upsert(record);
        self.store.save(&next)?;
        *guard = next;

        info!(id = %id, "indexed document");
        Ok(id)
    }

    /// Searches the catalog.
    ///
    /// When `tags` is non-empty the candidates are the intersection of the
    /// exact tag buckets (AND semantics); a tag absent from the index empties
    /// the candidate set. A blank query matches every candidate; otherwise a
    /// candidate matches when the lower-cased query is a substring of the
    /// lower-cased filename or equals one of its tags case-insensitively.
    /// Results are ordered by `indexed_at` descending, ties by id ascending,
    /// and truncated to `limit`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `limit` is not positive.
    pub fn search_documents(
        &self,
        query: &str,
        tags: &[String],
        limit: i64,
    ) -> CatalogResult<Vec<DocumentRecord>> {
        if limit <= 0 {
            return Err(CatalogError::InvalidArgument(format!(
                "limit must be positive, got {limit}"
            )));
        }

        let guard = self.index.read().unwrap_or_else(PoisonError::into_inner);

        let candidates: Option<BTreeSet<String>> = if tags.is_empty() {
            None
        } else {
            let mut ids: Option<BTreeSet<String>> = None;
            for tag in tags {
                let bucket = guard.ids_for_tag(tag).cloned().unwrap_or_default();
                ids = Some(match ids {
                    None => bucket,
                    Some(acc) => acc.intersection(&bucket).cloned().collect(),
                });
                if ids.as_ref().is_some_and(|set| set.is_empty()) {
                    break;
                }
            }
            ids
        };

        let pool: Vec<&DocumentRecord> = match &candidates {
            None => guard.documents().values().collect(),
            Some(ids) => ids.iter().filter_map(|id| guard.get(id)).collect(),
        };

        let needle = query.trim().to_lowercase();
        let mut results: Vec<&DocumentRecord> = pool
            .into_iter()
            .filter(|record| needle.is_empty() || Self::matches(record, &needle))
            .collect();

        results.sort_by(|a, b| {
            b.indexed_at()
                .cmp(&a.indexed_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        results.truncate(limit as usize);

        debug!(query, results = results.len(), "search completed");
        Ok(results.into_iter().cloned().collect())
    }

    /// Returns the stored record for an indexed document.
    ///
    /// This is a pure lookup: it never re-indexes and never mutates the
    /// catalog, unlike [`DocumentCatalog::index_document`].
    ///
    /// # Errors
    ///
    /// `DocumentNotFound` when the path does not resolve or has never been
    /// indexed.
    pub fn extract_metadata(&self, path: &Path) -> CatalogResult<DocumentRecord> {
        let canonical = std::fs::canonicalize(path).map_err(|_| CatalogError::DocumentNotFound {
            path: path.to_path_buf(),
        })?;
        let id = canonical.to_string_lossy().into_owned();

        let guard = self.index.read().unwrap_or_else(PoisonError::into_inner);
        guard
            .get(&id)
            .cloned()
            .ok_or(CatalogError::DocumentNotFound { path: canonical })
    }

    /// Creates a note file and registers it, returning the note's path.
    ///
    /// # Errors
    ///
    /// `NoteWrite` when the file cannot be persisted; the note is not
    /// registered in that case. Registration failures propagate as for
    /// [`DocumentCatalog::index_document`].
    pub fn create_note(
        &self,
        title: &str,
        content: &str,
        tags: &[String],
    ) -> CatalogResult<PathBuf> {
        let path = self.notes.write(title, content, tags)?;
        self.index_document(&path, tags)?;
        info!(path = %path.display(), "created note");
        Ok(path)
    }

    fn matches(record: &DocumentRecord, needle: &str) -> bool {
        record.filename().to_lowercase().contains(needle)
            || record.tags().iter().any(|tag| tag.to_lowercase() == needle)
    }

    /// Resolves and stats a document, producing the record to register.
    fn inspect(&self, path: &Path, tags: &[String]) -> CatalogResult<DocumentRecord> {
        let not_found = || CatalogError::DocumentNotFound {
            path: path.to_path_buf(),
        };

        let canonical = std::fs::canonicalize(path).map_err(|_| not_found())?;
        let metadata = std::fs::metadata(&canonical).map_err(|_| not_found())?;
        if !metadata.is_file() {
            return Err(not_found());
        }

        let extension = canonical
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let bytes = std::fs::read(&canonical).map_err(|_| not_found())?;
        read_text(bytes).map_err(|e| CatalogError::DocumentFormat {
            path: canonical.clone(),
            extension: extension.clone(),
            reason: e.to_string(),
        })?;

        let modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .map_err(|e| CatalogError::Io {
                path: canonical.clone(),
                source: e,
            })?;
        // Not every filesystem reports a birth time.
        let created = metadata
            .created()
            .map(DateTime::<Utc>::from)
            .unwrap_or(modified);

        let filename = canonical
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(DocumentRecord::new(
            canonical,
            filename,
            extension,
            metadata.len(),
            created,
            modified,
            tags.iter().cloned().collect(),
            Utc::now(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tempfile::{TempDir, tempdir};

    fn open_catalog(dir: &TempDir) -> DocumentCatalog {
        DocumentCatalog::open(dir.path().join("documents"), dir.path().join("index")).unwrap()
    }

    fn write_doc(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn index_then_extract_round_trips() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        let path = write_doc(&dir, "report.md", "quarterly numbers");

        let id = catalog.index_document(&path, &tags(&["work"])).unwrap();
        let record = catalog.extract_metadata(&path).unwrap();

        assert_eq!(record.id(), id);
        assert_eq!(record.filename(), "report.md");
        assert_eq!(record.extension(), ".md");
        assert_eq!(record.size(), "quarterly numbers".len() as u64);
        assert_eq!(record.tags(), &BTreeSet::from(["work".to_string()]));
    }

    #[test]
    fn index_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);

        let err = catalog
            .index_document(&dir.path().join("ghost.md"), &[])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DocumentNotFound { .. }), "{err}");
    }

    #[test]
    fn index_directory_is_not_found() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);

        let err = catalog.index_document(dir.path(), &[]).unwrap_err();
        assert!(matches!(err, CatalogError::DocumentNotFound { .. }), "{err}");
    }

    #[test]
    fn index_undecodable_file_is_a_format_error_naming_the_extension() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        let path = dir.path().join("image.png");
        std::fs::write(&path, [0x89, 0x50, 0x4E, 0x47, 0xFF, 0xC0]).unwrap();

        let err = catalog.index_document(&path, &[]).unwrap_err();
        match err {
            CatalogError::DocumentFormat { extension, .. } => assert_eq!(extension, ".png"),
            other => panic!("expected DocumentFormat, got {other}"),
        }
    }

    #[test]
    fn reindex_same_path_overwrites_instead_of_duplicating() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        let path = write_doc(&dir, "doc.md", "v1");

        catalog.index_document(&path, &tags(&["a"])).unwrap();
        std::fs::write(&path, "version two, longer").unwrap();
        catalog.index_document(&path, &tags(&["b"])).unwrap();

        let all = catalog.search_documents("", &[], 10).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].size(), "version two, longer".len() as u64);
        assert_eq!(all[0].tags(), &BTreeSet::from(["b".to_string()]));
    }

    #[test]
    fn reindex_with_disjoint_tags_leaves_no_stale_buckets() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        let path = write_doc(&dir, "doc.md", "text");

        catalog.index_document(&path, &tags(&["old1", "old2"])).unwrap();
        catalog.index_document(&path, &tags(&["new1"])).unwrap();

        assert!(catalog.search_documents("", &tags(&["old1"]), 10).unwrap().is_empty());
        assert!(catalog.search_documents("", &tags(&["old2"]), 10).unwrap().is_empty());
        assert_eq!(catalog.search_documents("", &tags(&["new1"]), 10).unwrap().len(), 1);
    }

    #[test]
    fn blank_query_with_tag_filter_returns_exactly_the_tagged_documents() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        let tagged = write_doc(&dir, "tagged.md", "x");
        let untagged = write_doc(&dir, "untagged.md", "y");

        catalog.index_document(&tagged, &tags(&["x"])).unwrap();
        catalog.index_document(&untagged, &[]).unwrap();

        let results = catalog.search_documents("", &tags(&["x"]), 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].filename(), "tagged.md");
    }

    #[test]
    fn two_tag_filter_is_an_intersection_not_a_union() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        let only_a = write_doc(&dir, "only-a.md", "x");
        let both = write_doc(&dir, "both.md", "y");

        catalog.index_document(&only_a, &tags(&["a"])).unwrap();
        catalog.index_document(&both, &tags(&["a", "b"])).unwrap();

        let results = catalog.search_documents("", &tags(&["a", "b"]), 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].filename(), "both.md");
    }

    #[test]
    fn unknown_tag_filter_yields_empty_results_not_an_error() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        let path = write_doc(&dir, "doc.md", "x");
        catalog.index_document(&path, &tags(&["known"])).unwrap();

        let results = catalog
            .search_documents("", &tags(&["never-used"]), 10)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn query_matches_filename_substring_case_insensitively() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        let path = write_doc(&dir, "Quarterly-Report.md", "x");
        catalog.index_document(&path, &[]).unwrap();

        assert_eq!(catalog.search_documents("REPORT", &[], 10).unwrap().len(), 1);
        assert_eq!(catalog.search_documents("quarterly", &[], 10).unwrap().len(), 1);
        assert!(catalog.search_documents("missing", &[], 10).unwrap().is_empty());
    }

    #[test]
    fn query_matches_tags_by_equality_not_substring() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        let path = write_doc(&dir, "doc.md", "x");
        catalog.index_document(&path, &tags(&["Work"])).unwrap();

        // Case-insensitive equality against the tag.
        assert_eq!(catalog.search_documents("work", &[], 10).unwrap().len(), 1);
        // A query that is merely a prefix of the tag does not match.
        assert!(catalog.search_documents("wor", &[], 10).unwrap().is_empty());
    }

    #[test]
    fn results_order_most_recently_indexed_first() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        let first = write_doc(&dir, "first.md", "x");
        let second = write_doc(&dir, "second.md", "y");

        catalog.index_document(&first, &[]).unwrap();
        catalog.index_document(&second, &[]).unwrap();

        let results = catalog.search_documents("", &[], 10).unwrap();
        assert_eq!(results[0].filename(), "second.md");
        assert_eq!(results[1].filename(), "first.md");
    }

    #[test]
    fn limit_truncates_the_ordered_matches() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        for name in ["a.md", "b.md", "c.md"] {
            let path = write_doc(&dir, name, "x");
            catalog.index_document(&path, &[]).unwrap();
        }

        let results = catalog.search_documents("", &[], 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].filename(), "c.md");
    }

    #[test]
    fn non_positive_limit_is_an_invalid_argument() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);

        for limit in [0, -5] {
            let err = catalog.search_documents("q", &[], limit).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidArgument(_)), "{err}");
        }
    }

    #[test]
    fn extract_metadata_never_indexes_implicitly() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        let path = write_doc(&dir, "present-but-unindexed.md", "x");

        let err = catalog.extract_metadata(&path).unwrap_err();
        assert!(matches!(err, CatalogError::DocumentNotFound { .. }), "{err}");

        // The failed lookup must not have registered anything.
        assert!(catalog.search_documents("", &[], 10).unwrap().is_empty());
    }

    #[test]
    fn concurrent_indexing_loses_no_update() {
        let dir = tempdir().unwrap();
        let catalog = Arc::new(open_catalog(&dir));
        let left = write_doc(&dir, "left.md", "x");
        let right = write_doc(&dir, "right.md", "y");

        let handles: Vec<_> = [left, right]
            .into_iter()
            .map(|path| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || catalog.index_document(&path, &[]).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(catalog.search_documents("", &[], 10).unwrap().len(), 2);

        // Both survived persistence, not just memory.
        let reopened =
            DocumentCatalog::open(dir.path().join("documents"), dir.path().join("index")).unwrap();
        assert_eq!(reopened.search_documents("", &[], 10).unwrap().len(), 2);
    }

    #[test]
    fn failed_save_leaves_the_catalog_unchanged() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);
        let path = write_doc(&dir, "doc.md", "x");

        // Occupy the index file's path with a non-empty directory so the
        // atomic rename inside save cannot succeed.
        let blocker = catalog.index_path().to_path_buf();
        std::fs::create_dir_all(blocker.join("wedge")).unwrap();

        let err = catalog.index_document(&path, &[]).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }), "{err}");

        // The in-memory index must not have kept the half-applied mutation.
        assert!(catalog.search_documents("", &[], 10).unwrap().is_empty());
        let lookup = catalog.extract_metadata(&path).unwrap_err();
        assert!(matches!(lookup, CatalogError::DocumentNotFound { .. }));
    }

    #[test]
    fn create_note_is_searchable_by_title_words() {
        let dir = tempdir().unwrap();
        let catalog = open_catalog(&dir);

        let path = catalog
            .create_note("Meeting Notes", "body", &tags(&["x"]))
            .unwrap();
        assert!(path.exists());

        let results = catalog.search_documents("meeting", &[], 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].filename(), "meeting-notes.md");
        assert_eq!(results[0].tags(), &BTreeSet::from(["x".to_string()]));
    }
}
