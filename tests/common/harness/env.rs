//! Isolated test environment with temp directories.

use super::ShelfCommand;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with temporary documents and index directories.
///
/// The backing temp directory is cleaned up on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    documents_dir: PathBuf,
    index_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let documents_dir = temp_dir.path().join("documents");
        let index_dir = temp_dir.path().join("index");
        Self {
            _temp_dir: temp_dir,
            documents_dir,
            index_dir,
        }
    }

    /// Returns the path to the documents directory.
    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    /// Returns the path to the index directory.
    pub fn index_dir(&self) -> &Path {
        &self.index_dir
    }

    /// Returns the path where the catalog index file is stored.
    pub fn index_path(&self) -> PathBuf {
        self.index_dir.join("catalog.json")
    }

    /// Writes a document into the documents directory and returns its path.
    pub fn write_doc(&self, name: &str, content: &str) -> PathBuf {
        std::fs::create_dir_all(&self.documents_dir).expect("Failed to create documents dir");
        let path = self.documents_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write document");
        path
    }

    /// Writes raw bytes into the documents directory and returns the path.
    pub fn write_bytes(&self, name: &str, content: &[u8]) -> PathBuf {
        std::fs::create_dir_all(&self.documents_dir).expect("Failed to create documents dir");
        let path = self.documents_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write document");
        path
    }

    /// Creates a ShelfCommand configured for this test environment.
    pub fn cmd(&self) -> ShelfCommand {
        ShelfCommand::new().dirs(&self.documents_dir, &self.index_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
