//! Durable, atomic persistence of the catalog index.

use crate::error::{CatalogError, CatalogResult};
use crate::index::schema::{CatalogIndex, SCHEMA_VERSION};
use crate::infra::atomic_write;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

/// Just enough of the persisted form to check the schema version before
/// attempting a full parse; unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Loads and saves a [`CatalogIndex`] at a fixed file path.
///
/// The store never retains an index between calls; it only serializes and
/// deserializes on request. Saves are atomic: the new contents are written to
/// a temporary file in the same directory and swapped into place by rename,
/// so a crash or concurrent read never observes a partial index.
#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    /// Creates a store for the index file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the index file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted index.
    ///
    /// A missing file yields an empty index; that is not an error.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::IndexVersion` when the file was written by a
    /// schema version other than [`SCHEMA_VERSION`], and
    /// `CatalogError::IndexCorrupt` when it cannot be parsed or fails
    /// validation. Corrupt data is never silently discarded.
    pub fn load(&self) -> CatalogResult<CatalogIndex> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CatalogIndex::empty()),
            Err(e) => {
                return Err(CatalogError::Io {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let probe: VersionProbe =
            serde_json::from_str(&raw).map_err(|e| CatalogError::IndexCorrupt {
                path: self.path.clone(),
                reason: "not a catalog index document".to_string(),
                source: Some(e),
            })?;
        if probe.version != SCHEMA_VERSION {
            return Err(CatalogError::IndexVersion {
                path: self.path.clone(),
                found: probe.version,
                supported: SCHEMA_VERSION,
            });
        }

        let index: CatalogIndex =
            serde_json::from_str(&raw).map_err(|e| CatalogError::IndexCorrupt {
                path: self.path.clone(),
                reason: "malformed index contents".to_string(),
                source: Some(e),
            })?;

        index.validate().map_err(|reason| CatalogError::IndexCorrupt {
            path: self.path.clone(),
            reason,
            source: None,
        })?;

        Ok(index)
    }

    /// Writes the full index back, atomically.
    ///
    /// The parent directory is created on demand.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` when the directory cannot be created or the
    /// write/rename fails.
    pub fn save(&self, index: &CatalogIndex) -> CatalogResult<()> {
        let io_err = |e| CatalogError::Io {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents =
            serde_json::to_string_pretty(index).map_err(|e| CatalogError::IndexCorrupt {
                path: self.path.clone(),
                reason: "index failed to serialize".to_string(),
                source: Some(e),
            })?;

        atomic_write(&self.path, &contents).map_err(io_err)
    }
}
