//! Shared failure taxonomy for catalog operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during catalog operations.
///
/// Every operation on the catalog fails with exactly one of these variants,
/// so callers can branch on the failure kind instead of matching message text.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document path does not exist, is not a regular file, or cannot be read.
    #[error("document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    /// The document's content cannot be decoded as text.
    #[error("unsupported content in '{extension}' document {path}: {reason}")]
    DocumentFormat {
        path: PathBuf,
        extension: String,
        reason: String,
    },

    /// The persisted index exists but is unparseable or fails validation.
    #[error("catalog index at {path} is corrupt: {reason}")]
    IndexCorrupt {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The persisted index was written by an unknown schema version.
    #[error("catalog index at {path} has schema version {found}, expected {supported}")]
    IndexVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    /// A caller-supplied parameter is invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A note file could not be persisted.
    #[error("failed to write note {path}: {source}")]
    NoteWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An I/O error outside the cases above.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
