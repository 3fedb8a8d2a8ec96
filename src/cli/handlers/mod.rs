//! Command handlers for the CLI.

mod completions;
mod index;
mod meta;
mod note;
mod search;

use anyhow::{Context, Result};
use std::path::Path;

use crate::catalog::DocumentCatalog;

// Re-export public items
pub use completions::handle_completions;
pub use index::handle_index;
pub use meta::handle_meta;
pub use note::handle_note;
pub use search::handle_search;

/// Opens the catalog over the resolved storage directories.
pub(crate) fn open_catalog(documents_dir: &Path, index_dir: &Path) -> Result<DocumentCatalog> {
    DocumentCatalog::open(documents_dir, index_dir)
        .with_context(|| format!("failed to open catalog at {}", index_dir.display()))
}
