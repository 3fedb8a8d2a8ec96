//! Index command handler.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use super::open_catalog;
use crate::catalog::DocumentCatalog;
use crate::cli::IndexArgs;
use crate::error::CatalogError;

pub fn handle_index(args: &IndexArgs, documents_dir: &Path, index_dir: &Path) -> Result<()> {
    let catalog = open_catalog(documents_dir, index_dir)?;

    if args.path.is_dir() {
        index_directory(&catalog, &args.path, &args.tags)
    } else {
        let id = catalog
            .index_document(&args.path, &args.tags)
            .with_context(|| format!("failed to index {}", args.path.display()))?;
        println!("Indexed: {id}");
        Ok(())
    }
}

/// Indexes every regular file under `dir`, skipping hidden entries.
///
/// Documents that fail the text decode check are reported and skipped rather
/// than aborting the walk; other failures abort.
fn index_directory(catalog: &DocumentCatalog, dir: &Path, tags: &[String]) -> Result<()> {
    let mut indexed = 0usize;
    let mut skipped = 0usize;

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        match catalog.index_document(entry.path(), tags) {
            Ok(_) => indexed += 1,
            Err(CatalogError::DocumentFormat { path, extension, .. }) => {
                warn!(path = %path.display(), %extension, "skipping undecodable document");
                eprintln!("  skipped (not text): {}", path.display());
                skipped += 1;
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to index {}", entry.path().display()));
            }
        }
    }

    println!("Indexed {indexed} document(s), skipped {skipped}");
    Ok(())
}

/// Hidden files and directories (leading dot) are left out of bulk indexing.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}
