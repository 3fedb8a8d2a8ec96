//! Note command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_catalog;
use crate::cli::NoteArgs;

pub fn handle_note(args: &NoteArgs, documents_dir: &Path, index_dir: &Path) -> Result<()> {
    let catalog = open_catalog(documents_dir, index_dir)?;

    let path = catalog
        .create_note(&args.title, &args.content, &args.tags)
        .with_context(|| format!("failed to create note '{}'", args.title))?;

    println!("Created: {}", path.display());
    Ok(())
}
