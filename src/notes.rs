//! Note synthesis: front matter, unique filenames, no-clobber writes.

use crate::error::{CatalogError, CatalogResult};
use crate::infra::{atomic_write_new, slugify};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

/// Metadata block prepended to a note body.
#[derive(Debug, Serialize)]
struct FrontMatter<'a> {
    title: &'a str,
    created: DateTime<Utc>,
    tags: String,
}

/// Synthesizes note files inside the documents directory.
///
/// A note's filename is derived from its title via [`slugify`]; when the name
/// is taken, a `-2`, `-3`, … counter suffix is appended so an existing note
/// is never overwritten.
#[derive(Debug)]
pub struct NoteBuilder {
    documents_dir: PathBuf,
}

impl NoteBuilder {
    /// Creates a builder writing into `documents_dir`.
    pub fn new(documents_dir: PathBuf) -> Self {
        Self { documents_dir }
    }

    /// Returns the directory notes are written to.
    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    /// Writes a new note file and returns its path.
    ///
    /// The document is the front matter block (`title`, `created`, comma-joined
    /// `tags`) between `---` fences, a blank line, then `content` verbatim.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoteWrite` when the documents directory cannot
    /// be created or the file cannot be persisted.
    pub fn write(&self, title: &str, content: &str, tags: &[String]) -> CatalogResult<PathBuf> {
        std::fs::create_dir_all(&self.documents_dir).map_err(|e| CatalogError::NoteWrite {
            path: self.documents_dir.clone(),
            source: e,
        })?;

        let slug = slugify(title);
        let document = render(title, Utc::now(), tags, content);

        // First free name wins; a racing creation surfaces as AlreadyExists
        // from the no-clobber persist and we move on to the next suffix.
        let mut attempt: u32 = 1;
        loop {
            let filename = if attempt == 1 {
                format!("{slug}.md")
            } else {
                format!("{slug}-{attempt}.md")
            };
            let path = self.documents_dir.join(filename);
            if path.exists() {
                attempt += 1;
                continue;
            }
            match atomic_write_new(&path, &document) {
                Ok(()) => return Ok(path),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(CatalogError::NoteWrite { path, source: e }),
            }
        }
    }
}

/// Renders the full note document.
fn render(title: &str, created: DateTime<Utc>, tags: &[String], content: &str) -> String {
    let front = FrontMatter {
        title,
        created,
        tags: tags.join(", "),
    };
    let yaml = serde_yaml::to_string(&front).expect("front matter serialization is infallible");
    format!("---\n{yaml}---\n\n{content}")
}
