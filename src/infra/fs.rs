//! Shared file I/O helpers: text decoding and atomic writes.

use std::fmt;
use std::io::{self, Write as IoWrite};
use std::path::Path;
use tempfile::NamedTempFile;

/// Why a file's bytes could not be decoded as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    Utf16Le,
    Utf16Be,
    InvalidUtf8 { valid_up_to: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Utf16Le => {
                write!(f, "UTF-16 LE detected (byte order mark FF FE); convert to UTF-8")
            }
            DecodeError::Utf16Be => {
                write!(f, "UTF-16 BE detected (byte order mark FE FF); convert to UTF-8")
            }
            DecodeError::InvalidUtf8 { valid_up_to } => {
                write!(f, "invalid UTF-8 at byte {valid_up_to}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decodes file bytes as UTF-8 text.
///
/// A UTF-8 byte order mark is stripped; UTF-16 byte order marks and invalid
/// UTF-8 sequences are rejected.
///
/// # Errors
///
/// Returns `DecodeError` describing the offending encoding.
pub fn read_text(bytes: Vec<u8>) -> Result<String, DecodeError> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(DecodeError::Utf16Le);
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(DecodeError::Utf16Be);
    }

    let content = String::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8 {
        valid_up_to: e.utf8_error().valid_up_to(),
    })?;

    // Strip UTF-8 BOM if present
    match content.strip_prefix('\u{FEFF}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(content),
    }
}

/// Writes `contents` to `path` atomically, replacing any existing file.
///
/// Uses a temporary file in the same directory and an atomic rename, so a
/// crash or concurrent read never observes a partially written file. The
/// parent directory must exist.
pub fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path has no parent directory")
    })?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(contents.as_bytes())?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Writes `contents` to `path` atomically, failing if `path` already exists.
///
/// # Errors
///
/// Returns an error of kind `AlreadyExists` when `path` is taken, which
/// callers use to pick a different name.
pub fn atomic_write_new(path: &Path, contents: &str) -> io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path has no parent directory")
    })?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(contents.as_bytes())?;
    temp.persist_noclobber(path).map_err(|e| e.error)?;
    Ok(())
}
