//! Infrastructure: slug generation and file I/O helpers.

pub mod fs;
pub mod slug;

pub use fs::{DecodeError, atomic_write, atomic_write_new, read_text};
pub use slug::slugify;
