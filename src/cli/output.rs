//! Output format types for CLI commands.

use crate::domain::DocumentRecord;
use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain file paths, one per line
    Paths,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single document in listing output.
#[derive(Debug, Serialize)]
pub struct RecordListing {
    pub id: String,
    pub filename: String,
    pub tags: Vec<String>,
    pub indexed_at: String,
}

impl From<&DocumentRecord> for RecordListing {
    fn from(record: &DocumentRecord) -> Self {
        Self {
            id: record.id().to_string(),
            filename: record.filename().to_string(),
            tags: record.tags().iter().cloned().collect(),
            indexed_at: record.indexed_at().to_rfc3339(),
        }
    }
}
