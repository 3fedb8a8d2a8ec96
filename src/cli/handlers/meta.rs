//! Metadata command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_catalog;
use crate::cli::MetaArgs;
use crate::cli::output::{Output, OutputFormat};

pub fn handle_meta(args: &MetaArgs, documents_dir: &Path, index_dir: &Path) -> Result<()> {
    let catalog = open_catalog(documents_dir, index_dir)?;

    let record = catalog
        .extract_metadata(&args.path)
        .with_context(|| format!("no indexed document at {}", args.path.display()))?;

    match args.format {
        OutputFormat::Human => {
            println!("id:         {}", record.id());
            println!("filename:   {}", record.filename());
            println!("extension:  {}", record.extension());
            println!("size:       {} bytes", record.size());
            println!("created:    {}", record.created().to_rfc3339());
            println!("modified:   {}", record.modified().to_rfc3339());
            let tags: Vec<&str> = record.tags().iter().map(String::as_str).collect();
            println!("tags:       {}", tags.join(", "));
            println!("indexed_at: {}", record.indexed_at().to_rfc3339());
        }
        OutputFormat::Json | OutputFormat::Paths => {
            let output = Output::new(&record);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
