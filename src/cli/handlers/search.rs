//! Search command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_catalog;
use crate::cli::SearchArgs;
use crate::cli::output::{Output, OutputFormat, RecordListing};
use crate::domain::DocumentRecord;

pub fn handle_search(args: &SearchArgs, documents_dir: &Path, index_dir: &Path) -> Result<()> {
    let catalog = open_catalog(documents_dir, index_dir)?;

    let results = catalog
        .search_documents(&args.query, &args.tags, args.limit)
        .with_context(|| format!("search failed for query: {}", args.query))?;

    format_search_output(&results, args.format)
}

/// Format and print search results.
fn format_search_output(results: &[DocumentRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if results.is_empty() {
                println!("No matching documents found.");
            } else {
                for record in results {
                    if record.tags().is_empty() {
                        println!("{}", record.filename());
                    } else {
                        let tags: Vec<&str> =
                            record.tags().iter().map(String::as_str).collect();
                        println!("{} [{}]", record.filename(), tags.join(", "));
                    }
                    println!("  {}", record.id());
                }
                println!();
                println!("{} result(s)", results.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<RecordListing> = results.iter().map(RecordListing::from).collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Paths => {
            for record in results {
                println!("{}", record.path().display());
            }
        }
    }
    Ok(())
}
