//! shelf - a searchable catalog of documents and notes

pub mod catalog;
pub mod cli;
pub mod domain;
pub mod error;
pub mod index;
pub mod infra;
pub mod notes;

pub use catalog::DocumentCatalog;
pub use domain::DocumentRecord;
pub use error::{CatalogError, CatalogResult};

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_completions, handle_index, handle_meta, handle_note, handle_search},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose);
    let config = Config::load()?;
    let documents_dir = config.documents_dir(cli.documents_dir.as_ref());
    let index_dir = config.index_dir(cli.index_dir.as_ref());

    match &cli.command {
        Command::Index(args) => handle_index(args, &documents_dir, &index_dir),
        Command::Note(args) => handle_note(args, &documents_dir, &index_dir),
        Command::Search(args) => handle_search(args, &documents_dir, &index_dir),
        Command::Meta(args) => handle_meta(args, &documents_dir, &index_dir),
        Command::Completions(args) => handle_completions(args),
    }
}
