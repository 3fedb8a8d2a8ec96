//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// shelf - a searchable catalog of documents and notes
#[derive(Parser, Debug)]
#[command(name = "shelf", version, about, long_about = None)]
pub struct Cli {
    /// Documents directory (overrides config file)
    #[arg(long, global = true)]
    pub documents_dir: Option<PathBuf>,

    /// Index directory (overrides config file)
    #[arg(long, global = true)]
    pub index_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Index a document (or every document under a directory)
    Index(IndexArgs),

    /// Create a new markdown note and index it
    Note(NoteArgs),

    /// Search indexed documents by query and tags
    Search(SearchArgs),

    /// Show the stored metadata for an indexed document
    Meta(MetaArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `index` command
#[derive(Parser, Debug)]
pub struct IndexArgs {
    /// File to index, or a directory to index recursively
    pub path: PathBuf,

    /// Tag to attach (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,
}

/// Arguments for the `note` command
#[derive(Parser, Debug)]
pub struct NoteArgs {
    /// Title of the note
    pub title: String,

    /// Note content in markdown
    pub content: String,

    /// Tag to attach (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query (an empty query matches everything)
    pub query: String,

    /// Filter by tag; repeating the flag requires all given tags
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Maximum number of results
    #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
    pub limit: i64,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `meta` command
#[derive(Parser, Debug)]
pub struct MetaArgs {
    /// Path of an indexed document
    pub path: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Initializes the tracing subscriber for the CLI process.
///
/// `RUST_LOG` wins when set; otherwise the `-v` count picks the level.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
