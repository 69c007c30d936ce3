//! Command line argument parsing for the xiphos CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::index::document::{DocId, DocumentStatus};
use crate::search::config::ExecutionMode;

/// Xiphos - an in-memory TF-IDF document search engine
#[derive(Parser, Debug, Clone)]
#[command(name = "xiphos")]
#[command(about = "Rank JSON Lines corpora with plus/minus word queries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct XiphosArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Space separated stop words
    #[arg(
        long,
        value_name = "WORDS",
        default_value = "",
        env = "XIPHOS_STOP_WORDS",
        global = true
    )]
    pub stop_words: String,

    /// Use the parallel ranking and matching paths
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl XiphosArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        if self.parallel {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Sequential
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rank a corpus against a query
    Search(SearchArgs),

    /// Show which query words a document contains
    Match(MatchArgs),

    /// Remove documents whose word sets repeat an earlier document
    Dedup(CorpusArgs),

    /// Run every query of a file against a corpus
    Batch(BatchArgs),

    /// Show corpus statistics
    Stats(CorpusArgs),
}

/// Arguments shared by commands that only need a corpus
#[derive(Parser, Debug, Clone)]
pub struct CorpusArgs {
    /// Corpus file (JSON Lines)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Corpus file (JSON Lines)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Query string, e.g. "fluffy cat -collar"
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Only rank documents with this status
    #[arg(short, long, default_value = "actual")]
    pub status: DocumentStatus,

    /// Split the results into pages of this size
    #[arg(short, long)]
    pub page_size: Option<usize>,
}

/// Arguments for matching
#[derive(Parser, Debug, Clone)]
pub struct MatchArgs {
    /// Corpus file (JSON Lines)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Document id
    #[arg(value_name = "ID", allow_negative_numbers = true)]
    pub id: DocId,

    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,
}

/// Arguments for batch queries
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// Corpus file (JSON Lines)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// File with one query per line
    #[arg(value_name = "QUERIES_FILE")]
    pub queries: PathBuf,

    /// Print one flat list instead of one list per query
    #[arg(long)]
    pub joined: bool,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(short, long)]
    pub threads: Option<usize>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
