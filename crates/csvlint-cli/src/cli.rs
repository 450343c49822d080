//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// csvlint: validate tabular data against a schema
#[derive(Parser)]
#[command(name = "csvlint")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a data file against a schema
    Validate {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Schema document: http(s) URL, file:// URL, or local path
        #[arg(short, long, value_name = "URI")]
        schema: String,

        /// Field delimiter (default: auto-detect)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,

        /// Validate at most this many data rows
        #[arg(long)]
        max_rows: Option<usize>,

        /// Show at most this many diagnostics
        #[arg(long)]
        max_diagnostics: Option<usize>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a schema and describe its columns
    Schema {
        /// Schema document: http(s) URL, file:// URL, or local path
        #[arg(value_name = "URI")]
        uri: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Accept a single ASCII character, or `tab`/`\t`.
fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!(
            "Invalid delimiter: {}. Use a single ASCII character or 'tab'.",
            s
        )),
    }
}
