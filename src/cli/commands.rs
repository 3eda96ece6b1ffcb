//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Document database cursor CLI
#[derive(Parser, Debug)]
#[command(name = "docstore-cursor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides the config file)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Strip _id and _rev from every record
    #[arg(long, global = true)]
    pub sanitize: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a query and print every result as a JSON line
    Query {
        /// Query text
        query: String,

        /// Bind variables as a JSON object
        #[arg(long)]
        bind: Option<String>,

        /// Records per batch
        #[arg(long)]
        batch_size: Option<u32>,

        /// Stop after this many records and release the server cursor
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Run a query and print the number of results
    Count {
        /// Query text
        query: String,

        /// Bind variables as a JSON object
        #[arg(long)]
        bind: Option<String>,

        /// Records per batch
        #[arg(long)]
        batch_size: Option<u32>,
    },
}
