//! CLI module
//!
//! Command-line interface for running queries through a paged cursor.
//!
//! # Commands
//!
//! - `query` - Stream every result as a JSON line
//! - `count` - Drain the cursor and print the number of results

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
