// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # docstore-cursor
//!
//! A lazy, stateful pagination cursor for document database result sets
//! served over HTTP.
//!
//! A query returns its first batch of results together with a `hasMore`
//! flag and, when needed, a cursor id. [`PagedCursor`] hides the difference
//! between a complete first response and a result set that must be pulled
//! across several round trips.
//!
//! ## Features
//!
//! - **Lazy Fetching**: The next batch is requested only when iteration reaches the end of the buffer
//! - **Sanitization**: Optional stripping of `_id` and `_rev` from every record
//! - **Typed Records**: Any `DeserializeOwned` record type, JSON objects by default
//! - **Stream Adapter**: Consume a cursor as a `futures::Stream`
//! - **HTTP Transport**: Retry, backoff and rate limiting built on reqwest
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docstore_cursor::{ClientConfig, CursorOptions, HttpTransport, PagedCursor, Result, Statement};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::from_file("docstore.yaml")?;
//!     let transport = HttpTransport::with_config(config.http_client_config())?;
//!
//!     let mut cursor: PagedCursor = Statement::new("FOR d IN users RETURN d")
//!         .batch_size(100)
//!         .execute(&transport, CursorOptions::new().sanitize(true))
//!         .await?;
//!
//!     while cursor.valid().await? {
//!         println!("{:?}", cursor.current()?);
//!         cursor.advance();
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       PagedCursor                        │
//! │  valid() / current() / key() / advance() / rewind()      │
//! │  all()   count()   delete()   into_stream()              │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────┬───────────────┴──────────┬──────────────────┐
//! │ Statement  │        Transport         │      Config      │
//! ├────────────┼──────────────────────────┼──────────────────┤
//! │ POST query │ put / delete / post      │ YAML / JSON      │
//! │ bind vars  │ HttpTransport (reqwest)  │ CursorOptions    │
//! │ batchSize  │ retry, backoff, governor │                  │
//! └────────────┴──────────────────────────┴──────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with retry and rate limiting
pub mod http;

/// Transport trait and HTTP implementation
pub mod transport;

/// Paged cursor
pub mod cursor;

/// Query submission
pub mod statement;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::ClientConfig;
pub use cursor::{CursorOptions, PagedCursor};
pub use error::{Error, Result};
pub use statement::Statement;
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
