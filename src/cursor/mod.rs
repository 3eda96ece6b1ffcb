//! Cursor module
//!
//! Lazy, stateful pagination over server-side result sets.
//!
//! # Overview
//!
//! A query answers with a first batch of records, a `hasMore` flag and, when
//! more data remains, a cursor id. [`PagedCursor`] buffers that batch and
//! transparently requests the next ones (`PUT {path}/{id}`) as iteration
//! reaches the end of what has been fetched.
//!
//! ```rust,ignore
//! let mut cursor: PagedCursor = PagedCursor::new(&transport, body, CursorOptions::new())?;
//! while cursor.valid().await? {
//!     println!("{}: {:?}", cursor.key(), cursor.current()?);
//!     cursor.advance();
//! }
//! ```

mod paged;
mod types;

pub use paged::PagedCursor;
pub use types::{
    sanitize_record, CursorOptions, CursorPayload, DEFAULT_CURSOR_PATH, ID_FIELD, REV_FIELD,
};
