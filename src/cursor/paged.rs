//! Lazy paginated cursor
//!
//! A [`PagedCursor`] buffers every record it has seen and pulls the next
//! batch from the server only when the read position runs off the end of
//! the buffer.

use super::types::{convert_batch, CursorOptions, CursorPayload};
use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::Document;
use futures::stream::{self, Stream};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Stateful cursor over a server-side result set
///
/// Records are appended to an in-memory buffer in delivery order and never
/// removed. The position only moves forward, except through [`rewind`].
///
/// [`rewind`]: PagedCursor::rewind
pub struct PagedCursor<'a, T = Document> {
    transport: &'a dyn Transport,
    options: CursorOptions,
    id: Option<String>,
    buffer: Vec<T>,
    has_more: bool,
    position: usize,
    count: Option<u64>,
    extra: Option<Value>,
    cached: bool,
    fetches: usize,
}

impl<'a, T: DeserializeOwned> PagedCursor<'a, T> {
    /// Create a cursor from the initial response body
    ///
    /// Fails with [`Error::MalformedPayload`] when `hasMore` or `result`
    /// is missing, and with [`Error::JsonParse`] when a record does not
    /// convert into `T`.
    pub fn new(
        transport: &'a dyn Transport,
        payload: Value,
        options: CursorOptions,
    ) -> Result<Self> {
        Self::from_payload(transport, CursorPayload::from_value(payload)?, options)
    }

    /// Create a cursor from an already decoded payload
    pub fn from_payload(
        transport: &'a dyn Transport,
        payload: CursorPayload,
        options: CursorOptions,
    ) -> Result<Self> {
        let buffer = convert_batch(payload.result, options.sanitize)?;
        let id = if payload.has_more { payload.id } else { None };

        debug!(
            "Opened cursor {:?} with {} records, has_more={}",
            id,
            buffer.len(),
            payload.has_more
        );

        Ok(Self {
            transport,
            options,
            id,
            buffer,
            has_more: payload.has_more,
            position: 0,
            count: payload.count,
            extra: payload.extra,
            cached: payload.cached,
            fetches: 0,
        })
    }

    /// Check whether a record is available at the current position
    ///
    /// When the buffer is exhausted but the server holds more data, this
    /// fetches exactly one batch before answering. It is the only place
    /// iteration touches the network.
    pub async fn valid(&mut self) -> Result<bool> {
        if self.position < self.buffer.len() {
            return Ok(true);
        }
        if !self.has_more || self.id.is_none() {
            return Ok(false);
        }

        self.fetch_next().await?;
        Ok(self.position < self.buffer.len())
    }

    /// Check whether iteration is finished; the negation of [`valid`](Self::valid)
    pub async fn at_end(&mut self) -> Result<bool> {
        Ok(!self.valid().await?)
    }

    /// Fetch every remaining batch and return the whole buffer
    ///
    /// The read position is left where it was.
    pub async fn all(&mut self) -> Result<&[T]> {
        self.drain().await?;
        Ok(&self.buffer)
    }

    /// Fetch every remaining batch and return the number of records
    pub async fn count(&mut self) -> Result<usize> {
        self.drain().await?;
        Ok(self.buffer.len())
    }

    /// Return the current record and advance, fetching as needed
    pub async fn next_record(&mut self) -> Result<Option<T>>
    where
        T: Clone,
    {
        if !self.valid().await? {
            return Ok(None);
        }
        let record = self.current()?.clone();
        self.advance();
        Ok(Some(record))
    }

    /// Turn the cursor into a stream of records
    ///
    /// Iteration starts at the current position. Batches are fetched lazily
    /// as the stream is polled; a transport error ends the stream after
    /// being yielded.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + 'a
    where
        T: Clone + 'a,
    {
        stream::try_unfold(self, |mut cursor| async move {
            let next = cursor.next_record().await;
            next.map(|record| record.map(|record| (record, cursor)))
        })
    }

    async fn drain(&mut self) -> Result<()> {
        while self.has_more && self.id.is_some() {
            self.fetch_next().await?;
        }
        Ok(())
    }

    /// Pull the next batch from the server
    ///
    /// State only changes after the response has been fully decoded, so a
    /// failure leaves the cursor exactly as it was.
    async fn fetch_next(&mut self) -> Result<()> {
        let Some(id) = self.id.as_deref() else {
            return Ok(());
        };
        let path = self.options.continuation_path(id);

        debug!(
            "Fetching next batch for cursor {} ({} buffered)",
            id,
            self.buffer.len()
        );

        let response = self.transport.put(&path, "").await?;
        let payload = CursorPayload::from_value(response.into_body())?;
        let records: Vec<T> = convert_batch(payload.result, self.options.sanitize)?;

        self.has_more = payload.has_more;
        self.buffer.extend(records);
        if payload.count.is_some() {
            self.count = payload.count;
        }
        if payload.extra.is_some() {
            self.extra = payload.extra;
        }
        if !self.has_more {
            self.id = None;
        }
        self.fetches += 1;

        Ok(())
    }
}

impl<'a, T> PagedCursor<'a, T> {
    /// Record at the current position
    ///
    /// Returns [`Error::OutOfRange`] when the position is past the buffer.
    /// Call [`valid`](Self::valid) first to pull in the next batch.
    pub fn current(&self) -> Result<&T> {
        self.buffer
            .get(self.position)
            .ok_or_else(|| Error::out_of_range(self.position, self.buffer.len()))
    }

    /// Current read position
    pub fn key(&self) -> usize {
        self.position
    }

    /// Move to the next position without checking bounds
    pub fn advance(&mut self) {
        self.position += 1;
    }

    /// Restart iteration over the buffered records
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Delete the server-side cursor
    ///
    /// Best effort: returns `true` only when the server acknowledged the
    /// deletion. Without a continuation id there is nothing to delete and no
    /// request is made.
    ///
    /// The continuation id is kept after a successful delete. Iterating past
    /// the buffer afterwards sends a continuation for a cursor the server no
    /// longer has, which fails with a 404, so stop fetching once deleted.
    pub async fn delete(&self) -> bool {
        let Some(id) = self.id.as_deref() else {
            return false;
        };

        match self.transport.delete(&self.options.continuation_path(id)).await {
            Ok(response) => response.is_success(),
            Err(e) => {
                warn!("Failed to delete cursor {}: {}", id, e);
                false
            }
        }
    }

    /// Continuation id, if the server still holds data
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether the server reported more data
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Number of records buffered so far
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing has been buffered yet
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Records buffered so far, without fetching
    pub fn buffered(&self) -> &[T] {
        &self.buffer
    }

    /// Total result count reported by the server, if requested
    pub fn server_count(&self) -> Option<u64> {
        self.count
    }

    /// Server statistics and warnings
    pub fn extra(&self) -> Option<&Value> {
        self.extra.as_ref()
    }

    /// Number of matches before any final LIMIT, if the query asked for it
    pub fn full_count(&self) -> Option<u64> {
        self.extra
            .as_ref()
            .and_then(|extra| extra.get("stats"))
            .and_then(|stats| stats.get("fullCount"))
            .and_then(Value::as_u64)
    }

    /// Whether the result was served from the query cache
    pub fn is_cached(&self) -> bool {
        self.cached
    }

    /// Number of continuation batches fetched so far
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    /// Options the cursor was created with
    pub fn options(&self) -> &CursorOptions {
        &self.options
    }
}

impl<T> std::fmt::Debug for PagedCursor<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedCursor")
            .field("id", &self.id)
            .field("has_more", &self.has_more)
            .field("position", &self.position)
            .field("buffered", &self.buffer.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
