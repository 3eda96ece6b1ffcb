//! Transport types and traits
//!
//! Defines the connection abstraction used by cursors and statements.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A decoded server response
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded JSON body (`Value::Null` for an empty body)
    pub body: Value,
}

impl TransportResponse {
    /// Create a new response
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Create a 200 response with the given body
    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    /// Check if the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Consume the response, returning its body
    pub fn into_body(self) -> Value {
        self.body
    }
}

/// Connection used by cursors to reach the server
///
/// Retries, timeouts and authentication are the implementation's concern;
/// callers see only the final outcome of each request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a POST with a raw JSON body
    async fn post(&self, path: &str, body: &str) -> Result<TransportResponse>;

    /// Send a PUT with a raw JSON body
    async fn put(&self, path: &str, body: &str) -> Result<TransportResponse>;

    /// Send a DELETE
    async fn delete(&self, path: &str) -> Result<TransportResponse>;
}
