//! Cursor types
//!
//! Options, the wire payload shared by the initial response and every
//! continuation response, and record sanitization.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Default resource path for cursors
pub const DEFAULT_CURSOR_PATH: &str = "/_api/cursor";

/// Identity field stripped by sanitization
pub const ID_FIELD: &str = "_id";

/// Revision field stripped by sanitization
pub const REV_FIELD: &str = "_rev";

/// Options captured when a cursor is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorOptions {
    /// Strip `_id` and `_rev` from every record before conversion
    pub sanitize: bool,
    /// Resource path prefix for continuation and deletion requests
    pub path: String,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            sanitize: false,
            path: DEFAULT_CURSOR_PATH.to_string(),
        }
    }
}

impl CursorOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable sanitization
    #[must_use]
    pub fn sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    /// Set the cursor resource path
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Path addressing the server-side cursor with the given id
    pub fn continuation_path(&self, id: &str) -> String {
        format!("{}/{}", self.path.trim_end_matches('/'), id)
    }
}

/// One batch as delivered by the server
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPayload {
    /// Continuation id, present while the server holds more data
    #[serde(default, deserialize_with = "deserialize_cursor_id")]
    pub id: Option<String>,
    /// Whether records remain beyond this batch
    pub has_more: bool,
    /// Raw records in this batch
    pub result: Vec<Value>,
    /// Total number of results, when the query asked for it
    #[serde(default)]
    pub count: Option<u64>,
    /// Server statistics and warnings
    #[serde(default)]
    pub extra: Option<Value>,
    /// Whether the result came from the query cache
    #[serde(default)]
    pub cached: bool,
}

impl CursorPayload {
    /// Decode a payload, rejecting bodies without `hasMore` or `result`
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::malformed(e.to_string()))
    }
}

/// Cursor ids arrive as strings, but some servers send them as numbers
fn deserialize_cursor_id<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(id)) if !id.is_empty() => Some(id),
        Some(RawId::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

/// Remove the identity and revision fields from a record object
pub fn sanitize_record(record: &mut Value) {
    if let Value::Object(map) = record {
        map.remove(ID_FIELD);
        map.remove(REV_FIELD);
    }
}

/// Convert a raw batch into typed records
///
/// All-or-nothing: the first record that fails to convert fails the batch.
pub(crate) fn convert_batch<T: DeserializeOwned>(
    raw: Vec<Value>,
    sanitize: bool,
) -> Result<Vec<T>> {
    raw.into_iter()
        .map(|mut record| {
            if sanitize {
                sanitize_record(&mut record);
            }
            serde_json::from_value(record).map_err(Error::from)
        })
        .collect()
}
