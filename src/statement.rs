//! Query submission
//!
//! A [`Statement`] posts a query to the cursor endpoint and wraps the first
//! response in a [`PagedCursor`].

use crate::cursor::{CursorOptions, PagedCursor};
use crate::error::{Error, Result};
use crate::transport::Transport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// A query with its bind variables and cursor settings
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    query: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    bind_vars: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch_size: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    count: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<StatementOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatementOptions {
    full_count: bool,
}

impl Statement {
    /// Create a statement for the given query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Bind a query variable
    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bind_vars.insert(name.into(), value.into());
        self
    }

    /// Bind every entry of a JSON object
    pub fn bind_all(mut self, vars: Value) -> Result<Self> {
        match vars {
            Value::Object(map) => {
                self.bind_vars.extend(map);
                Ok(self)
            }
            Value::Null => Ok(self),
            other => Err(Error::invalid_value(
                "bindVars",
                format!("expected an object, got {other}"),
            )),
        }
    }

    /// Maximum number of records per batch
    #[must_use]
    pub fn batch_size(mut self, size: u32) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Ask the server for the total result count
    #[must_use]
    pub fn count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    /// Ask the server for the match count before the final LIMIT
    #[must_use]
    pub fn full_count(mut self, full_count: bool) -> Self {
        self.options = full_count.then_some(StatementOptions { full_count });
        self
    }

    /// Server-side lifetime of the cursor, in seconds
    #[must_use]
    pub fn ttl(mut self, seconds: u32) -> Self {
        self.ttl = Some(seconds);
        self
    }

    /// The query text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Request body sent to the cursor endpoint
    pub fn to_body(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Run the query and open a cursor over its results
    pub async fn execute<'a, T: DeserializeOwned>(
        &self,
        transport: &'a dyn Transport,
        options: CursorOptions,
    ) -> Result<PagedCursor<'a, T>> {
        if self.query.trim().is_empty() {
            return Err(Error::invalid_value("query", "must not be empty"));
        }

        debug!("Executing query: {}", self.query);
        let response = transport.post(&options.path, &self.to_body()?).await?;
        PagedCursor::new(transport, response.into_body(), options)
    }
}
