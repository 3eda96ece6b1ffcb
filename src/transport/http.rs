//! reqwest-backed transport

use super::types::{Transport, TransportResponse};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::Method;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// [`Transport`] over the crate's retrying [`HttpClient`]
#[derive(Debug)]
pub struct HttpTransport {
    client: HttpClient,
}

impl HttpTransport {
    /// Wrap an existing client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build a transport from client configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self::new(HttpClient::with_config(config)?))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
    ) -> Result<TransportResponse> {
        let response = self.client.request(method, path, body).await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!("{:?} {} -> {} ({} bytes)", method, path, status, text.len());

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(TransportResponse::new(status, body))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: &str) -> Result<TransportResponse> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: &str) -> Result<TransportResponse> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<TransportResponse> {
        self.send(Method::DELETE, path, None).await
    }
}
