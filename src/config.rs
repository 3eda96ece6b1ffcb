//! Client configuration
//!
//! Connection and cursor settings loaded from a YAML or JSON file.

use crate::cursor::CursorOptions;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://localhost:8529`
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum retries per request
    pub max_retries: u32,

    /// Backoff strategy between retries
    pub backoff: BackoffType,

    /// Initial backoff delay in milliseconds
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    pub max_backoff_ms: u64,

    /// Client-side rate limit; absent means unlimited
    pub rate_limit: Option<RateLimiterConfig>,

    /// Headers sent with every request
    pub headers: HashMap<String, String>,

    /// Cursor settings
    pub cursor: CursorOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8529".to_string(),
            timeout_secs: 30,
            max_retries: 3,
            backoff: BackoffType::Exponential,
            initial_backoff_ms: 100,
            max_backoff_ms: 60_000,
            rate_limit: None,
            headers: HashMap::new(),
            cursor: CursorOptions::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a file; `.json` files are parsed as JSON,
    /// everything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents)?
        } else {
            Self::from_yaml_str(&contents)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }
        if self.cursor.path.trim_matches('/').is_empty() {
            return Err(Error::invalid_value("cursor.path", "must not be empty"));
        }
        Ok(())
    }

    /// HTTP client settings derived from this configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );

        builder = match &self.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8529");
        assert!(config.rate_limit.is_none());
        assert!(!config.cursor.sanitize);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_str() {
        let config = ClientConfig::from_yaml_str(
            r#"
base_url: https://db.example.com:8529
timeout_secs: 5
backoff: linear
rate_limit:
  requests_per_second: 20
  burst_size: 5
headers:
  Authorization: Bearer abc
cursor:
  sanitize: true
  path: /_db/shop/_api/cursor
"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://db.example.com:8529");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff, BackoffType::Linear);
        assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(20, 5)));
        assert!(config.cursor.sanitize);
        assert_eq!(config.cursor.path, "/_db/shop/_api/cursor");
    }

    #[test]
    fn test_http_client_config_conversion() {
        let mut config = ClientConfig::default();
        config
            .headers
            .insert("Authorization".to_string(), "Bearer abc".to_string());
        config.initial_backoff_ms = 250;

        let http = config.http_client_config();
        assert_eq!(http.base_url.as_deref(), Some("http://localhost:8529"));
        assert_eq!(http.timeout, Duration::from_secs(30));
        assert_eq!(http.initial_backoff, Duration::from_millis(250));
        assert!(http.rate_limit.is_none());
        assert_eq!(
            http.default_headers.get("Authorization"),
            Some(&"Bearer abc".to_string())
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let config = ClientConfig {
            base_url: "ftp://db.example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { .. })
        ));

        let mut config = ClientConfig::default();
        config.cursor.path = "/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"base_url": "http://127.0.0.1:8529", "cursor": {{"sanitize": true}}}}"#
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8529");
        assert!(config.cursor.sanitize);
        assert_eq!(config.cursor.path, "/_api/cursor");
    }

    #[test]
    fn test_from_file_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_retries: 0").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_from_file_missing() {
        let err = ClientConfig::from_file("/nonexistent/docstore.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
