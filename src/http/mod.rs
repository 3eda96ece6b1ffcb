//! HTTP client module
//!
//! Provides the HTTP client used by the cursor transport, with retry,
//! rate limiting and backoff strategies.
//!
//! # Features
//!
//! - **Verb-Aware Retries**: Non-idempotent requests are only repeated when the server never acted on them
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
