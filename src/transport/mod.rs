//! Transport module
//!
//! The seam between the cursor and the network. A cursor only needs three
//! verbs from its connection: `post` to open a cursor, `put` to pull the
//! next batch and `delete` to drop the server-side resource.
//!
//! # Overview
//!
//! [`Transport`] is the trait the cursor talks to; [`HttpTransport`] is the
//! reqwest-backed implementation built on [`crate::http::HttpClient`].

mod http;
mod types;

pub use http::HttpTransport;
pub use types::{Transport, TransportResponse};
