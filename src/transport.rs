// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Transport seam.
//!
//! The library ships no HTTP client. Callers implement [`SearchTransport`]
//! over whatever client they already use.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Search rejected by engine ({status}): {reason}")]
    Rejected { status: u16, reason: String },
    #[error("Invalid search config: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Sends a request body to a path on the search cluster
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// `path` is relative, e.g. `users/_doc/_search`. Returns the raw
    /// response document.
    async fn request(&self, path: &str, method: &str, body: &Value) -> Result<Value, SearchError>;
}

#[async_trait]
impl<T: SearchTransport + ?Sized> SearchTransport for std::sync::Arc<T> {
    async fn request(&self, path: &str, method: &str, body: &Value) -> Result<Value, SearchError> {
        (**self).request(path, method, body).await
    }
}
