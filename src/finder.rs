// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Finder
//!
//! Submits compiled queries through a [`SearchTransport`].
//!
//! ```text
//! find(query)
//!       │
//!       ├─→ path = {index}/{doc_type}/_search
//!       ├─→ body = {"query": {"bool": {...}}}
//!       └─→ transport.request(path, method, body) → raw response
//! ```
//!
//! The response is returned untouched; hit parsing belongs to the caller.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::metrics;
use crate::search::{CompiledQuery, QueryBuilder};
use crate::transport::{SearchError, SearchTransport};

/// Build a search path: `{index}/{doc_type}/_search`
pub fn request_path_for(index: &str, doc_type: &str) -> String {
    format!("{}/{}/_search", index, doc_type)
}

pub struct Finder<T> {
    transport: T,
    config: SearchConfig,
}

impl<T: SearchTransport> Finder<T> {
    pub fn new(transport: T, config: SearchConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Path this finder searches
    pub fn request_path(&self) -> String {
        request_path_for(&self.config.index, &self.config.doc_type)
    }

    /// Submit a compiled query and return the raw response document
    pub async fn find(&self, query: &CompiledQuery) -> Result<Value, SearchError> {
        if self.config.index.is_empty() {
            metrics::record_search_query("rejected");
            return Err(SearchError::Config("index name is empty".into()));
        }

        let _timer = metrics::LatencyTimer::new("search");
        let path = self.request_path();
        let body = query.to_request();
        debug!(path = %path, method = %self.config.method, "Search request");

        match self.transport.request(&path, &self.config.method, &body).await {
            Ok(response) => {
                metrics::record_search_query("success");
                Ok(response)
            }
            Err(e) => {
                warn!(path = %path, error = %e, "Search request failed");
                metrics::record_search_query("error");
                Err(e)
            }
        }
    }

    /// Compile `builder` and submit it. The builder is left as-is.
    pub async fn find_with(&self, builder: &QueryBuilder) -> Result<Value, SearchError> {
        self.find(&builder.compile()).await
    }
}
