// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Configuration for the finder.
//!
//! # Example
//!
//! ```
//! use elastic_repository::SearchConfig;
//!
//! // Minimal config (uses defaults)
//! let config = SearchConfig::default();
//! assert_eq!(config.doc_type, "_doc");
//! assert_eq!(config.method, "GET");
//!
//! // Full config
//! let config = SearchConfig {
//!     index: "users".into(),
//!     doc_type: "user".into(),
//!     ..Default::default()
//! };
//! ```

use serde::Deserialize;

/// Where and how compiled queries are submitted.
///
/// `index` has no useful default and must be set before searching.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchConfig {
    /// Index name, first segment of the request path
    #[serde(default)]
    pub index: String,

    /// Mapping type, second segment of the request path (default: "_doc")
    #[serde(default = "default_doc_type")]
    pub doc_type: String,

    /// HTTP method handed to the transport (default: "GET")
    #[serde(default = "default_method")]
    pub method: String,
}

fn default_doc_type() -> String { "_doc".to_string() }
fn default_method() -> String { "GET".to_string() }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index: String::new(),
            doc_type: default_doc_type(),
            method: default_method(),
        }
    }
}

impl SearchConfig {
    /// Config for `index` with default type and method
    pub fn for_index(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            ..Default::default()
        }
    }
}
