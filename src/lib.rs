// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! # Elastic Repository
//!
//! Fluent condition intake compiled into a single Elasticsearch bool query.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      QueryBuilder                           │
//! │  • add_equals / add_in_range / add_terms_any / add_match …  │
//! │  • ConditionSet: kind → constraints, arrival order kept     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ compile()
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      QueryCompiler                          │
//! │  • Fixed kind order, pure fold, no hidden state             │
//! │  • QueryFactory resolves named conditions                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ CompiledQuery
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                DslTranslator / Finder                       │
//! │  • {"query": {"bool": {...}}}                               │
//! │  • <index>/<type>/_search via a caller-supplied transport   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use elastic_repository::QueryBuilder;
//! use serde_json::json;
//!
//! let mut builder = QueryBuilder::new();
//! builder
//!     .add_equals("status", "active")
//!     .add_not_in("role", ["guest"])
//!     .add_where_or([("city", vec!["Paris", "Lyon"]), ("remote", vec!["yes"])]);
//!
//! let body = builder.compile().to_request();
//! assert_eq!(
//!     body["query"]["bool"]["filter"][0]["bool"]["must"][0],
//!     json!({"term": {"status": {"value": "active", "boost": 1.0}}})
//! );
//! ```
//!
//! ## Modules
//!
//! - [`search`]: condition intake, compilation, DSL rendering
//! - [`finder`]: request path and submission
//! - [`transport`]: the client seam and [`SearchError`]
//! - [`config`]: [`SearchConfig`]
//! - [`metrics`]: compile and search instrumentation

pub mod config;
pub mod finder;
pub mod metrics;
pub mod search;
pub mod transport;

pub use config::SearchConfig;
pub use finder::{request_path_for, Finder};
pub use metrics::LatencyTimer;
pub use search::{
    BoolQuery, CompiledQuery, ConditionSet, Constraint, ConstraintKind, DefaultOperator,
    DslTranslator, GeoPoint, Query, QueryBuilder, QueryCompiler, QueryFactory,
};
pub use transport::{SearchError, SearchTransport};
