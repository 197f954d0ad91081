// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query DSL - bool query tree
//!
//! The compiled form of a [`QueryBuilder`](super::QueryBuilder): leaf queries
//! nested inside [`BoolQuery`] nodes with four clause slots.
//!
//! ```text
//! bool
//!  ├─ must      → all must match, contributes to score
//!  ├─ must_not  → none may match
//!  ├─ should    → at least one should match
//!  └─ filter    → must match, no scoring
//! ```
//!
//! The tree is engine-agnostic; [`DslTranslator`](super::DslTranslator)
//! renders it as an Elasticsearch query document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dsl_translator::DslTranslator;

/// Default operator between terms of a `query_string` query
///
/// Any spelling other than `"AND"` / `"OR"` is kept in [`Other`](Self::Other)
/// and sent as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DefaultOperator {
    And,
    Or,
    Other(String),
}

impl DefaultOperator {
    /// Keyword as sent to the engine
    pub fn as_str(&self) -> &str {
        match self {
            DefaultOperator::And => "AND",
            DefaultOperator::Or => "OR",
            DefaultOperator::Other(raw) => raw,
        }
    }
}

impl From<String> for DefaultOperator {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "AND" => DefaultOperator::And,
            "OR" => DefaultOperator::Or,
            _ => DefaultOperator::Other(raw),
        }
    }
}

impl From<&str> for DefaultOperator {
    fn from(raw: &str) -> Self {
        DefaultOperator::from(raw.to_string())
    }
}

impl From<DefaultOperator> for String {
    fn from(op: DefaultOperator) -> Self {
        match op {
            DefaultOperator::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Latitude/longitude pair for geo queries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoPoint> for Value {
    fn from(point: GeoPoint) -> Self {
        serde_json::json!({ "lat": point.lat, "lon": point.lon })
    }
}

/// A node in the compiled query tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    /// Exact single-value match: `{"term": {field: {value, boost}}}`
    Term {
        field: String,
        value: Value,
        boost: f64,
    },
    /// Multi-value match, any of: `{"terms": {field: [..]}}`
    Terms { field: String, values: Vec<Value> },
    /// Bounds passed through verbatim: `{"range": {field: bounds}}`
    Range { field: String, bounds: Value },
    /// Field presence: `{"exists": {"field": field}}`
    Exists { field: String },
    /// Analyzed full-text match
    Match { field: String, query: Value },
    /// Documents within `distance` of `location`
    GeoDistance {
        field: String,
        location: Value,
        distance: String,
    },
    /// Lenient search syntax scoped to the given fields
    SimpleQueryString { fields: Vec<String>, query: String },
    /// Full Lucene search syntax
    QueryString {
        fields: Vec<String>,
        default_operator: Option<DefaultOperator>,
        query: String,
    },
    /// Nested boolean group
    Bool(BoolQuery),
}

impl Query {
    /// Borrow the nested group, if this is one
    pub fn as_bool(&self) -> Option<&BoolQuery> {
        match self {
            Query::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl From<BoolQuery> for Query {
    fn from(b: BoolQuery) -> Self {
        Query::Bool(b)
    }
}

/// Boolean combination of queries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoolQuery {
    pub must: Vec<Query>,
    pub must_not: Vec<Query>,
    pub should: Vec<Query>,
    pub filter: Vec<Query>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_must(&mut self, query: impl Into<Query>) -> &mut Self {
        self.must.push(query.into());
        self
    }

    pub fn add_must_not(&mut self, query: impl Into<Query>) -> &mut Self {
        self.must_not.push(query.into());
        self
    }

    pub fn add_should(&mut self, query: impl Into<Query>) -> &mut Self {
        self.should.push(query.into());
        self
    }

    pub fn add_filter(&mut self, query: impl Into<Query>) -> &mut Self {
        self.filter.push(query.into());
        self
    }

    /// True when no slot holds a member
    pub fn is_empty(&self) -> bool {
        self.must.is_empty()
            && self.must_not.is_empty()
            && self.should.is_empty()
            && self.filter.is_empty()
    }

    /// Total members across all four slots (not recursive)
    pub fn clause_count(&self) -> usize {
        self.must.len() + self.must_not.len() + self.should.len() + self.filter.len()
    }
}

/// Root of a compiled query, owned by the caller
///
/// The outer node's `filter` slot always ends with the inner filter group
/// that holds every compiled constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledQuery {
    root: BoolQuery,
}

impl CompiledQuery {
    pub(crate) fn new(root: BoolQuery) -> Self {
        Self { root }
    }

    /// The outer bool node
    pub fn root(&self) -> &BoolQuery {
        &self.root
    }

    /// The inner filter group holding the compiled constraints
    pub fn filter(&self) -> Option<&BoolQuery> {
        self.root.filter.last().and_then(Query::as_bool)
    }

    /// Render as an engine query clause: `{"bool": {...}}`
    pub fn to_dsl(&self) -> Value {
        DslTranslator::translate(&self.root)
    }

    /// Render as a search request body: `{"query": {"bool": {...}}}`
    pub fn to_request(&self) -> Value {
        DslTranslator::translate_request(self)
    }
}

impl From<CompiledQuery> for Query {
    fn from(compiled: CompiledQuery) -> Self {
        Query::Bool(compiled.root)
    }
}
