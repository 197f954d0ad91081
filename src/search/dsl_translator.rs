// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! DSL Translator
//!
//! Translates the query tree to the Elasticsearch query DSL.
//!
//! # Generated Shapes
//!
//! ```text
//! {"bool": {"must": [..], "must_not": [..], "should": [..], "filter": [..]}}
//! {"term": {"status": {"value": "active", "boost": 1.0}}}
//! {"terms": {"tags": ["rust", "search"]}}
//! {"range": {"age": {"from": 18, "to": ""}}}
//! {"exists": {"field": "email"}}
//! {"match": {"title": "rust"}}
//! {"geo_distance": {"distance": "10km", "location": {"lat": 51.5, "lon": -0.12}}}
//! {"simple_query_string": {"query": "rust -java", "fields": ["body"]}}
//! {"query_string": {"query": "a b", "fields": ["title"], "default_operator": "AND"}}
//! ```
//!
//! Empty clause slots are omitted, so an empty group renders as `{"bool": {}}`.

use serde_json::{json, Map, Value};

use super::query_dsl::{BoolQuery, CompiledQuery, Query};

/// Query DSL translator
pub struct DslTranslator;

impl DslTranslator {
    /// Translate a bool node to `{"bool": {...}}`
    pub fn translate(query: &BoolQuery) -> Value {
        let mut clauses = Map::new();
        Self::push_clause(&mut clauses, "must", &query.must);
        Self::push_clause(&mut clauses, "must_not", &query.must_not);
        Self::push_clause(&mut clauses, "should", &query.should);
        Self::push_clause(&mut clauses, "filter", &query.filter);
        json!({ "bool": clauses })
    }

    /// Translate to a full search request body: `{"query": {...}}`
    pub fn translate_request(query: &CompiledQuery) -> Value {
        json!({ "query": Self::translate(query.root()) })
    }

    /// Translate any node
    pub fn translate_node(node: &Query) -> Value {
        match node {
            Query::Term { field, value, boost } => {
                json!({ "term": { field.as_str(): { "value": value, "boost": boost } } })
            }
            Query::Terms { field, values } => {
                json!({ "terms": { field.as_str(): values } })
            }
            Query::Range { field, bounds } => {
                json!({ "range": { field.as_str(): bounds } })
            }
            Query::Exists { field } => {
                json!({ "exists": { "field": field } })
            }
            Query::Match { field, query } => {
                json!({ "match": { field.as_str(): query } })
            }
            Query::GeoDistance { field, location, distance } => {
                let mut body = Map::new();
                body.insert("distance".to_string(), json!(distance));
                body.insert(field.clone(), location.clone());
                json!({ "geo_distance": body })
            }
            Query::SimpleQueryString { fields, query } => {
                json!({ "simple_query_string": { "query": query, "fields": fields } })
            }
            Query::QueryString { fields, default_operator, query } => {
                let mut body = Map::new();
                body.insert("query".to_string(), json!(query));
                body.insert("fields".to_string(), json!(fields));
                // Unset means the engine default applies
                if let Some(op) = default_operator {
                    body.insert("default_operator".to_string(), json!(op.as_str()));
                }
                json!({ "query_string": body })
            }
            Query::Bool(inner) => Self::translate(inner),
        }
    }

    fn push_clause(clauses: &mut Map<String, Value>, name: &str, members: &[Query]) {
        if members.is_empty() {
            return;
        }
        let rendered: Vec<Value> = members.iter().map(Self::translate_node).collect();
        clauses.insert(name.to_string(), Value::Array(rendered));
    }
}
