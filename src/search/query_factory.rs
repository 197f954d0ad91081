// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Factory
//!
//! Maps an operator name to a constructor `(field, arguments) -> Query`.
//! Used by the named-condition path of the compiler only.
//!
//! Names are normalized by upper-casing the first character, so `"range"`
//! and `"Range"` resolve to the same constructor. Everything after the
//! first character is matched as written.
//!
//! ```rust
//! use elastic_repository::search::{Query, QueryFactory};
//! use serde_json::json;
//!
//! let mut factory = QueryFactory::new();
//! factory.register("prefixed", |field, args| Query::Match {
//!     field: field.to_string(),
//!     query: args.clone(),
//! });
//!
//! assert!(factory.contains("range"));
//! assert!(factory.contains("Prefixed"));
//! assert!(factory.build("bogus", "age", &json!({})).is_none());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::query_dsl::Query;

/// Constructor stored in the factory
pub type QueryConstructor = Arc<dyn Fn(&str, &Value) -> Query + Send + Sync>;

/// Name → constructor registry
#[derive(Clone)]
pub struct QueryFactory {
    constructors: BTreeMap<String, QueryConstructor>,
}

impl QueryFactory {
    /// Factory with the built-in `Range` and `Terms` constructors
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory.register("range", range);
        factory.register("terms", terms);
        factory
    }

    /// Factory with nothing registered
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Register (or replace) a constructor under a normalized name
    pub fn register<F>(&mut self, name: &str, constructor: F) -> &mut Self
    where
        F: Fn(&str, &Value) -> Query + Send + Sync + 'static,
    {
        self.constructors
            .insert(normalize_name(name), Arc::new(constructor));
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&QueryConstructor> {
        self.constructors.get(&normalize_name(name))
    }

    /// Look up `name` and build the sub-query, `None` if unregistered
    pub fn build(&self, name: &str, field: &str, arguments: &Value) -> Option<Query> {
        self.resolve(name).map(|ctor| ctor(field, arguments))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Registered names, normalized, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }
}

impl Default for QueryFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QueryFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryFactory")
            .field("constructors", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Upper-case the first character, leave the rest alone
pub fn normalize_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Arguments become the bounds as given; the engine validates them
fn range(field: &str, arguments: &Value) -> Query {
    Query::Range {
        field: field.to_string(),
        bounds: arguments.clone(),
    }
}

fn terms(field: &str, arguments: &Value) -> Query {
    let values = match arguments {
        Value::Array(values) => values.clone(),
        Value::Null => Vec::new(),
        other => vec![other.clone()],
    };
    Query::Terms {
        field: field.to_string(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("range"), "Range");
        assert_eq!(normalize_name("Range"), "Range");
        assert_eq!(normalize_name("rANGE"), "RANGE");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_builtin_names() {
        let factory = QueryFactory::new();
        assert_eq!(factory.names().collect::<Vec<_>>(), vec!["Range", "Terms"]);
    }

    #[test]
    fn test_range_returns_range_query() {
        let factory = QueryFactory::new();
        let query = factory.build("range", "age", &json!({"gte": 1, "lte": 10})).unwrap();

        match query {
            Query::Range { field, bounds } => {
                assert_eq!(field, "age");
                assert_eq!(bounds.get("gte"), Some(&json!(1)));
                assert_eq!(bounds.get("lte"), Some(&json!(10)));
            }
            other => panic!("Expected Range, got {:?}", other),
        }
    }

    #[test]
    fn test_range_with_empty_args() {
        let factory = QueryFactory::new();
        let query = factory.build("range", "", &json!({})).unwrap();
        assert_eq!(query, Query::Range { field: String::new(), bounds: json!({}) });
    }

    #[test]
    fn test_range_forwards_non_object_args() {
        let factory = QueryFactory::new();
        for args in [json!([1, 10]), json!("18..40"), json!(7), Value::Null] {
            let query = factory.build("range", "age", &args).unwrap();
            assert_eq!(query, Query::Range { field: "age".into(), bounds: args });
        }
    }

    #[test]
    fn test_terms_returns_terms_query() {
        let factory = QueryFactory::new();
        let query = factory.build("terms", "tags", &json!(["rust", "search"])).unwrap();
        assert_eq!(
            query,
            Query::Terms { field: "tags".into(), values: vec![json!("rust"), json!("search")] }
        );
    }

    #[test]
    fn test_terms_with_empty_args() {
        let factory = QueryFactory::new();
        let query = factory.build("terms", "", &json!([])).unwrap();
        assert_eq!(query, Query::Terms { field: String::new(), values: vec![] });

        let scalar = factory.build("terms", "id", &json!(7)).unwrap();
        assert_eq!(scalar, Query::Terms { field: "id".into(), values: vec![json!(7)] });
    }

    #[test]
    fn test_unknown_name() {
        let factory = QueryFactory::new();
        assert!(!factory.contains("bogus"));
        assert!(factory.build("bogus", "age", &json!({})).is_none());
        // Only the first letter is normalized
        assert!(!factory.contains("RANGE"));
    }

    #[test]
    fn test_register_custom() {
        let mut factory = QueryFactory::empty();
        assert!(!factory.contains("range"));

        factory.register("exists", |field, _| Query::Exists { field: field.to_string() });
        assert_eq!(
            factory.build("Exists", "email", &Value::Null),
            Some(Query::Exists { field: "email".into() })
        );
    }
}
