// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Builder - fluent condition intake
//!
//! Collects constraints one at a time and compiles them into a single bool
//! query on demand. Intake never fails; malformed input is forwarded as-is
//! and only the engine can reject it.
//!
//! # Example
//!
//! ```rust
//! use elastic_repository::search::{DefaultOperator, GeoPoint, QueryBuilder};
//! use serde_json::json;
//!
//! let mut builder = QueryBuilder::new();
//! builder
//!     .add_equals("status", "active")
//!     .add_in_range("age", 25, 40)
//!     .add_terms_any("tags", ["rust", "search"])
//!     .add_not_exists("deleted_at")
//!     .add_geo_distance("location", GeoPoint::new(51.5, -0.12), "10km")
//!     .add_query_string(["title", "body"], Some(DefaultOperator::And), "fast engine")
//!     .add_named_condition_or("price", "range", json!({"lte": 100}));
//!
//! let query = builder.compile();
//! let body = query.to_request();
//! assert!(body["query"]["bool"]["filter"].is_array());
//!
//! builder.reset();
//! assert!(builder.compile().filter().unwrap().is_empty());
//! ```

use serde_json::Value;
use tracing::debug;

use super::compiler::QueryCompiler;
use super::conditions::{effective_boost, ConditionSet, Constraint};
use super::query_dsl::{CompiledQuery, DefaultOperator};
use super::query_factory::QueryFactory;

/// Builder for bool queries
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    conditions: ConditionSet,
    factory: QueryFactory,
}

impl QueryBuilder {
    /// Create a builder with the default query factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder that resolves named conditions against `factory`
    pub fn with_factory(factory: QueryFactory) -> Self {
        Self {
            conditions: ConditionSet::new(),
            factory,
        }
    }

    /// Field equals value, boost 1.0
    pub fn add_equals(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.push_equals(field.into(), value.into(), None)
    }

    /// Field equals value with boost; a zero boost becomes 1.0
    pub fn add_equals_boosted(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
        boost: f64,
    ) -> &mut Self {
        self.push_equals(field.into(), value.into(), Some(boost))
    }

    /// Field must not equal value
    pub fn add_not_equals(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.push_not_equals(field.into(), value.into(), None)
    }

    pub fn add_not_equals_boosted(
        &mut self,
        field: impl Into<String>,
        value: impl Into<Value>,
        boost: f64,
    ) -> &mut Self {
        self.push_not_equals(field.into(), value.into(), Some(boost))
    }

    /// Field must not match any of `values`
    pub fn add_not_in<I, T>(&mut self, field: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.push(Constraint::NotIn {
            field: field.into(),
            values: collect_values(values),
        })
    }

    /// Inclusive range; pass `""` for an open side
    pub fn add_in_range(
        &mut self,
        field: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> &mut Self {
        self.push(Constraint::InRange {
            field: field.into(),
            from: from.into(),
            to: to.into(),
        })
    }

    pub fn add_not_in_range(
        &mut self,
        field: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> &mut Self {
        self.push(Constraint::NotInRange {
            field: field.into(),
            from: from.into(),
            to: to.into(),
        })
    }

    /// Field must match at least one of `values`. Each call is its own group.
    pub fn add_terms_any<I, T>(&mut self, field: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.push(Constraint::TermsAny {
            field: field.into(),
            values: collect_values(values),
        })
    }

    /// Bulk OR: at least one `(field, values)` entry must match.
    ///
    /// All calls feed the same shared group, entries in arrival order. An
    /// empty mapping still attaches an empty group.
    pub fn add_where_or<I, K, V, T>(&mut self, mapping: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let terms = mapping
            .into_iter()
            .map(|(field, values)| (field.into(), collect_values(values)))
            .collect();
        self.push(Constraint::WhereOr { terms })
    }

    pub fn add_exists(&mut self, field: impl Into<String>) -> &mut Self {
        self.push(Constraint::ExistsField { field: field.into() })
    }

    pub fn add_not_exists(&mut self, field: impl Into<String>) -> &mut Self {
        self.push(Constraint::NotExistsField { field: field.into() })
    }

    /// Full-text match, non-scoring
    pub fn add_match(&mut self, field: impl Into<String>, keyword: impl Into<Value>) -> &mut Self {
        self.push(Constraint::MatchText {
            field: field.into(),
            keyword: keyword.into(),
        })
    }

    /// Full-text must not match
    pub fn add_mismatch(&mut self, field: impl Into<String>, keyword: impl Into<Value>) -> &mut Self {
        self.push(Constraint::MismatchText {
            field: field.into(),
            keyword: keyword.into(),
        })
    }

    /// Within `distance` (e.g. `"10km"`) of `location`
    pub fn add_geo_distance(
        &mut self,
        field: impl Into<String>,
        location: impl Into<Value>,
        distance: impl Into<String>,
    ) -> &mut Self {
        self.push(Constraint::GeoDistance {
            field: field.into(),
            location: location.into(),
            distance: distance.into(),
        })
    }

    pub fn add_simple_query_string(
        &mut self,
        field: impl Into<String>,
        keyword: impl Into<String>,
    ) -> &mut Self {
        self.push(Constraint::SimpleQueryString {
            field: field.into(),
            keyword: keyword.into(),
        })
    }

    /// Lucene query string over `fields`; `None` leaves the engine's
    /// default operator in place. `DefaultOperator::from("...")` forwards
    /// any other spelling unchanged.
    pub fn add_query_string<I, S>(
        &mut self,
        fields: I,
        default_operator: Option<DefaultOperator>,
        keyword: impl Into<String>,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Constraint::FullQueryString {
            fields: fields.into_iter().map(Into::into).collect(),
            default_operator,
            keyword: keyword.into(),
        })
    }

    /// Required single-member OR group built by the factory constructor
    /// named `operator`. Unknown names are dropped at compile time.
    pub fn add_named_condition_or(
        &mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        arguments: impl Into<Value>,
    ) -> &mut Self {
        self.push(Constraint::NamedConditionOr {
            field: field.into(),
            operator: operator.into(),
            arguments: arguments.into(),
        })
    }

    /// Drop every stored constraint
    pub fn reset(&mut self) -> &mut Self {
        debug!(cleared = self.conditions.len(), "Resetting query builder");
        self.conditions.clear();
        self
    }

    /// Compile the current constraints. Does not clear them.
    pub fn compile(&self) -> CompiledQuery {
        QueryCompiler::compile(&self.conditions, &self.factory)
    }

    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    pub fn factory(&self) -> &QueryFactory {
        &self.factory
    }

    /// Mutable access, e.g. to register extra constructors
    pub fn factory_mut(&mut self) -> &mut QueryFactory {
        &mut self.factory
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn push_equals(&mut self, field: String, value: Value, boost: Option<f64>) -> &mut Self {
        self.push(Constraint::Equals {
            field,
            value,
            boost: effective_boost(boost),
        })
    }

    fn push_not_equals(&mut self, field: String, value: Value, boost: Option<f64>) -> &mut Self {
        self.push(Constraint::NotEquals {
            field,
            value,
            boost: effective_boost(boost),
        })
    }

    fn push(&mut self, constraint: Constraint) -> &mut Self {
        self.conditions.push(constraint);
        self
    }
}

fn collect_values<I, T>(values: I) -> Vec<Value>
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    values.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::conditions::ConstraintKind;
    use crate::search::query_dsl::Query;
    use serde_json::json;

    #[test]
    fn test_intake_is_stored_unmodified() {
        let mut builder = QueryBuilder::new();
        builder.add_not_in("role", ["guest", "banned"]);

        assert_eq!(
            builder.conditions().of_kind(ConstraintKind::NotIn),
            &[Constraint::NotIn {
                field: "role".into(),
                values: vec![json!("guest"), json!("banned")],
            }]
        );
    }

    #[test]
    fn test_boost_coerced_at_intake() {
        let mut builder = QueryBuilder::new();
        builder.add_equals_boosted("f", "v", 0.0);
        builder.add_not_equals_boosted("g", "w", 3.0);

        match &builder.conditions().of_kind(ConstraintKind::Equals)[0] {
            Constraint::Equals { boost, .. } => assert_eq!(*boost, 1.0),
            other => panic!("Expected Equals, got {:?}", other),
        }
        match &builder.conditions().of_kind(ConstraintKind::NotEquals)[0] {
            Constraint::NotEquals { boost, .. } => assert_eq!(*boost, 3.0),
            other => panic!("Expected NotEquals, got {:?}", other),
        }
    }

    #[test]
    fn test_where_or_preserves_entry_order() {
        let mut builder = QueryBuilder::new();
        builder.add_where_or(vec![("b", vec![1]), ("a", vec![2, 3])]);

        assert_eq!(
            builder.conditions().of_kind(ConstraintKind::WhereOr),
            &[Constraint::WhereOr {
                terms: vec![
                    ("b".to_string(), vec![json!(1)]),
                    ("a".to_string(), vec![json!(2), json!(3)]),
                ],
            }]
        );
    }

    #[test]
    fn test_named_condition_resolved_at_compile_time() {
        let mut builder = QueryBuilder::with_factory(QueryFactory::empty());
        builder.add_named_condition_or("title", "prefix", json!("ru"));

        // Stored even though nothing resolves it yet
        assert_eq!(builder.len(), 1);
        assert!(builder.compile().filter().unwrap().is_empty());

        builder.factory_mut().register("prefix", |field, args| Query::Match {
            field: field.to_string(),
            query: args.clone(),
        });
        let filter = builder.compile().filter().unwrap().clone();
        assert_eq!(filter.must.len(), 1);
    }

    #[test]
    fn test_query_string_without_operator() {
        let mut builder = QueryBuilder::new();
        builder.add_query_string(["title"], None, "rust");

        assert_eq!(
            builder.compile().filter().unwrap().filter,
            vec![Query::QueryString {
                fields: vec!["title".into()],
                default_operator: None,
                query: "rust".into(),
            }]
        );
    }

    #[test]
    fn test_reset_clears() {
        let mut builder = QueryBuilder::new();
        builder.add_exists("a").add_match("b", "c");
        assert_eq!(builder.len(), 2);

        builder.reset();
        assert!(builder.is_empty());
    }

    #[test]
    fn test_null_value_passed_through() {
        let mut builder = QueryBuilder::new();
        builder.add_equals("", Value::Null);

        assert_eq!(
            builder.compile().filter().unwrap().must,
            vec![Query::Term { field: String::new(), value: Value::Null, boost: 1.0 }]
        );
    }
}
