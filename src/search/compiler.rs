// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Compiler
//!
//! Folds a [`ConditionSet`] into one [`CompiledQuery`]. Every call builds a
//! fresh tree from the current store contents; nothing is kept between calls.
//!
//! # Placement
//!
//! ```text
//! query (bool)
//!  └─ filter: [ filter (bool) ]
//!                ├─ must:     equals, in_range, exists,
//!                │            (should: terms)        per terms_any
//!                │            (should: terms…)       one for all where_or
//!                │            (should: factory(..))  per named condition
//!                ├─ must_not: not_equals, not_in, not_in_range,
//!                │            not_exists, mismatch
//!                └─ filter:   match, geo_distance, simple_query_string,
//!                             query_string
//! ```
//!
//! Kinds are visited in [`ConstraintKind::ALL`] order regardless of intake
//! order, so identical stores always compile to identical trees.

use serde_json::{json, Value};
use tracing::debug;

use crate::metrics;

use super::conditions::{ConditionSet, Constraint, ConstraintKind};
use super::query_dsl::{BoolQuery, CompiledQuery, Query};
use super::query_factory::QueryFactory;

/// Stateless compiler over a condition set
pub struct QueryCompiler;

impl QueryCompiler {
    pub fn compile(conditions: &ConditionSet, factory: &QueryFactory) -> CompiledQuery {
        let _timer = metrics::LatencyTimer::new("compile");
        debug!(constraints = conditions.len(), "Compiling query");

        let mut query = BoolQuery::new();
        let mut filter = BoolQuery::new();

        for kind in ConstraintKind::ALL {
            let constraints = conditions.of_kind(kind);
            if kind == ConstraintKind::WhereOr {
                if !constraints.is_empty() {
                    let mut shared = BoolQuery::new();
                    for constraint in constraints {
                        Self::place(constraint, &mut shared, factory);
                    }
                    filter.add_must(shared);
                }
                continue;
            }
            for constraint in constraints {
                Self::place(constraint, &mut filter, factory);
            }
        }

        query.add_filter(filter);
        metrics::record_compile(conditions.len());
        CompiledQuery::new(query)
    }

    /// Route one constraint to its clause slot in `node`
    fn place(constraint: &Constraint, node: &mut BoolQuery, factory: &QueryFactory) {
        match constraint {
            Constraint::Equals { field, value, boost } => {
                node.add_must(Self::term(field, value, *boost));
            }
            Constraint::NotEquals { field, value, boost } => {
                node.add_must_not(Self::term(field, value, *boost));
            }
            Constraint::NotIn { field, values } => {
                node.add_must_not(Self::terms(field, values));
            }
            Constraint::InRange { field, from, to } => {
                node.add_must(Self::range(field, from, to));
            }
            Constraint::NotInRange { field, from, to } => {
                node.add_must_not(Self::range(field, from, to));
            }
            Constraint::TermsAny { field, values } => {
                let mut any = BoolQuery::new();
                any.add_should(Self::terms(field, values));
                node.add_must(any);
            }
            // `node` is the shared where_or group here
            Constraint::WhereOr { terms } => {
                for (field, values) in terms {
                    node.add_should(Self::terms(field, values));
                }
            }
            Constraint::ExistsField { field } => {
                node.add_must(Query::Exists { field: field.clone() });
            }
            Constraint::NotExistsField { field } => {
                node.add_must_not(Query::Exists { field: field.clone() });
            }
            Constraint::MatchText { field, keyword } => {
                node.add_filter(Self::matcher(field, keyword));
            }
            Constraint::MismatchText { field, keyword } => {
                node.add_must_not(Self::matcher(field, keyword));
            }
            Constraint::GeoDistance { field, location, distance } => {
                node.add_filter(Query::GeoDistance {
                    field: field.clone(),
                    location: location.clone(),
                    distance: distance.clone(),
                });
            }
            Constraint::SimpleQueryString { field, keyword } => {
                node.add_filter(Query::SimpleQueryString {
                    fields: vec![field.clone()],
                    query: keyword.clone(),
                });
            }
            Constraint::FullQueryString { fields, default_operator, keyword } => {
                node.add_filter(Query::QueryString {
                    fields: fields.clone(),
                    default_operator: default_operator.clone(),
                    query: keyword.clone(),
                });
            }
            Constraint::NamedConditionOr { field, operator, arguments } => {
                match factory.build(operator, field, arguments) {
                    Some(sub_query) => {
                        let mut any = BoolQuery::new();
                        any.add_should(sub_query);
                        node.add_must(any);
                    }
                    None => {
                        debug!(field = %field, operator = %operator, "Unknown condition operator, skipping");
                        metrics::record_condition_skipped();
                    }
                }
            }
        }
    }

    fn term(field: &str, value: &Value, boost: f64) -> Query {
        Query::Term {
            field: field.to_string(),
            value: value.clone(),
            boost,
        }
    }

    fn terms(field: &str, values: &[Value]) -> Query {
        Query::Terms {
            field: field.to_string(),
            values: values.to_vec(),
        }
    }

    fn range(field: &str, from: &Value, to: &Value) -> Query {
        Query::Range {
            field: field.to_string(),
            bounds: json!({ "from": from, "to": to }),
        }
    }

    fn matcher(field: &str, keyword: &Value) -> Query {
        Query::Match {
            field: field.to_string(),
            query: keyword.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::conditions::DEFAULT_BOOST;
    use serde_json::json;

    fn compile(set: &ConditionSet) -> CompiledQuery {
        QueryCompiler::compile(set, &QueryFactory::new())
    }

    #[test]
    fn test_empty_set() {
        let compiled = compile(&ConditionSet::new());
        assert_eq!(compiled.root().filter.len(), 1);
        assert!(compiled.filter().unwrap().is_empty());
    }

    #[test]
    fn test_slot_placement() {
        let mut set = ConditionSet::new();
        set.push(Constraint::MatchText { field: "title".into(), keyword: json!("rust") });
        set.push(Constraint::NotExistsField { field: "deleted_at".into() });
        set.push(Constraint::Equals { field: "status".into(), value: json!("active"), boost: DEFAULT_BOOST });

        let compiled = compile(&set);
        let filter = compiled.filter().unwrap();

        assert_eq!(
            filter.must,
            vec![Query::Term { field: "status".into(), value: json!("active"), boost: 1.0 }]
        );
        assert_eq!(filter.must_not, vec![Query::Exists { field: "deleted_at".into() }]);
        assert_eq!(
            filter.filter,
            vec![Query::Match { field: "title".into(), query: json!("rust") }]
        );
        assert!(filter.should.is_empty());
    }

    #[test]
    fn test_range_bounds_verbatim() {
        let mut set = ConditionSet::new();
        set.push(Constraint::InRange { field: "age".into(), from: json!(18), to: json!("") });

        let compiled = compile(&set);
        match &compiled.filter().unwrap().must[0] {
            Query::Range { field, bounds } => {
                assert_eq!(field, "age");
                assert_eq!(bounds.get("from"), Some(&json!(18)));
                assert_eq!(bounds.get("to"), Some(&json!("")));
            }
            other => panic!("Expected Range, got {:?}", other),
        }
    }

    #[test]
    fn test_where_or_shares_one_group() {
        let mut set = ConditionSet::new();
        set.push(Constraint::WhereOr { terms: vec![("a".into(), vec![json!(1)])] });
        set.push(Constraint::WhereOr { terms: vec![("b".into(), vec![json!(2)])] });

        let compiled = compile(&set);
        let must = &compiled.filter().unwrap().must;
        assert_eq!(must.len(), 1);
        assert_eq!(must[0].as_bool().unwrap().should.len(), 2);
    }

    #[test]
    fn test_unknown_named_condition_skipped() {
        let mut set = ConditionSet::new();
        set.push(Constraint::NamedConditionOr {
            field: "age".into(),
            operator: "bogus".into(),
            arguments: json!({}),
        });

        let compiled = compile(&set);
        assert!(compiled.filter().unwrap().is_empty());
    }

    #[test]
    fn test_empty_factory_skips_all_named_conditions() {
        let mut set = ConditionSet::new();
        set.push(Constraint::NamedConditionOr {
            field: "age".into(),
            operator: "range".into(),
            arguments: json!({"gte": 1}),
        });

        let compiled = QueryCompiler::compile(&set, &QueryFactory::empty());
        assert!(compiled.filter().unwrap().is_empty());
    }

    #[test]
    fn test_skipped_operators_share_one_series() {
        use metrics_util::debugging::{DebugValue, DebuggingRecorder};

        let mut set = ConditionSet::new();
        for operator in ["bogus", "other", "third"] {
            set.push(Constraint::NamedConditionOr {
                field: "age".into(),
                operator: operator.into(),
                arguments: json!({}),
            });
        }

        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        ::metrics::with_local_recorder(&recorder, || compile(&set));

        let skipped: Vec<_> = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter(|(key, _, _, _)| key.key().name() == "elastic_repository_conditions_skipped_total")
            .collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].0.key().labels().count(), 0);
        assert!(matches!(skipped[0].3, DebugValue::Counter(3)));
    }
}
