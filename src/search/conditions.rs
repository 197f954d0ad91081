// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Condition Store
//!
//! Raw constraints as the caller submitted them, grouped by kind. Nothing
//! here compiles; [`QueryCompiler`](super::QueryCompiler) reads the set in
//! [`ConstraintKind::ALL`] order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::query_dsl::DefaultOperator;

/// Boost used when none is given. Zero collapses to this as well.
pub const DEFAULT_BOOST: f64 = 1.0;

/// Coerce a falsy boost (unset or zero) to [`DEFAULT_BOOST`]
pub fn effective_boost(boost: Option<f64>) -> f64 {
    match boost {
        Some(b) if b != 0.0 => b,
        _ => DEFAULT_BOOST,
    }
}

/// Constraint kinds, declared in compilation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConstraintKind {
    Equals,
    NotEquals,
    NotIn,
    InRange,
    NotInRange,
    TermsAny,
    WhereOr,
    ExistsField,
    NotExistsField,
    MatchText,
    MismatchText,
    GeoDistance,
    SimpleQueryString,
    FullQueryString,
    NamedConditionOr,
}

impl ConstraintKind {
    /// Every kind, in the order the compiler visits them
    pub const ALL: [ConstraintKind; 15] = [
        ConstraintKind::Equals,
        ConstraintKind::NotEquals,
        ConstraintKind::NotIn,
        ConstraintKind::InRange,
        ConstraintKind::NotInRange,
        ConstraintKind::TermsAny,
        ConstraintKind::WhereOr,
        ConstraintKind::ExistsField,
        ConstraintKind::NotExistsField,
        ConstraintKind::MatchText,
        ConstraintKind::MismatchText,
        ConstraintKind::GeoDistance,
        ConstraintKind::SimpleQueryString,
        ConstraintKind::FullQueryString,
        ConstraintKind::NamedConditionOr,
    ];

    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Equals => "equals",
            ConstraintKind::NotEquals => "not_equals",
            ConstraintKind::NotIn => "not_in",
            ConstraintKind::InRange => "in_range",
            ConstraintKind::NotInRange => "not_in_range",
            ConstraintKind::TermsAny => "terms_any",
            ConstraintKind::WhereOr => "where_or",
            ConstraintKind::ExistsField => "exists",
            ConstraintKind::NotExistsField => "not_exists",
            ConstraintKind::MatchText => "match",
            ConstraintKind::MismatchText => "mismatch",
            ConstraintKind::GeoDistance => "geo_distance",
            ConstraintKind::SimpleQueryString => "simple_query_string",
            ConstraintKind::FullQueryString => "query_string",
            ConstraintKind::NamedConditionOr => "named_condition_or",
        }
    }
}

/// One condition as submitted, unvalidated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    Equals {
        field: String,
        value: Value,
        boost: f64,
    },
    NotEquals {
        field: String,
        value: Value,
        boost: f64,
    },
    NotIn {
        field: String,
        values: Vec<Value>,
    },
    /// Empty-string bounds are unbounded on that side
    InRange {
        field: String,
        from: Value,
        to: Value,
    },
    NotInRange {
        field: String,
        from: Value,
        to: Value,
    },
    TermsAny {
        field: String,
        values: Vec<Value>,
    },
    /// One bulk OR mapping; every entry joins the single shared group
    WhereOr {
        terms: Vec<(String, Vec<Value>)>,
    },
    ExistsField {
        field: String,
    },
    NotExistsField {
        field: String,
    },
    MatchText {
        field: String,
        keyword: Value,
    },
    MismatchText {
        field: String,
        keyword: Value,
    },
    GeoDistance {
        field: String,
        location: Value,
        distance: String,
    },
    SimpleQueryString {
        field: String,
        keyword: String,
    },
    FullQueryString {
        fields: Vec<String>,
        default_operator: Option<DefaultOperator>,
        keyword: String,
    },
    /// Resolved against the query factory at compile time
    NamedConditionOr {
        field: String,
        operator: String,
        arguments: Value,
    },
}

impl Constraint {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Equals { .. } => ConstraintKind::Equals,
            Constraint::NotEquals { .. } => ConstraintKind::NotEquals,
            Constraint::NotIn { .. } => ConstraintKind::NotIn,
            Constraint::InRange { .. } => ConstraintKind::InRange,
            Constraint::NotInRange { .. } => ConstraintKind::NotInRange,
            Constraint::TermsAny { .. } => ConstraintKind::TermsAny,
            Constraint::WhereOr { .. } => ConstraintKind::WhereOr,
            Constraint::ExistsField { .. } => ConstraintKind::ExistsField,
            Constraint::NotExistsField { .. } => ConstraintKind::NotExistsField,
            Constraint::MatchText { .. } => ConstraintKind::MatchText,
            Constraint::MismatchText { .. } => ConstraintKind::MismatchText,
            Constraint::GeoDistance { .. } => ConstraintKind::GeoDistance,
            Constraint::SimpleQueryString { .. } => ConstraintKind::SimpleQueryString,
            Constraint::FullQueryString { .. } => ConstraintKind::FullQueryString,
            Constraint::NamedConditionOr { .. } => ConstraintKind::NamedConditionOr,
        }
    }
}

/// Constraints grouped by kind, arrival order kept within each kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionSet {
    by_kind: BTreeMap<ConstraintKind, Vec<Constraint>>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constraint to the end of its kind's list
    pub fn push(&mut self, constraint: Constraint) {
        self.by_kind.entry(constraint.kind()).or_default().push(constraint);
    }

    /// Constraints of one kind, in arrival order
    pub fn of_kind(&self, kind: ConstraintKind) -> &[Constraint] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All constraints, kinds in compilation order
    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.by_kind.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.by_kind.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn exists(field: &str) -> Constraint {
        Constraint::ExistsField { field: field.into() }
    }

    fn equals(field: &str, value: Value) -> Constraint {
        Constraint::Equals { field: field.into(), value, boost: DEFAULT_BOOST }
    }

    #[test]
    fn test_effective_boost() {
        assert_eq!(effective_boost(None), 1.0);
        assert_eq!(effective_boost(Some(0.0)), 1.0);
        assert_eq!(effective_boost(Some(-0.0)), 1.0);
        assert_eq!(effective_boost(Some(2.5)), 2.5);
        assert_eq!(effective_boost(Some(-1.0)), -1.0);
    }

    #[test]
    fn test_kind_order_matches_declaration() {
        let mut sorted = ConstraintKind::ALL;
        sorted.sort();
        assert_eq!(sorted, ConstraintKind::ALL);
    }

    #[test]
    fn test_kinds_do_not_interleave() {
        let mut set = ConditionSet::new();
        set.push(exists("a"));
        set.push(equals("b", json!(1)));
        set.push(exists("c"));
        set.push(equals("d", json!(2)));

        let order: Vec<ConstraintKind> = set.iter().map(Constraint::kind).collect();
        assert_eq!(
            order,
            vec![
                ConstraintKind::Equals,
                ConstraintKind::Equals,
                ConstraintKind::ExistsField,
                ConstraintKind::ExistsField,
            ]
        );
    }

    #[test]
    fn test_arrival_order_within_kind() {
        let mut set = ConditionSet::new();
        set.push(exists("z"));
        set.push(exists("a"));
        set.push(exists("m"));

        assert_eq!(
            set.of_kind(ConstraintKind::ExistsField),
            &[exists("z"), exists("a"), exists("m")]
        );
        assert!(set.of_kind(ConstraintKind::Equals).is_empty());
    }

    #[test]
    fn test_len_and_clear() {
        let mut set = ConditionSet::new();
        assert!(set.is_empty());
        set.push(exists("a"));
        set.push(equals("b", Value::Null));
        assert_eq!(set.len(), 2);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
