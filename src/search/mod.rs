// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search Query Construction
//!
//! Condition intake and bool-query compilation for Elasticsearch.
//!
//! # Architecture
//!
//! ```text
//! QueryBuilder (intake)
//!     ↓ ConditionSet (kind → constraints, arrival order)
//! QueryCompiler ←── QueryFactory (named conditions)
//!     ↓ CompiledQuery (bool tree)
//! DslTranslator → {"query": {"bool": {...}}}
//! ```
//!
//! # Clause Placement
//!
//! ```text
//! equals / in_range / exists            → must
//! terms_any / where_or / named cond.    → must (nested should group)
//! not_equals / not_in / not_in_range    → must_not
//! not_exists / mismatch                 → must_not
//! match / geo_distance / query strings  → filter
//! ```
//!
//! All of the above live in one inner bool node, attached as the last
//! member of the outer node's `filter` slot.

mod compiler;
mod conditions;
mod dsl_translator;
mod query_builder;
mod query_dsl;
mod query_factory;

pub use compiler::QueryCompiler;
pub use conditions::{effective_boost, ConditionSet, Constraint, ConstraintKind, DEFAULT_BOOST};
pub use dsl_translator::DslTranslator;
pub use query_builder::QueryBuilder;
pub use query_dsl::{BoolQuery, CompiledQuery, DefaultOperator, GeoPoint, Query};
pub use query_factory::{normalize_name, QueryConstructor, QueryFactory};
