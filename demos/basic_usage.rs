//! Basic usage of elastic-repository
//!
//! Builds a query from mixed constraints, prints the compiled document, and
//! submits it through a transport that echoes instead of calling a cluster.
//!
//! Run with: `cargo run --example basic_usage`

use async_trait::async_trait;
use serde_json::{json, Value};

use elastic_repository::{
    DefaultOperator, Finder, GeoPoint, QueryBuilder, SearchConfig, SearchError, SearchTransport,
};

/// Prints every request and answers with an empty hit list
struct EchoTransport;

#[async_trait]
impl SearchTransport for EchoTransport {
    async fn request(&self, path: &str, method: &str, body: &Value) -> Result<Value, SearchError> {
        println!("   → {} {}", method, path);
        println!("{}", serde_json::to_string_pretty(body)?);
        Ok(json!({"hits": {"total": 0, "hits": []}}))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "elastic_repository=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();

    println!("\n📦 Building query...");
    let mut builder = QueryBuilder::new();
    builder
        .add_equals("status", "published")
        .add_not_in("author", ["spam-bot"])
        .add_in_range("published_at", "2024-01-01", "")
        .add_terms_any("tags", ["rust", "search"])
        .add_where_or([("lang", vec!["en", "fr"]), ("translated", vec!["true"])])
        .add_exists("title")
        .add_mismatch("title", "draft")
        .add_geo_distance("venue", GeoPoint::new(48.8566, 2.3522), "25km")
        .add_query_string(["title", "body"], Some(DefaultOperator::And), "async runtime")
        .add_named_condition_or("rating", "range", json!({"gte": 4}))
        .add_named_condition_or("rating", "histogram", json!({}));

    println!("   └─ {} constraints stored", builder.len());

    println!("\n🔎 Searching...");
    let finder = Finder::new(EchoTransport, SearchConfig::for_index("articles"));
    let response = finder.find_with(&builder).await?;
    println!("   └─ response: {}", response);

    println!("\n♻️  Resetting...");
    builder.reset();
    println!("   └─ empty query: {}", builder.compile().to_request());

    Ok(())
}
