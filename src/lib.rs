//! # clove-match
//!
//! MongoDB-style query predicates for in-memory JSON documents.
//!
//! ```
//! use clove_match::{matches, Value};
//! use serde_json::json;
//!
//! let doc = Value::from(json!({"price": 10, "tags": ["a", "b"]}));
//! let query = Value::from(json!({"$or": [{"price": {"$lt": 5}}, {"price": {"$gt": 8}}]}));
//!
//! assert!(matches(&query, &doc).unwrap());
//! ```
//!
//! Built-in operators: `$and`, `$or`, `$nor`, `$not` at query level;
//! `$e`, `$ne`, `$lt`, `$lte`, `$gt`, `$gte`, `$in`, `$nin`, `$all`,
//! `$exists`, `$mod` and `$not` on fields. Anything else goes to the
//! unknown-operator handler in [`MatchOptions`].
pub mod ast;
pub mod convert;
pub mod evaluator;
pub mod options;
pub mod output;
pub mod path;
pub mod pattern;
pub mod trace;
pub mod transform;
pub mod value;

pub use ast::{FieldOp, LogicalOp};
pub use convert::{json_to_value, value_to_json};
pub use evaluator::{Evaluator, MatchError, Result};
pub use options::{MatchOptions, UnknownOperatorHandler};
pub use output::to_json;
pub use trace::{LogTracer, TraceEvent, Tracer};
pub use transform::{append_suffix, dependent_fields, dependent_fields_assoc};
pub use value::Value;

/// Evaluates `query` against `document` with default options.
pub fn matches(query: &Value, document: &Value) -> Result<bool> {
    Evaluator::new().matches(query, document)
}

/// Evaluates `query` against `document` with the given options.
pub fn matches_with(query: &Value, document: &Value, options: &MatchOptions) -> Result<bool> {
    Evaluator::with_options(options.clone()).matches(query, document)
}
