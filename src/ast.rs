//! # Query grammar
//!
//! Queries are plain [`Value`](crate::Value) trees. This module gives the
//! keys of those trees a type, so the evaluator and the tree utilities agree
//! on what every entry means.
//!
//! ## Key shapes
//!
//! ```text
//! { "$or": [ { "price": { "$lt": 5 } }, { "tags": "sale" } ] }
//!   ^^^^^    ^^^^^^^^^   ^^^^^            ^^^^^^
//!   logical  field       field operator   field (implicit $e)
//! ```
//!
//! - **Operator keys** start with `$`. At query level they are `$and`, `$or`,
//!   `$nor` and `$not`; inside a field's operator map they are the
//!   [`FieldOp`] operators.
//! - **Field keys** are everything else: dot-delimited paths such as
//!   `user.address.city`.
//! - **Positional indices** are the entries of an array node, e.g. the
//!   sub-queries listed under `$or`.
//!
//! ## Logical context
//!
//! The evaluator threads a [`LogicalOp`] through recursion. The root of every
//! query is evaluated under `$and`; entering `$or` or `$nor` switches the
//! combinator for that operator's sub-queries only.
pub mod keys;
pub mod operators;

pub use keys::{Entries, Key, KeyKind, entries};
pub use operators::{FieldOp, LogicalOp, SIGIL, is_operator};
