//! Structural rewrites and analysis of queries.
//!
//! These walk the same grammar as the evaluator but never look at a
//! document.

use indexmap::{IndexMap, IndexSet};

use crate::{
    ast::{entries, is_operator},
    path::PATH_SEPARATOR,
    value::Value,
};

/// Appends `suffix` as a trailing path segment to every field key.
///
/// Operator keys and array positions are left alone, but their values are
/// rewritten too, so fields nested under `$or`, `$not` and friends are
/// rescoped as well. Entry order is preserved. Use it to run a query written
/// against a sub-object on the document that contains it.
///
/// # Examples
///
/// ```
/// use clove_match::{Value, transform::append_suffix};
/// use serde_json::json;
///
/// let query = Value::from(json!({"age": {"$gt": 5}}));
/// let rescoped = append_suffix(&query, "child");
/// assert_eq!(rescoped, Value::from(json!({"age.child": {"$gt": 5}})));
/// ```
pub fn append_suffix(query: &Value, suffix: &str) -> Value {
    match query {
        Value::Object(obj) => Value::Object(
            obj.iter()
                .map(|(key, value)| {
                    let value = append_suffix(value, suffix);
                    if is_operator(key) {
                        (key.clone(), value)
                    } else {
                        (format!("{}{}{}", key, PATH_SEPARATOR, suffix), value)
                    }
                })
                .collect(),
        ),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| append_suffix(v, suffix)).collect()),
        scalar => scalar.clone(),
    }
}

/// The fields a query reads, deduplicated, in first-seen order.
///
/// Nested fields are listed before the key that contains them.
///
/// # Examples
///
/// ```
/// use clove_match::{Value, transform::dependent_fields};
/// use serde_json::json;
///
/// let query = Value::from(json!({"$and": [{"name": "x"}, {"age": {"$gt": 1}}]}));
/// let fields: Vec<_> = dependent_fields(&query).into_iter().collect();
/// assert_eq!(fields, vec!["name", "age"]);
/// ```
pub fn dependent_fields(query: &Value) -> IndexSet<String> {
    let mut fields = IndexSet::new();
    walk_fields(query, &mut |field, _| {
        fields.insert(field.to_string());
    });
    fields
}

/// The fields a query reads, each mapped to the sub-query applied to it.
///
/// A field that appears more than once keeps the last sub-query seen.
pub fn dependent_fields_assoc(query: &Value) -> IndexMap<String, Value> {
    let mut fields = IndexMap::new();
    walk_fields(query, &mut |field, sub_query| {
        fields.insert(field.to_string(), sub_query.clone());
    });
    fields
}

fn walk_fields<'a, F>(node: &'a Value, visit: &mut F)
where
    F: FnMut(&'a str, &'a Value),
{
    let Some(entries) = entries(node) else {
        return;
    };
    for (key, value) in entries {
        walk_fields(value, visit);
        if let Some(field) = key.field() {
            visit(field, value);
        }
    }
}
