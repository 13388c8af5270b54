//! Bridging between `serde_json` documents and query [`Value`]s.
//!
//! Queries and documents are usually written with `serde_json::json!` or
//! parsed from text; both directions keep object key order.

use serde_json::{Number, Value as Json};

use crate::Value;

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(b),
            Json::Number(n) => number_to_value(&n),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, field)| (key, Value::from(field)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for Json {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Json::Null,
            Value::Boolean(b) => Json::Bool(b),
            Value::Integer(n) => Json::Number(n.into()),
            // NaN and infinities have no JSON spelling
            Value::Float(n) => Number::from_f64(n).map_or(Json::Null, Json::Number),
            Value::String(s) => Json::String(s),
            Value::Array(items) => Json::Array(items.into_iter().map(Json::from).collect()),
            Value::Object(fields) => Json::Object(
                fields
                    .into_iter()
                    .map(|(key, field)| (key, Json::from(field)))
                    .collect(),
            ),
        }
    }
}

/// Integers stay integers while they fit an `i64`; larger `u64`s and
/// fractional numbers become floats.
fn number_to_value(n: &Number) -> Value {
    n.as_i64()
        .map(Value::Integer)
        .or_else(|| n.as_f64().map(Value::Float))
        .unwrap_or_default()
}

pub fn json_to_value(json: Json) -> Value {
    Value::from(json)
}

pub fn value_to_json(value: Value) -> Json {
    Json::from(value)
}
