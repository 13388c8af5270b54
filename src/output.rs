//! Compact JSON rendering of values for diagnostics.
//!
//! Error messages and trace output quote query fragments and document values.
//! Rendering writes straight into the formatter and keeps object keys in
//! insertion order, so a query reads back the way it was written.
//!
//! # Examples
//!
//! ```
//! use clove_match::Value;
//! use clove_match::output::to_json;
//! use indexmap::IndexMap;
//!
//! let mut obj = IndexMap::new();
//! obj.insert("name".to_string(), Value::String("Alice".to_string()));
//! obj.insert("age".to_string(), Value::Integer(30));
//!
//! assert_eq!(to_json(&Value::Object(obj)), r#"{"name":"Alice","age":30}"#);
//! ```

use std::fmt;

use crate::value::Value;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) if n.is_finite() => write!(f, "{:?}", n),
            // NaN and infinities have no JSON spelling
            Value::Float(_) => f.write_str("null"),
            Value::String(s) => write_string(f, s),
            Value::Array(arr) => {
                f.write_str("[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(obj) => {
                f.write_str("{")?;
                for (i, (key, item)) in obj.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_string(f, key)?;
                    write!(f, ":{}", item)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

/// Converts a Value to a compact JSON string.
///
/// No indentation or extra whitespace; object keys keep insertion order.
pub fn to_json(value: &Value) -> String {
    value.to_string()
}
