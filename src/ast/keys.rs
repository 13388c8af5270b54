use std::fmt;

use crate::ast::operators::{LogicalOp, is_operator};
use crate::value::Value;

/// The key of one entry in a query node.
///
/// Object nodes have named keys; array nodes (the sub-query lists of `$and`,
/// `$or` and `$nor`) have positional ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Name(&'a str),
    Index(usize),
}

/// What a query-level key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind<'a> {
    /// `$not`, negating a complete sub-query
    Not,
    /// `$and`, `$or` or `$nor`
    Logical(LogicalOp),
    /// Any other `$`-prefixed key
    Operator(&'a str),
    /// A dotted field path
    Field(&'a str),
    /// Position inside an array of sub-queries
    Index(usize),
}

impl<'a> Key<'a> {
    pub fn kind(&self) -> KeyKind<'a> {
        match *self {
            Key::Index(i) => KeyKind::Index(i),
            Key::Name("$not") => KeyKind::Not,
            Key::Name(name) if is_operator(name) => match LogicalOp::from_key(name) {
                Some(op) => KeyKind::Logical(op),
                None => KeyKind::Operator(name),
            },
            Key::Name(name) => KeyKind::Field(name),
        }
    }

    /// Field keys are named keys without the operator sigil.
    pub fn field(&self) -> Option<&'a str> {
        match *self {
            Key::Name(name) if !is_operator(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(i) => write!(f, "{}", i),
        }
    }
}

/// Iterator over the entries of an object or array node.
pub enum Entries<'a> {
    Object(indexmap::map::Iter<'a, String, Value>),
    Array(std::iter::Enumerate<std::slice::Iter<'a, Value>>),
}

impl<'a> Iterator for Entries<'a> {
    type Item = (Key<'a>, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Object(iter) => iter.next().map(|(k, v)| (Key::Name(k.as_str()), v)),
            Entries::Array(iter) => iter.next().map(|(i, v)| (Key::Index(i), v)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Entries::Object(iter) => iter.size_hint(),
            Entries::Array(iter) => iter.size_hint(),
        }
    }
}

/// Entries of `node`, or `None` if it is a scalar.
pub fn entries(node: &Value) -> Option<Entries<'_>> {
    match node {
        Value::Object(obj) => Some(Entries::Object(obj.iter())),
        Value::Array(arr) => Some(Entries::Array(arr.iter().enumerate())),
        _ => None,
    }
}
