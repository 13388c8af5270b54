use crate::value::Value;

/// Separator between the segments of a field path.
pub const PATH_SEPARATOR: char = '.';

/// The outcome of resolving a field path against a document.
///
/// A field that is present with a `null` value exists; a field that is not
/// present does not. Operators treat the two differently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved<'a> {
    pub value: Option<&'a Value>,
    pub exists: bool,
}

impl<'a> Resolved<'a> {
    pub const MISSING: Resolved<'static> = Resolved {
        value: None,
        exists: false,
    };

    fn found(value: &'a Value) -> Self {
        Resolved {
            value: Some(value),
            exists: true,
        }
    }
}

/// Resolve a dot-separated field path on a document.
///
/// Walks object keys one segment at a time. Resolution stops at the first
/// segment that is missing or whose parent is not an object; arrays are
/// never indexed by position.
///
/// # Examples
///
/// ```
/// use clove_match::path::resolve;
/// use clove_match::Value;
/// use serde_json::json;
///
/// let doc = Value::from(json!({"user": {"name": "Ada", "nick": null}}));
///
/// let name = resolve(&doc, "user.name");
/// assert_eq!(name.value, Some(&Value::from("Ada")));
///
/// assert!(resolve(&doc, "user.nick").exists);
/// assert!(!resolve(&doc, "user.email").exists);
/// ```
pub fn resolve<'a>(document: &'a Value, path: &str) -> Resolved<'a> {
    let mut current = document;
    for segment in path.split(PATH_SEPARATOR) {
        match current {
            Value::Object(map) => match map.get(segment) {
                Some(child) => current = child,
                None => return Resolved::MISSING,
            },
            _ => return Resolved::MISSING,
        }
    }
    Resolved::found(current)
}
