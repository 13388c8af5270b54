//! Evaluator configuration.

use std::fmt;
use std::sync::Arc;

use crate::trace::{LogTracer, Tracer};
use crate::value::Value;

/// Handler for field operators the evaluator does not implement.
///
/// Called as `handler(operator, operand, field_path, document)`. Return
/// `Value::Boolean` with the match result, or `Value::Null` to report that the
/// operator is still unknown. Any other value is an invalid result.
pub type UnknownOperatorHandler =
    Arc<dyn Fn(&str, &Value, &str, &Value) -> Value + Send + Sync + 'static>;

/// Options for an [`Evaluator`](crate::Evaluator).
///
/// # Examples
///
/// ```
/// use clove_match::{Evaluator, MatchOptions, Value};
/// use serde_json::json;
///
/// let options = MatchOptions::new()
///     .with_unknown_operator(|op, operand, path, doc| match op {
///         "$startsWith" => {
///             let prefix = operand.as_str().unwrap_or_default();
///             let value = clove_match::path::resolve(doc, path).value;
///             Value::Boolean(value.and_then(Value::as_str).is_some_and(|s| s.starts_with(prefix)))
///         }
///         _ => Value::Null,
///     })
///     .with_max_depth(32);
///
/// let evaluator = Evaluator::with_options(options);
/// let query = Value::from(json!({"name": {"$startsWith": "Ad"}}));
/// let doc = Value::from(json!({"name": "Ada"}));
/// assert!(evaluator.matches(&query, &doc).unwrap());
/// ```
#[derive(Clone, Default)]
pub struct MatchOptions {
    /// Resolves operators outside the built-in set
    pub unknown_operator: Option<UnknownOperatorHandler>,
    /// Receives entry/exit events for every evaluation step
    pub tracer: Option<Arc<dyn Tracer>>,
    /// Maximum query nesting depth; unlimited when `None`
    ///
    /// The root query is depth 0 and every nested query or operator map adds
    /// one level. A field condition counts as an operator map whether written
    /// out or not, so `{"a": 1}` and `{"a": {"$e": 1}}` both reach depth 1.
    pub max_depth: Option<usize>,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unknown_operator<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, &Value, &str, &Value) -> Value + Send + Sync + 'static,
    {
        self.unknown_operator = Some(Arc::new(handler));
        self
    }

    pub fn with_tracer<T>(mut self, tracer: T) -> Self
    where
        T: Tracer + 'static,
    {
        self.tracer = Some(Arc::new(tracer));
        self
    }

    /// Trace every evaluation step through the `log` facade.
    pub fn with_logging(self) -> Self {
        self.with_tracer(LogTracer::default())
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

impl fmt::Debug for MatchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchOptions")
            .field("unknown_operator", &self.unknown_operator.is_some())
            .field("tracer", &self.tracer.is_some())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
