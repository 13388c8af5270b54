use std::cmp::Ordering;

use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use thiserror::Error;

use crate::{
    ast::{FieldOp, Key, KeyKind, LogicalOp, entries},
    options::MatchOptions,
    path::resolve,
    pattern::RegexLiteral,
    trace::TraceEvent,
    value::Value,
};

/// Errors that can occur while evaluating a query.
///
/// An error means the query could not be evaluated; it is never a stand-in
/// for "no match".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// Logical or field operator given an operand of the wrong shape
    #[error("Arity error: {0}")]
    Arity(String),

    /// Operator that is neither built in nor resolved by the handler
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Unknown-operator handler returned something other than a boolean or null
    #[error("Invalid result from unknown-operator handler for {operator}: expected boolean or null, got {got}")]
    InvalidCallbackResult { operator: String, got: Value },

    /// Operand or query node of an unusable type
    #[error("Type error: {0}")]
    TypeError(String),

    /// Query nesting deeper than the configured limit
    #[error("Query nesting exceeds maximum depth of {0}")]
    DepthExceeded(usize),
}

pub type Result<T> = std::result::Result<T, MatchError>;

/// The query evaluator.
///
/// Matches MongoDB-style queries against documents. An evaluator holds only
/// its [`MatchOptions`]; every call is independent, and one evaluator can be
/// shared across threads.
///
/// # Examples
///
/// ```
/// use clove_match::{Evaluator, Value};
/// use serde_json::json;
///
/// let doc = Value::from(json!({"tags": ["a", "b"], "price": 10}));
/// let query = Value::from(json!({
///     "tags": {"$all": ["a", "b"]},
///     "price": {"$gte": 10, "$lt": 20}
/// }));
///
/// let evaluator = Evaluator::new();
/// assert!(evaluator.matches(&query, &doc).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    options: MatchOptions,
}

impl Evaluator {
    /// Creates an evaluator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MatchOptions) -> Self {
        Evaluator { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Evaluates a query against a document.
    ///
    /// Objects and arrays are evaluated as queries under `$and`. Any other
    /// root value is its own answer by truthiness, so `true` matches every
    /// document and `false` or `null` matches none.
    pub fn matches(&self, query: &Value, document: &Value) -> Result<bool> {
        if !query.is_container() {
            return Ok(query.is_truthy());
        }
        self.eval_query(query, document, LogicalOp::And)
    }

    /// Evaluates a query node under the given logical context.
    ///
    /// Under `$or` and `$nor` the node must be a nonempty array of sub-queries.
    pub fn eval_query(&self, query: &Value, document: &Value, logical: LogicalOp) -> Result<bool> {
        self.query(query, document, logical, 0)
    }

    /// Evaluates a field's operator map; every operator must match.
    pub fn eval_field(&self, operators: &Value, path: &str, document: &Value) -> Result<bool> {
        self.field(operators, path, document, 0)
    }

    /// Applies a single operator to the field at `path`.
    pub fn eval_operator(
        &self,
        operator: &str,
        operand: &Value,
        path: &str,
        document: &Value,
    ) -> Result<bool> {
        self.operator(operator, operand, path, document, 0)
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        match self.options.max_depth {
            Some(max) if depth > max => Err(MatchError::DepthExceeded(max)),
            _ => Ok(()),
        }
    }

    fn traced(&self, event: TraceEvent<'_>, eval: impl FnOnce() -> Result<bool>) -> Result<bool> {
        let Some(tracer) = &self.options.tracer else {
            return eval();
        };
        tracer.enter(&event);
        let result = eval();
        tracer.exit(&event, result.as_ref().copied());
        result
    }

    fn query(
        &self,
        query: &Value,
        document: &Value,
        logical: LogicalOp,
        depth: usize,
    ) -> Result<bool> {
        self.check_depth(depth)?;
        self.traced(
            TraceEvent::Query {
                query,
                logical,
                depth,
            },
            || self.query_entries(query, document, logical, depth),
        )
    }

    fn query_entries(
        &self,
        query: &Value,
        document: &Value,
        logical: LogicalOp,
        depth: usize,
    ) -> Result<bool> {
        if logical != LogicalOp::And {
            require_subqueries(logical, query)?;
        }

        let entries = entries(query).ok_or_else(|| {
            MatchError::TypeError(format!(
                "query must be an object or array, got {}",
                query.type_name()
            ))
        })?;

        for (key, value) in entries {
            let pass = match (key.kind(), logical) {
                (KeyKind::Not, _) => !self.query(value, document, LogicalOp::And, depth + 1)?,
                (KeyKind::Logical(op), _) => {
                    require_subqueries(op, value)?;
                    self.query(value, document, op, depth + 1)?
                }
                (KeyKind::Operator(name), _) => {
                    return Err(MatchError::UnknownOperator(name.to_string()));
                }
                (KeyKind::Index(_), LogicalOp::And) => {
                    self.query(value, document, LogicalOp::And, depth + 1)?
                }
                (KeyKind::Field(path), LogicalOp::And) => {
                    if value.is_container() {
                        self.field(value, path, document, depth + 1)?
                    } else {
                        // counts as a one-operator map
                        self.check_depth(depth + 1)?;
                        self.operator(FieldOp::Equal.as_str(), value, path, document, depth + 1)?
                    }
                }
                // under $or / $nor every entry is a complete sub-query
                (KeyKind::Index(_) | KeyKind::Field(_), LogicalOp::Or | LogicalOp::Nor) => {
                    self.query(value, document, LogicalOp::And, depth + 1)?
                }
            };

            match logical {
                LogicalOp::And if !pass => return Ok(false),
                LogicalOp::Or if pass => return Ok(true),
                LogicalOp::Nor if pass => return Ok(false),
                _ => {}
            }
        }

        Ok(match logical {
            LogicalOp::And => true,
            LogicalOp::Or => false,
            LogicalOp::Nor => true,
        })
    }

    fn field(&self, operators: &Value, path: &str, document: &Value, depth: usize) -> Result<bool> {
        self.check_depth(depth)?;
        self.traced(TraceEvent::Field { path, operators }, || {
            let entries = entries(operators).ok_or_else(|| {
                MatchError::TypeError(format!(
                    "operators for '{}' must be an object, got {}",
                    path,
                    operators.type_name()
                ))
            })?;
            for (key, operand) in entries {
                let matched = match key {
                    Key::Name(name) => self.operator(name, operand, path, document, depth)?,
                    Key::Index(i) => self.operator(&i.to_string(), operand, path, document, depth)?,
                };
                if !matched {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }

    fn operator(
        &self,
        operator: &str,
        operand: &Value,
        path: &str,
        document: &Value,
        depth: usize,
    ) -> Result<bool> {
        self.traced(
            TraceEvent::Operator {
                operator,
                operand,
                path,
            },
            || match FieldOp::from_key(operator) {
                Some(op) => self.apply_operator(op, operand, path, document, depth),
                None => self.resolve_unknown(operator, operand, path, document),
            },
        )
    }

    fn apply_operator(
        &self,
        op: FieldOp,
        operand: &Value,
        path: &str,
        document: &Value,
        depth: usize,
    ) -> Result<bool> {
        if op == FieldOp::Not {
            if !operand.is_container() {
                return Err(MatchError::TypeError(format!(
                    "$not requires an operator object, got {}",
                    operand.type_name()
                )));
            }
            return Ok(!self.field(operand, path, document, depth + 1)?);
        }

        let field = resolve(document, path);

        match op {
            FieldOp::All => {
                let wanted = sequence_operand(op, operand)?;
                let Some(value) = field.value else {
                    return Ok(false);
                };
                if wanted.is_empty() {
                    return Ok(false);
                }
                match value {
                    Value::Array(_) => Ok(wanted.iter().all(|w| value.contains(w))),
                    scalar => Ok(wanted.len() == 1 && scalar.equals(&wanted[0])),
                }
            }
            FieldOp::Equal => {
                let Some(value) = field.value else {
                    return Ok(false);
                };
                if let Value::Array(_) = value {
                    return Ok(value.contains(operand));
                }
                if let Value::String(s) = operand
                    && let Some(literal) = RegexLiteral::parse(s)
                {
                    let re = literal.compile()?;
                    return Ok(value.as_str().is_some_and(|text| re.is_match(text)));
                }
                Ok(value.equals(operand))
            }
            FieldOp::In | FieldOp::NotIn => {
                let candidates = sequence_operand(op, operand)?;
                if candidates.is_empty() {
                    return Err(MatchError::Arity(format!("{} requires a nonempty array", op)));
                }
                let Some(value) = field.value else {
                    return Ok(op == FieldOp::NotIn);
                };
                let hit = match value {
                    Value::Array(items) => items
                        .iter()
                        .any(|item| candidates.iter().any(|c| c.equals(item))),
                    scalar => candidates.iter().any(|c| c.equals(scalar)),
                };
                Ok(if op == FieldOp::In { hit } else { !hit })
            }
            FieldOp::LessThan | FieldOp::LessEqual | FieldOp::GreaterThan | FieldOp::GreaterEqual => {
                let Some(value) = field.value else {
                    return Ok(false);
                };
                let ord = value.compare(operand);
                Ok(match op {
                    FieldOp::LessThan => ord == Some(Ordering::Less),
                    FieldOp::LessEqual => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
                    FieldOp::GreaterThan => ord == Some(Ordering::Greater),
                    _ => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
                })
            }
            FieldOp::NotEqual => Ok(match field.value {
                Some(value) => !value.equals(operand),
                // a missing field only equals null
                None => !operand.is_null(),
            }),
            FieldOp::Exists => match operand {
                Value::Boolean(wanted) => Ok(*wanted == field.exists),
                other => Err(MatchError::TypeError(format!(
                    "$exists requires a boolean, got {}",
                    other.type_name()
                ))),
            },
            FieldOp::Modulo => {
                let (divisor, remainder) = match operand {
                    Value::Array(pair) if pair.len() == 2 => (&pair[0], &pair[1]),
                    Value::Array(pair) => {
                        return Err(MatchError::Arity(format!(
                            "$mod requires [divisor, remainder], got {} elements",
                            pair.len()
                        )));
                    }
                    other => {
                        return Err(MatchError::Arity(format!(
                            "$mod requires [divisor, remainder], got {}",
                            other.type_name()
                        )));
                    }
                };
                if !divisor.is_number() || !remainder.is_number() {
                    return Err(MatchError::TypeError(format!(
                        "$mod requires numeric divisor and remainder, got {} and {}",
                        divisor.type_name(),
                        remainder.type_name()
                    )));
                }
                if divisor.as_float() == Some(0.0) {
                    return Err(MatchError::TypeError("$mod divisor must be nonzero".to_string()));
                }
                let Some(value) = field.value else {
                    return Ok(false);
                };
                Ok(modulo(value, divisor).is_some_and(|r| r.equals(remainder)))
            }
            FieldOp::Not => unreachable!("$not handled above"),
        }
    }

    fn resolve_unknown(
        &self,
        operator: &str,
        operand: &Value,
        path: &str,
        document: &Value,
    ) -> Result<bool> {
        let Some(handler) = &self.options.unknown_operator else {
            return Err(MatchError::UnknownOperator(operator.to_string()));
        };
        match handler(operator, operand, path, document) {
            Value::Boolean(b) => Ok(b),
            Value::Null => Err(MatchError::UnknownOperator(operator.to_string())),
            got => Err(MatchError::InvalidCallbackResult {
                operator: operator.to_string(),
                got,
            }),
        }
    }
}

/// Explicit logical operators, `$and` included, take a nonempty array.
fn require_subqueries(op: LogicalOp, value: &Value) -> Result<()> {
    match value {
        Value::Array(arr) if !arr.is_empty() => Ok(()),
        other => Err(MatchError::Arity(format!(
            "{} requires a nonempty array, got {}",
            op, other
        ))),
    }
}

fn sequence_operand(op: FieldOp, operand: &Value) -> Result<&[Value]> {
    operand.as_array().ok_or_else(|| {
        MatchError::Arity(format!(
            "{} requires an array, got {}",
            op,
            operand.type_name()
        ))
    })
}

/// Remainder of `value / divisor`, truncated toward zero.
///
/// Integer operands stay integers; anything involving a float goes through
/// `Decimal` so that e.g. `7.5 % 2.5` is exactly zero. Floats outside
/// `Decimal`'s range fall back to `f64` remainder. Non-numeric values have no
/// remainder.
fn modulo(value: &Value, divisor: &Value) -> Option<Value> {
    match (value, divisor) {
        (Value::Integer(_), Value::Integer(0)) => None,
        (Value::Integer(a), Value::Integer(b)) => Some(Value::Integer(a.wrapping_rem(*b))),
        (a, b) => {
            let (Some(ad), Some(bd)) = (to_decimal(a), to_decimal(b)) else {
                let r = a.as_float()? % b.as_float()?;
                return r.is_finite().then_some(Value::Float(r));
            };
            let rd = ad.checked_rem(bd)?;
            if rd.is_integer()
                && let Some(r) = rd.to_i64()
            {
                Some(Value::Integer(r))
            } else {
                rd.to_f64().map(Value::Float)
            }
        }
    }
}

fn to_decimal(v: &Value) -> Option<Decimal> {
    match v {
        Value::Integer(n) => Decimal::from_i64(*n),
        Value::Float(n) => Decimal::from_f64(*n),
        _ => None,
    }
}
