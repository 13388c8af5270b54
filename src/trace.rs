//! Observability hook for evaluation.
//!
//! A [`Tracer`] sees every recursive step of an evaluation: each query node,
//! each field operator map, and each single operator. Nothing is traced unless
//! a tracer is set on [`MatchOptions`](crate::MatchOptions).

use std::fmt;

use log::Level;

use crate::ast::LogicalOp;
use crate::evaluator::MatchError;
use crate::value::Value;

/// One evaluation step.
#[derive(Debug, Clone, Copy)]
pub enum TraceEvent<'a> {
    /// A query node evaluated under a logical context
    Query {
        query: &'a Value,
        logical: LogicalOp,
        depth: usize,
    },
    /// A field's operator map
    Field { path: &'a str, operators: &'a Value },
    /// A single operator applied to a field
    Operator {
        operator: &'a str,
        operand: &'a Value,
        path: &'a str,
    },
}

impl fmt::Display for TraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Query {
                query,
                logical,
                depth,
            } => write!(f, "query[{}] {} {}", depth, logical, query),
            TraceEvent::Field { path, operators } => write!(f, "field {} {}", path, operators),
            TraceEvent::Operator {
                operator,
                operand,
                path,
            } => write!(f, "operator {} {} {}", path, operator, operand),
        }
    }
}

/// Receives evaluation events.
///
/// Both methods default to doing nothing, so implementors only override the
/// side they care about.
pub trait Tracer: Send + Sync {
    fn enter(&self, _event: &TraceEvent<'_>) {}

    fn exit(&self, _event: &TraceEvent<'_>, _outcome: Result<bool, &MatchError>) {}
}

/// Forwards events to the `log` crate under the `clove_match` target.
///
/// Entry events go out at `Trace`, results at the configured level.
#[derive(Debug, Clone, Copy)]
pub struct LogTracer {
    level: Level,
}

impl LogTracer {
    pub fn new(level: Level) -> Self {
        LogTracer { level }
    }
}

impl Default for LogTracer {
    fn default() -> Self {
        LogTracer::new(Level::Debug)
    }
}

impl Tracer for LogTracer {
    fn enter(&self, event: &TraceEvent<'_>) {
        log::trace!(target: "clove_match", "enter {}", event);
    }

    fn exit(&self, event: &TraceEvent<'_>, outcome: Result<bool, &MatchError>) {
        match outcome {
            Ok(matched) => log::log!(target: "clove_match", self.level, "{} -> {}", event, matched),
            Err(e) => log::log!(target: "clove_match", self.level, "{} failed: {}", event, e),
        }
    }
}
