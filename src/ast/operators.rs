use std::fmt;

/// Prefix that marks a key as an operator rather than a field path.
pub const SIGIL: char = '$';

/// True if `key` is written as an operator (`$name`).
pub fn is_operator(key: &str) -> bool {
    key.starts_with(SIGIL)
}

/// Logical combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicalOp {
    /// Every entry must match (`$and`, and the implicit root context)
    #[default]
    And,
    /// At least one entry must match (`$or`)
    Or,
    /// No entry may match (`$nor`)
    Nor,
}

impl LogicalOp {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "$and" => Some(LogicalOp::And),
            "$or" => Some(LogicalOp::Or),
            "$nor" => Some(LogicalOp::Nor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOp::And => "$and",
            LogicalOp::Or => "$or",
            LogicalOp::Nor => "$nor",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in operators applied to a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOp {
    // Negation
    /// Negated operator map (`$not`)
    Not,

    // Membership
    /// Array contains every operand element (`$all`)
    All,
    /// Value is one of the operand elements (`$in`)
    In,
    /// Value is none of the operand elements (`$nin`)
    NotIn,

    // Comparison
    /// Equal, or regex match for `/pattern/flags` operands (`$e`)
    Equal,
    /// Not equal (`$ne`)
    NotEqual,
    /// Less than (`$lt`)
    LessThan,
    /// Less than or equal (`$lte`)
    LessEqual,
    /// Greater than (`$gt`)
    GreaterThan,
    /// Greater than or equal (`$gte`)
    GreaterEqual,

    // Misc
    /// Field presence (`$exists`)
    Exists,
    /// Modulo with remainder (`$mod`)
    Modulo,
}

impl FieldOp {
    pub fn from_key(key: &str) -> Option<Self> {
        let op = match key {
            "$not" => FieldOp::Not,
            "$all" => FieldOp::All,
            "$in" => FieldOp::In,
            "$nin" => FieldOp::NotIn,
            "$e" => FieldOp::Equal,
            "$ne" => FieldOp::NotEqual,
            "$lt" => FieldOp::LessThan,
            "$lte" => FieldOp::LessEqual,
            "$gt" => FieldOp::GreaterThan,
            "$gte" => FieldOp::GreaterEqual,
            "$exists" => FieldOp::Exists,
            "$mod" => FieldOp::Modulo,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldOp::Not => "$not",
            FieldOp::All => "$all",
            FieldOp::In => "$in",
            FieldOp::NotIn => "$nin",
            FieldOp::Equal => "$e",
            FieldOp::NotEqual => "$ne",
            FieldOp::LessThan => "$lt",
            FieldOp::LessEqual => "$lte",
            FieldOp::GreaterThan => "$gt",
            FieldOp::GreaterEqual => "$gte",
            FieldOp::Exists => "$exists",
            FieldOp::Modulo => "$mod",
        }
    }
}

impl fmt::Display for FieldOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
