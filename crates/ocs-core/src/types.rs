//! Goal data model: operators, tagged formula elements, reduction terms,
//! and the errors raised while decoding or reducing them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::UNKNOWN_OPERATOR;

/// A binary operator carried in a formula element's payload.
///
/// Codes outside the known range decode to [`Operator::Unknown`] instead of
/// failing, so formulas written for newer rule sets still display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Sub,
    Div,
    Mul,
    LessThan,
    GreaterOrEqual,
    Unknown(u32),
}

impl Operator {
    /// Map an operator payload to its operator.
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Self::Add,
            1 => Self::Sub,
            2 => Self::Div,
            3 => Self::Mul,
            4 => Self::LessThan,
            5 => Self::GreaterOrEqual,
            other => Self::Unknown(other),
        }
    }

    /// The payload this operator encodes to.
    pub fn code(self) -> u32 {
        match self {
            Self::Add => 0,
            Self::Sub => 1,
            Self::Div => 2,
            Self::Mul => 3,
            Self::LessThan => 4,
            Self::GreaterOrEqual => 5,
            Self::Unknown(code) => code,
        }
    }

    /// Display symbol; unknown codes get the placeholder marker.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Div => "/",
            Self::Mul => "*",
            Self::LessThan => "<",
            Self::GreaterOrEqual => ">=",
            Self::Unknown(_) => UNKNOWN_OPERATOR,
        }
    }

    /// Look an operator up by its display symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "/" => Some(Self::Div),
            "*" => Some(Self::Mul),
            "<" => Some(Self::LessThan),
            ">=" => Some(Self::GreaterOrEqual),
            _ => None,
        }
    }

    /// Apply the operator to two numbers.
    ///
    /// Comparisons yield `1.0`/`0.0` so their results stay usable as
    /// arithmetic operands. Division follows IEEE semantics. Unknown
    /// operators yield `-1.0`.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Div => a / b,
            Self::Mul => a * b,
            Self::LessThan => truth_value(a < b),
            Self::GreaterOrEqual => truth_value(a >= b),
            Self::Unknown(_) => -1.0,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

fn truth_value(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// One decoded formula element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TaggedValue {
    /// A literal; the raw integer is the value.
    Constant(u32),
    /// An index into the game's attribute vector.
    AttributeRef(u32),
    /// An operator applied to the two elements that follow it.
    Operator(Operator),
}

impl fmt::Display for TaggedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => write!(f, "{c}"),
            Self::AttributeRef(i) => write!(f, "attr[{i}]"),
            Self::Operator(op) => write!(f, "{op}"),
        }
    }
}

/// A goal formula as supplied by the service, in flattened prefix order.
pub type Formula = Vec<TaggedValue>;

/// One element of a formula state during reduction.
///
/// Computed results live here as plain numbers and are never packed back
/// into tag bits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Term {
    Value(f64),
    Attr(u32),
    Op(Operator),
}

impl From<TaggedValue> for Term {
    fn from(value: TaggedValue) -> Self {
        match value {
            TaggedValue::Constant(c) => Self::Value(f64::from(c)),
            TaggedValue::AttributeRef(i) => Self::Attr(i),
            TaggedValue::Operator(op) => Self::Op(op),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.write_str(&format_value(*v)),
            Self::Attr(i) => write!(f, "attr[{i}]"),
            Self::Op(op) => write!(f, "{op}"),
        }
    }
}

/// Format a number the way trace lines show it: integral values without a
/// fraction, non-finite values spelled out.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        let s = if v > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else if v == 0.0 {
        "0".to_string()
    } else {
        format!("{v}")
    }
}

/// Render a formula state as a single space-separated line.
pub fn render_state(state: &[Term]) -> String {
    state
        .iter()
        .map(Term::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Errors that reject a single goal formula.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GoalError {
    #[error("malformed tag {raw:#06x}: both operator and attribute bits are set")]
    MalformedTag { raw: u32 },

    #[error("malformed tag {raw:#06x} at position {position}")]
    MalformedFormula { position: usize, raw: u32 },

    #[error("attribute index {index} out of range (game has {len} attributes)")]
    AttributeIndexOutOfRange { index: u32, len: usize },

    #[error("operator '{operator}' cannot be resolved to a number")]
    NotResolvable { operator: Operator },

    #[error("formula cannot be reduced further: [{}]", render_state(.state))]
    StuckFormula { state: Vec<Term> },
}

/// Errors that can occur while loading payload files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid formula token '{token}': {reason}")]
    InvalidToken { token: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
