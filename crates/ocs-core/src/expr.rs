//! Tree form of a goal formula.
//!
//! The wire format is a flattened prefix sequence; [`Expr::parse`] rebuilds
//! the tree and [`Expr::flatten`] packs it back without loss.

use std::fmt;

use crate::tag::resolve_attr;
use crate::types::{GoalError, Operator, TaggedValue, Term};

/// A goal expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Const(u32),
    Attr(u32),
    BinOp(Operator, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Rebuild the tree from a prefix-ordered formula.
    ///
    /// Scans right to left with an operand stack, so deep formulas do not
    /// recurse. A missing or leftover operand makes the formula stuck.
    pub fn parse(formula: &[TaggedValue]) -> Result<Self, GoalError> {
        let stuck = || GoalError::StuckFormula {
            state: formula.iter().copied().map(Term::from).collect(),
        };

        let mut operands: Vec<Expr> = Vec::new();
        for value in formula.iter().rev() {
            let node = match *value {
                TaggedValue::Constant(c) => Expr::Const(c),
                TaggedValue::AttributeRef(i) => Expr::Attr(i),
                TaggedValue::Operator(op) => {
                    let left = operands.pop().ok_or_else(stuck)?;
                    let right = operands.pop().ok_or_else(stuck)?;
                    Expr::BinOp(op, Box::new(left), Box::new(right))
                }
            };
            operands.push(node);
        }

        match (operands.pop(), operands.is_empty()) {
            (Some(expr), true) => Ok(expr),
            _ => Err(stuck()),
        }
    }

    /// Flatten back into prefix order.
    pub fn flatten(&self) -> Vec<TaggedValue> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<TaggedValue>) {
        match self {
            Expr::Const(c) => out.push(TaggedValue::Constant(*c)),
            Expr::Attr(i) => out.push(TaggedValue::AttributeRef(*i)),
            Expr::BinOp(op, left, right) => {
                out.push(TaggedValue::Operator(*op));
                left.flatten_into(out);
                right.flatten_into(out);
            }
        }
    }

    /// Evaluate directly over the tree.
    pub fn eval(&self, attrs: &[f64]) -> Result<f64, GoalError> {
        match self {
            Expr::Const(c) => Ok(f64::from(*c)),
            Expr::Attr(i) => resolve_attr(*i, attrs),
            Expr::BinOp(op, left, right) => {
                let a = left.eval(attrs)?;
                let b = right.eval(attrs)?;
                Ok(op.apply(a, b))
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{c}"),
            Expr::Attr(i) => write!(f, "attr[{i}]"),
            Expr::BinOp(op, left, right) => write!(f, "({left} {op} {right})"),
        }
    }
}
