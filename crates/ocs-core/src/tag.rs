//! Tagged integer codec for goal formula elements.
//!
//! Bit 13 marks an operator, bit 12 an attribute reference; everything else
//! is payload. A raw value with neither bit is a constant.

use crate::consts::{ATTR_BIT, OP_BIT, TAG_MASK};
use crate::types::{Formula, GoalError, Operator, TaggedValue};

/// Classify a raw formula element.
pub fn decode(raw: u32) -> Result<TaggedValue, GoalError> {
    match raw & TAG_MASK {
        TAG_MASK => Err(GoalError::MalformedTag { raw }),
        OP_BIT => Ok(TaggedValue::Operator(Operator::from_code(raw & !OP_BIT))),
        ATTR_BIT => Ok(TaggedValue::AttributeRef(raw & !ATTR_BIT)),
        _ => Ok(TaggedValue::Constant(raw)),
    }
}

/// Pack a formula element back into its raw integer.
pub fn encode(value: TaggedValue) -> u32 {
    match value {
        TaggedValue::Constant(c) => c,
        TaggedValue::AttributeRef(i) => ATTR_BIT | i,
        TaggedValue::Operator(op) => OP_BIT | op.code(),
    }
}

/// Decode every element of a goal. The first malformed element rejects the
/// whole goal.
pub fn decode_formula(raws: &[u32]) -> Result<Formula, GoalError> {
    raws.iter()
        .enumerate()
        .map(|(position, &raw)| {
            decode(raw).map_err(|_| GoalError::MalformedFormula { position, raw })
        })
        .collect()
}

/// Pack a decoded goal back into raw integers.
pub fn encode_formula(formula: &[TaggedValue]) -> Vec<u32> {
    formula.iter().copied().map(encode).collect()
}

/// Display symbol for an operator.
pub fn operator_symbol(op: Operator) -> &'static str {
    op.symbol()
}

/// Resolve a formula element to a number against the game's attributes.
pub fn resolve(value: TaggedValue, attrs: &[f64]) -> Result<f64, GoalError> {
    match value {
        TaggedValue::Constant(c) => Ok(f64::from(c)),
        TaggedValue::AttributeRef(index) => resolve_attr(index, attrs),
        TaggedValue::Operator(operator) => Err(GoalError::NotResolvable { operator }),
    }
}

/// Look up one attribute by index.
pub fn resolve_attr(index: u32, attrs: &[f64]) -> Result<f64, GoalError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| attrs.get(i))
        .copied()
        .ok_or(GoalError::AttributeIndexOutOfRange {
            index,
            len: attrs.len(),
        })
}
