//! Bit layout shared by goal formulas and symbol codes.

/// Marks a formula element as an operator.
pub const OP_BIT: u32 = 1 << 13;

/// Marks a formula element as a reference into the attribute vector.
pub const ATTR_BIT: u32 = 1 << 12;

/// Both tag bits. A raw value with this whole mask set is malformed.
pub const TAG_MASK: u32 = OP_BIT | ATTR_BIT;

/// Marks a recorded move as accepted.
pub const ACCEPT_BIT: u8 = 1 << 7;

/// Low bits of a symbol code holding the symbol index.
pub const SYMBOL_MASK: u8 = !ACCEPT_BIT;

/// Number of attributes a symbol index can carry.
pub const MAX_ATTR: usize = 7;

/// Number of distinct symbol indices.
pub const MAX_SYMBOL: usize = 128;

/// Rendered in place of an operator code outside the known set.
pub const UNKNOWN_OPERATOR: &str = "#unknown#";
