//! Symbol codes: one recorded move packed into a byte.
//!
//! The low seven bits are the symbol index, itself a bitmask over the
//! game's attributes; bit 7 marks the move as accepted. Each index also has
//! a unique display glyph so a move history can be shown as a string.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::consts::{ACCEPT_BIT, MAX_ATTR, SYMBOL_MASK};

/// Glyph bands as `(size, first code point)`, in index order.
///
/// 26 lowercase letters, then 32 code points from `A`, 32 from `!`, the four
/// ASCII characters after `z`, 25 lowercase Greek letters and 9 emoji.
const GLYPH_BANDS: [(u32, u32); 6] = [
    (26, 0x61),
    (32, 0x41),
    (32, 0x21),
    (4, 0x7b),
    (25, 0x3b1),
    (9, 0x1f600),
];

/// One decoded move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    /// Whether the move was accepted.
    pub accepted: bool,
    /// Symbol index, `0..128`.
    pub index: u8,
}

impl Move {
    /// Attributes carried by this move.
    pub fn attrs(&self) -> AttrSet {
        decode_attrs(self.index)
    }

    /// Display glyph for this move.
    pub fn glyph(&self) -> char {
        encode_glyph(self.index)
    }
}

/// Split a raw symbol code into its accept flag and symbol index.
pub fn decode_accept(raw: u8) -> Move {
    Move {
        accepted: raw & ACCEPT_BIT != 0,
        index: raw & SYMBOL_MASK,
    }
}

/// Pack a move back into a raw symbol code.
pub fn encode_accept(mv: Move) -> u8 {
    let index = mv.index & SYMBOL_MASK;
    if mv.accepted { index | ACCEPT_BIT } else { index }
}

/// Set of attribute indices present in a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttrSet(u8);

impl AttrSet {
    /// Returns `true` if attribute `i` is present.
    pub fn contains(&self, i: usize) -> bool {
        i < MAX_ATTR && (self.0 >> i) & 1 == 1
    }

    /// Present attribute indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_ATTR).filter(|&i| self.contains(i))
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The underlying bitmask.
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// One `0`/`1` flag per attribute.
    pub fn presence(&self) -> [u8; MAX_ATTR] {
        let mut flags = [0; MAX_ATTR];
        for i in self.iter() {
            flags[i] = 1;
        }
        flags
    }
}

/// Renders as the presence vector, e.g. `[1,0,1,0,0,0,0]`.
impl fmt::Display for AttrSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: Vec<String> = self.presence().iter().map(u8::to_string).collect();
        write!(f, "[{}]", flags.join(","))
    }
}

impl Serialize for AttrSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Attributes encoded in a symbol index. Bit 7 is ignored.
pub fn decode_attrs(index: u8) -> AttrSet {
    AttrSet(index & SYMBOL_MASK)
}

/// Unique display glyph for a symbol index. Bit 7 is ignored.
pub fn encode_glyph(index: u8) -> char {
    let mut offset = u32::from(index & SYMBOL_MASK);
    for (size, base) in GLYPH_BANDS {
        if offset < size {
            return char::from_u32(base + offset).unwrap_or(char::REPLACEMENT_CHARACTER);
        }
        offset -= size;
    }
    char::REPLACEMENT_CHARACTER
}

/// Symbol index for a glyph produced by [`encode_glyph`].
pub fn decode_glyph(glyph: char) -> Option<u8> {
    let code = u32::from(glyph);
    let mut start = 0u32;
    for (size, base) in GLYPH_BANDS {
        if (base..base + size).contains(&code) {
            return u8::try_from(start + code - base).ok();
        }
        start += size;
    }
    None
}

/// Render a move history as a glyph string.
pub fn glyph_string(moves: &[Move]) -> String {
    moves.iter().map(Move::glyph).collect()
}
