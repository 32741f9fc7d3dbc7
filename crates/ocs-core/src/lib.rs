//! Goal formula engine for the ocs game.
//!
//! Goals are win/loss predicates packed into tagged integers, moves are
//! packed into 8-bit symbol codes. This crate decodes both, reduces goal
//! formulas one visible step at a time, and maps symbols to display glyphs
//! and attribute sets.

pub mod consts;
pub mod engine;
pub mod expr;
pub mod game;
pub mod parser;
pub mod symbol;
pub mod tag;
pub mod types;
