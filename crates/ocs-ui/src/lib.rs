//! Terminal output for ocs: color detection and styled rendering of trace
//! states, goal results and move glyphs.

pub mod styles;
pub mod terminal;
