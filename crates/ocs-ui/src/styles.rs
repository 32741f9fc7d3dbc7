//! Ayu color theme and styling functions for ocs CLI output.
//!
//! Color source: <https://github.com/ayu-theme/ayu-colors>
//!
//! Only meaning gets color: operators and attribute references inside a
//! trace, goal outcomes, and accepted/rejected moves. Constants and plain
//! counts use standard text.

use ocs_core::game::GameStatus;
use ocs_core::symbol::Move;
use ocs_core::types::Term;
use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

pub const ICON_PASS: &str = "\u{2713}"; // ✓
pub const ICON_FAIL: &str = "\u{2716}"; // ✖
pub const ICON_WARN: &str = "\u{26A0}"; // ⚠

/// Prefix of every trace line after the first.
pub const TRACE_ARROW: &str = "\u{2192}"; // →

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when color is supported
// ---------------------------------------------------------------------------

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Core semantic render helpers
// ---------------------------------------------------------------------------

/// Renders text with pass (green) styling.
pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

/// Renders text with fail (red) styling.
pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

/// Renders text with muted (gray) styling.
pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// Renders a section header in uppercase with accent color and bold.
pub fn render_category(s: &str) -> String {
    color_bold_str(&s.to_uppercase(), ACCENT)
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

/// Renders one term of a formula state.
pub fn render_term(term: &Term) -> String {
    let s = term.to_string();
    match term {
        Term::Op(_) => color_str(&s, ACCENT),
        Term::Attr(_) => color_str(&s, WARN),
        Term::Value(_) => s,
    }
}

/// Renders a whole formula state, space separated.
pub fn render_state_colored(state: &[Term]) -> String {
    state
        .iter()
        .map(render_term)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders a goal outcome as `✓ true` or `✖ false`.
pub fn render_result(result: bool) -> String {
    if result {
        color_str(&format!("{ICON_PASS} true"), PASS)
    } else {
        color_str(&format!("{ICON_FAIL} false"), FAIL)
    }
}

/// Renders a goal that could not be evaluated.
pub fn render_goal_error(message: &str) -> String {
    color_str(&format!("{ICON_WARN} {message}"), WARN)
}

/// Renders a game status. Running games use standard text.
pub fn render_status(status: GameStatus) -> String {
    let s = status.as_str();
    match status {
        GameStatus::Running => s.to_string(),
        GameStatus::Completed => color_bold_str(s, PASS),
        GameStatus::Failed => color_bold_str(s, FAIL),
    }
}

// ---------------------------------------------------------------------------
// Moves
// ---------------------------------------------------------------------------

/// Renders a move's glyph: accepted green, rejected red.
pub fn render_move(mv: &Move) -> String {
    let glyph = mv.glyph().to_string();
    if mv.accepted {
        color_str(&glyph, PASS)
    } else {
        color_str(&glyph, FAIL)
    }
}

/// Renders a run of moves as one colored strip.
pub fn render_strip(moves: &[Move]) -> String {
    moves.iter().map(render_move).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocs_core::symbol::decode_accept;
    use ocs_core::types::Operator;

    #[test]
    fn render_term_keeps_text() {
        // Color may or may not be enabled; the text is always there.
        assert!(render_term(&Term::Op(Operator::LessThan)).contains('<'));
        assert!(render_term(&Term::Attr(2)).contains("attr[2]"));
        assert_eq!(render_term(&Term::Value(5.0)), "5");
    }

    #[test]
    fn render_state_contains_every_term() {
        let state = [Term::Op(Operator::Add), Term::Value(1.5), Term::Attr(0)];
        let rendered = render_state_colored(&state);
        assert!(rendered.contains('+'));
        assert!(rendered.contains("1.5"));
        assert!(rendered.contains("attr[0]"));
    }

    #[test]
    fn render_result_labels() {
        assert!(render_result(true).contains("true"));
        assert!(render_result(false).contains("false"));
    }

    #[test]
    fn render_strip_contains_glyphs() {
        let moves = [decode_accept(0x80), decode_accept(1)];
        let strip = render_strip(&moves);
        assert!(strip.contains('a'));
        assert!(strip.contains('b'));
    }

    #[test]
    fn render_status_contains_name() {
        assert_eq!(render_status(GameStatus::Running), "running");
        assert!(render_status(GameStatus::Failed).contains("failed"));
    }
}
