//! Output formatting helpers for the `ocs` CLI.
//!
//! Provides JSON output, table formatting, and the view models shared by the
//! `goal`, `game` and `symbols` commands.

use std::io::{self, Write};

use ocs_core::expr::Expr;
use ocs_core::game::{GoalReport, SymbolTally};
use ocs_core::symbol::{AttrSet, Move, decode_attrs, encode_glyph};
use ocs_core::tag::decode_formula;
use ocs_core::types::render_state;
use ocs_ui::styles::{
    TRACE_ARROW, render_goal_error, render_muted, render_result, render_state_colored,
};
use serde::Serialize;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple table with headers and rows.
///
/// Column widths are measured in chars so Greek and emoji glyphs line up.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for line in format_table(headers, rows) {
        let _ = writeln!(handle, "{}", line);
    }
}

fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let pad = |cells: Vec<String>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| match widths.get(i) {
                Some(w) => format!("{:<width$}", cell, width = *w),
                None => cell.clone(),
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(pad(headers.iter().map(|h| h.to_string()).collect()));
    lines.push(pad(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        lines.push(pad(row.clone()));
    }
    lines
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

/// JSON view of one evaluated goal: `{trace, result}` or `{error}`.
#[derive(Debug, Serialize)]
pub struct GoalView {
    pub index: usize,
    pub formula: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expr: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GoalView {
    pub fn from_report(report: &GoalReport, tree: bool) -> Self {
        let (trace, result, error) = match &report.outcome {
            Ok(eval) => (
                eval.trace.iter().map(|s| render_state(s)).collect(),
                Some(eval.result),
                None,
            ),
            Err(e) => (Vec::new(), None, Some(e.to_string())),
        };
        Self {
            index: report.index,
            formula: report.formula.clone(),
            expr: if tree { infix(&report.formula) } else { None },
            trace,
            result,
            error,
        }
    }
}

/// The formula as a parenthesized infix expression, if it parses as a tree.
pub fn infix(raws: &[u32]) -> Option<String> {
    let formula = decode_formula(raws).ok()?;
    Expr::parse(&formula).ok().map(|e| e.to_string())
}

/// Human-readable lines for one goal.
///
/// With `trace` every state is printed, each after the first prefixed with
/// an arrow; without it only the outcome is.
pub fn goal_lines(report: &GoalReport, trace: bool, tree: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if tree {
        if let Some(expr) = infix(&report.formula) {
            lines.push(format!("  {}", render_muted(&expr)));
        }
    }
    match &report.outcome {
        Ok(eval) => {
            if trace {
                for (i, state) in eval.trace.iter().enumerate() {
                    let arrow = if i == 0 { " " } else { TRACE_ARROW };
                    lines.push(format!("  {} {}", arrow, render_state_colored(state)));
                }
            }
            lines.push(format!("  {}", render_result(eval.result)));
        }
        Err(e) => lines.push(format!("  {}", render_goal_error(&e.to_string()))),
    }
    lines
}

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

/// JSON view of one decoded move: `{accepted, glyph, attrs}`.
#[derive(Debug, Serialize)]
pub struct MoveView {
    pub index: u8,
    pub glyph: char,
    pub accepted: bool,
    pub attrs: AttrSet,
}

impl From<&Move> for MoveView {
    fn from(mv: &Move) -> Self {
        Self {
            index: mv.index,
            glyph: mv.glyph(),
            accepted: mv.accepted,
            attrs: mv.attrs(),
        }
    }
}

/// JSON view of one tally row: `{index, glyph, seen, accepted, rejected}`.
#[derive(Debug, Serialize)]
pub struct TallyView {
    pub index: u8,
    pub glyph: char,
    pub seen: u32,
    pub accepted: u32,
    pub rejected: u32,
}

pub fn tally_views(tally: &SymbolTally) -> Vec<TallyView> {
    tally
        .iter()
        .map(|(index, stats)| TallyView {
            index,
            glyph: encode_glyph(index),
            seen: stats.seen,
            accepted: stats.accepted,
            rejected: stats.rejected(),
        })
        .collect()
}

pub const STATS_HEADERS: [&str; 5] = ["GLYPH", "INDEX", "SEEN", "ACCEPTED", "REJECTED"];

pub fn stats_rows(tally: &SymbolTally) -> Vec<Vec<String>> {
    tally_views(tally)
        .into_iter()
        .map(|v| {
            vec![
                v.glyph.to_string(),
                v.index.to_string(),
                v.seen.to_string(),
                v.accepted.to_string(),
                v.rejected.to_string(),
            ]
        })
        .collect()
}

pub const LEGEND_HEADERS: [&str; 3] = ["GLYPH", "INDEX", "ATTRS"];

/// Legend rows for the given symbol indices: glyph, index, presence vector.
pub fn legend_rows(indices: impl IntoIterator<Item = u8>) -> Vec<Vec<String>> {
    indices
        .into_iter()
        .map(|index| {
            vec![
                encode_glyph(index).to_string(),
                index.to_string(),
                decode_attrs(index).to_string(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocs_core::consts::{ATTR_BIT, OP_BIT};
    use ocs_core::game::{decode_moves, evaluate_goals};
    use pretty_assertions::assert_eq;

    #[test]
    fn table_aligns_by_chars() {
        let rows = vec![
            vec!["α".to_string(), "94".to_string()],
            vec!["a".to_string(), "0".to_string()],
        ];
        let lines = format_table(&["GLYPH", "INDEX"], &rows);
        assert_eq!(lines[0], "GLYPH  INDEX");
        assert_eq!(lines[1], "-----  -----");
        assert_eq!(lines[2], "α      94");
    }

    #[test]
    fn goal_view_carries_trace_or_error() {
        let goals = vec![vec![OP_BIT | 4, ATTR_BIT, 5], vec![ATTR_BIT | OP_BIT]];
        let reports = evaluate_goals(&goals, &[3.0]);

        let ok = GoalView::from_report(&reports[0], true);
        assert_eq!(ok.trace, vec!["< attr[0] 5", "< 3 5", "1"]);
        assert_eq!(ok.result, Some(true));
        assert_eq!(ok.expr.as_deref(), Some("(attr[0] < 5)"));
        assert!(ok.error.is_none());

        let bad = GoalView::from_report(&reports[1], false);
        assert!(bad.trace.is_empty());
        assert!(bad.result.is_none());
        assert!(bad.error.is_some());
    }

    #[test]
    fn goal_lines_without_trace() {
        let reports = evaluate_goals(&[vec![OP_BIT, 1, 2]], &[]);
        let full = goal_lines(&reports[0], true, false);
        assert_eq!(full.len(), 3);
        let short = goal_lines(&reports[0], false, false);
        assert_eq!(short.len(), 1);
        assert!(short[0].contains("true"));
    }

    #[test]
    fn stats_and_legend_rows() {
        let tally: SymbolTally = decode_moves(&[0x85, 0x05, 0x81]).into_iter().collect();
        let rows = stats_rows(&tally);
        assert_eq!(rows[0], vec!["b", "1", "1", "1", "0"]);
        assert_eq!(rows[1], vec!["f", "5", "2", "1", "1"]);

        let legend = legend_rows([5]);
        assert_eq!(legend[0], vec!["f", "5", "[1,0,1,0,0,0,0]"]);
    }
}
