//! `ocs symbols` -- decode a move history: glyph strip, stats, legend.

use std::path::Path;

use anyhow::{Context, Result};
use ocs_config::config::DisplayConfig;
use ocs_core::game::{SymbolHistory, SymbolTally, attribute_totals, decode_moves};
use ocs_core::parser::load;
use ocs_core::symbol::{Move, glyph_string};
use ocs_ui::styles::{render_category, render_strip};
use ocs_ui::terminal::{terminal_width, wrap_glyphs};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::SymbolsArgs;
use crate::context::RuntimeContext;
use crate::output::{
    LEGEND_HEADERS, MoveView, STATS_HEADERS, TallyView, legend_rows, output_json, output_table,
    stats_rows, tally_views,
};

/// JSON view of a decoded move history.
#[derive(Debug, Serialize)]
pub struct SymbolsView {
    pub count: usize,
    pub accepted: u32,
    pub strip: String,
    pub moves: Vec<MoveView>,
    pub stats: Vec<TallyView>,
    pub attribute_totals: Vec<u32>,
}

impl SymbolsView {
    pub fn new(moves: &[Move]) -> Self {
        let tally: SymbolTally = moves.iter().copied().collect();
        Self {
            count: moves.len(),
            accepted: tally.accepted(),
            strip: glyph_string(moves),
            moves: moves.iter().map(MoveView::from).collect(),
            stats: tally_views(&tally),
            attribute_totals: attribute_totals(moves).to_vec(),
        }
    }
}

/// Execute the `ocs symbols` command.
pub fn run(ctx: &RuntimeContext, args: &SymbolsArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let moves = read_moves(&args.input)?;

    if ctx.wants_json(&config) {
        output_json(&SymbolsView::new(&moves));
    } else if ctx.quiet {
        println!("{}", glyph_string(&moves));
    } else {
        print_moves(&moves, &config.display);
    }
    Ok(())
}

/// A single `-` or existing path is a history file; anything else is a
/// list of raw symbol codes.
fn read_moves(input: &[String]) -> Result<Vec<Move>> {
    if let [single] = input {
        let path = Path::new(single);
        if single == "-" || path.is_file() {
            let history: SymbolHistory = load(path)
                .with_context(|| format!("failed to load symbol history from {}", single))?;
            if history.count as usize != history.symbols.len() {
                warn!(
                    count = history.count,
                    symbols = history.symbols.len(),
                    "symbol count does not match history length"
                );
            }
            return Ok(history.moves());
        }
    }

    let raws = input
        .iter()
        .map(|s| {
            s.parse::<u8>()
                .with_context(|| format!("invalid symbol code '{}' (expected 0-255)", s))
        })
        .collect::<Result<Vec<u8>>>()?;
    debug!(count = raws.len(), "decoding raw symbol codes");
    Ok(decode_moves(&raws))
}

/// Print the strip, and the stats and legend sections the display config
/// asks for.
pub fn print_moves(moves: &[Move], display: &DisplayConfig) {
    println!("{}", render_category("moves"));
    if moves.is_empty() {
        println!("  no moves recorded");
        return;
    }

    let tally: SymbolTally = moves.iter().copied().collect();
    let width = terminal_width().saturating_sub(2);
    let mut rest = moves;
    for row in wrap_glyphs(&glyph_string(moves), width) {
        let (head, tail) = rest.split_at(row.chars().count());
        println!("  {}", render_strip(head));
        rest = tail;
    }
    println!(
        "  {} moves, {} accepted, {} rejected",
        tally.seen(),
        tally.accepted(),
        tally.seen() - tally.accepted()
    );

    if display.stats {
        println!();
        println!("{}", render_category("stats"));
        output_table(&STATS_HEADERS, &stats_rows(&tally));
        let totals: Vec<String> = attribute_totals(moves).iter().map(u32::to_string).collect();
        println!("attribute totals: [{}]", totals.join(","));
    }

    if display.legend {
        println!();
        println!("{}", render_category("legend"));
        output_table(&LEGEND_HEADERS, &legend_rows(tally.iter().map(|(i, _)| i)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn raw_codes_are_decoded() {
        let moves = read_moves(&["133".to_string(), "5".to_string()]).unwrap();
        assert_eq!(moves.len(), 2);
        assert!(moves[0].accepted);
        assert!(!moves[1].accepted);
        assert_eq!(moves[0].index, 5);
    }

    #[test]
    fn bad_code_is_an_error() {
        let err = read_moves(&["300".to_string()]).unwrap_err();
        assert!(format!("{err:#}").contains("invalid symbol code '300'"));
    }

    #[test]
    fn history_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symbols.json");
        std::fs::write(&path, r#"{"count": 3, "symbols": [128, 1, 130]}"#).unwrap();
        let moves = read_moves(&[path.display().to_string()]).unwrap();
        assert_eq!(glyph_string(&moves), "abc");
    }

    #[test]
    fn view_summarizes_history() {
        let view = SymbolsView::new(&decode_moves(&[0x85, 0x05, 0x02]));
        assert_eq!(view.count, 3);
        assert_eq!(view.accepted, 1);
        assert_eq!(view.strip, "ffc");
        assert_eq!(view.stats.len(), 2);
        assert_eq!(view.attribute_totals, vec![2, 1, 2, 0, 0, 0, 0]);
    }
}
