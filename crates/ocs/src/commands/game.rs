//! `ocs game` -- full report for one game: status, goals, moves.

use std::path::Path;

use anyhow::{Context, Result};
use ocs_core::consts::MAX_SYMBOL;
use ocs_core::game::{
    GameDetails, GameParams, GameStatus, GoalReport, SymbolHistory, evaluate_goals,
    goals_satisfied,
};
use ocs_core::parser::load;
use ocs_core::symbol::encode_glyph;
use ocs_core::types::format_value;
use ocs_ui::styles::{render_bold, render_category, render_fail, render_pass, render_status};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::cli::GameArgs;
use crate::commands::symbols::{SymbolsView, print_moves};
use crate::context::RuntimeContext;
use crate::output::{GoalView, goal_lines, infix, output_json};

#[derive(Debug, Serialize)]
struct NextView {
    index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    glyph: Option<char>,
}

/// JSON view of a game report.
#[derive(Debug, Serialize)]
struct GameView {
    #[serde(rename = "type")]
    game_type: i64,
    status: GameStatus,
    count: u32,
    accepted: u32,
    rejected: u32,
    next: NextView,
    attrs: Vec<f64>,
    limits_reached: bool,
    goals_hold: bool,
    goals: Vec<GoalView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    symbols: Option<SymbolsView>,
}

fn load_payload<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    load(path).with_context(|| format!("failed to load {} from {}", what, path.display()))
}

fn next_glyph(next: u32) -> Option<char> {
    u8::try_from(next)
        .ok()
        .filter(|i| (*i as usize) < MAX_SYMBOL)
        .map(encode_glyph)
}

/// Execute the `ocs game` command.
pub fn run(ctx: &RuntimeContext, args: &GameArgs) -> Result<()> {
    let config = ctx.load_config()?;

    let details: GameDetails = load_payload(&args.details, "game details")?;
    let params: GameParams = load_payload(&args.params, "game params")?;
    let history: Option<SymbolHistory> = args
        .symbols
        .as_deref()
        .map(|p| load_payload(p, "symbol history"))
        .transpose()?;

    info!(
        game_type = details.game_type,
        goals = params.goals.len(),
        attrs = details.attrs.len(),
        "loaded game"
    );
    if details.game_type != params.game_type {
        warn!(
            details = details.game_type,
            params = params.game_type,
            "game type differs between details and params"
        );
    }

    // A bad goal is reported in its own slot; the command still succeeds.
    let reports = evaluate_goals(&params.goals, &details.attrs);
    let goals_hold = goals_satisfied(&reports);
    let limits_reached = config.rules.is_finished(details.accepted, details.count);
    let moves = history.as_ref().map(SymbolHistory::moves);
    let tree = config.display.tree;

    if ctx.wants_json(&config) {
        output_json(&GameView {
            game_type: details.game_type,
            status: details.status(),
            count: details.count,
            accepted: details.accepted,
            rejected: details.rejected(),
            next: NextView {
                index: details.next,
                glyph: next_glyph(details.next),
            },
            attrs: details.attrs.clone(),
            limits_reached,
            goals_hold,
            goals: reports
                .iter()
                .map(|r| GoalView::from_report(r, tree))
                .collect(),
            symbols: moves.as_deref().map(SymbolsView::new),
        });
        return Ok(());
    }

    if ctx.quiet {
        println!("{}", details.status());
        return Ok(());
    }

    print_summary(&details, limits_reached);

    println!();
    println!("{}", render_category("goals"));
    if reports.is_empty() {
        println!("  no goals");
    }
    for report in &reports {
        // The header already shows the infix form.
        print_goal_header(report);
        for line in goal_lines(report, config.display.trace, false) {
            println!("{}", line);
        }
    }
    let verdict = if goals_hold {
        render_pass("yes")
    } else {
        render_fail("no")
    };
    println!("all goals hold: {}", verdict);

    if let Some(moves) = moves {
        println!();
        print_moves(&moves, &config.display);
    }

    Ok(())
}

fn print_summary(details: &GameDetails, limits_reached: bool) {
    println!(
        "{} {}: {}",
        render_bold("game type"),
        details.game_type,
        render_status(details.status())
    );
    println!(
        "  count {}  accepted {}  rejected {}",
        details.count,
        details.accepted,
        details.rejected()
    );
    match next_glyph(details.next) {
        Some(g) => println!("  next: {} ({})", g, details.next),
        None => println!("  next: {}", details.next),
    }
    let attrs: Vec<String> = details.attrs.iter().map(|v| format_value(*v)).collect();
    println!("  attrs: [{}]", attrs.join(", "));
    if limits_reached && !details.finished {
        println!("  move limits reached");
    }
}

fn print_goal_header(report: &GoalReport) {
    let label = match infix(&report.formula) {
        Some(expr) => expr,
        None => format!("{:?}", report.formula),
    };
    println!("goal {}: {}", report.index, label);
}
