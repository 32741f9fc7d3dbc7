//! `ocs goal` -- reduce one formula and print every step.

use anyhow::{Context, Result};
use ocs_core::game::{GoalReport, evaluate_goal};
use ocs_core::parser::parse_formula;
use tracing::debug;

use crate::cli::GoalArgs;
use crate::context::RuntimeContext;
use crate::output::{GoalView, goal_lines, output_json};

/// Execute the `ocs goal` command.
pub fn run(ctx: &RuntimeContext, args: &GoalArgs) -> Result<()> {
    let config = ctx.load_config()?;

    let raws = parse_formula(&args.formula.join(" ")).context("invalid formula")?;
    debug!(len = raws.len(), attrs = args.attrs.len(), "evaluating goal");

    let eval = evaluate_goal(&raws, &args.attrs)
        .with_context(|| format!("goal {:?} cannot be evaluated", raws))?;
    let report = GoalReport {
        index: 0,
        formula: raws,
        outcome: Ok(eval),
    };
    let tree = args.tree || config.display.tree;

    if ctx.wants_json(&config) {
        output_json(&GoalView::from_report(&report, tree));
    } else if ctx.quiet {
        println!("{}", report.is_satisfied());
    } else {
        for line in goal_lines(&report, config.display.trace, tree) {
            println!("{}", line);
        }
    }

    Ok(())
}
