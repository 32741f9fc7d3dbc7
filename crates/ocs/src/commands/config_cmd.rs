//! `ocs config` -- show, locate, or initialize configuration.

use std::env;

use anyhow::{Context, Result, bail};
use ocs_config::config::{CONFIG_FILE_NAME, OcsConfig, save_config};
use ocs_config::ocs_dir::{ensure_ocs_dir, find_ocs_dir_or_error};
use tracing::info;

use crate::cli::{ConfigArgs, ConfigCommands, ConfigInitArgs};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `ocs config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        None | Some(ConfigCommands::Show) => show(ctx),
        Some(ConfigCommands::Path) => path(ctx),
        Some(ConfigCommands::Init(init_args)) => init(ctx, init_args),
    }
}

/// Flatten the configuration into `key = value` pairs, in file order.
fn config_entries(config: &OcsConfig) -> Vec<(&'static str, String)> {
    vec![
        ("json", config.json.to_string()),
        ("rules.accepted-limit", config.rules.accepted_limit.to_string()),
        ("rules.loss-limit", config.rules.loss_limit.to_string()),
        ("display.trace", config.display.trace.to_string()),
        ("display.stats", config.display.stats.to_string()),
        ("display.legend", config.display.legend.to_string()),
        ("display.tree", config.display.tree.to_string()),
    ]
}

fn show(ctx: &RuntimeContext) -> Result<()> {
    let config = ctx.load_config()?;
    if ctx.json {
        output_json(&config);
    } else {
        for (key, value) in config_entries(&config) {
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}

fn path(ctx: &RuntimeContext) -> Result<()> {
    let dir = match &ctx.config_dir {
        Some(dir) => dir.clone(),
        None => {
            let cwd = env::current_dir().context("failed to read working directory")?;
            find_ocs_dir_or_error(&cwd)?
        }
    };
    if ctx.json {
        output_json(&serde_json::json!({ "path": dir }));
    } else {
        println!("{}", dir.display());
    }
    Ok(())
}

fn init(ctx: &RuntimeContext, args: &ConfigInitArgs) -> Result<()> {
    let dir = match &ctx.config_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            dir.clone()
        }
        None => {
            let cwd = env::current_dir().context("failed to read working directory")?;
            ensure_ocs_dir(&cwd)?
        }
    };

    let file = dir.join(CONFIG_FILE_NAME);
    if file.exists() && !args.force {
        bail!(
            "{} already exists\nHint: pass --force to overwrite it",
            file.display()
        );
    }

    save_config(&dir, &OcsConfig::default())
        .with_context(|| format!("failed to write {}", file.display()))?;
    info!(path = %file.display(), "wrote default config");

    if ctx.json {
        output_json(&serde_json::json!({ "path": file }));
    } else if !ctx.quiet {
        println!("Initialized {}", file.display());
    }
    Ok(())
}
