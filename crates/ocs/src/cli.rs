//! Clap CLI definitions for the `ocs` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// ocs -- inspect goal formulas and move histories of the game service.
#[derive(Parser, Debug)]
#[command(
    name = "ocs",
    about = "Inspect goal formulas and move histories",
    long_about = "Decode tagged goal formulas, reduce them step by step against a game's attributes, and render recorded moves as glyph strips.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Configuration directory (default: $OCS_DIR, or the nearest .ocs/).
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reduce one goal formula and print every step.
    Goal(GoalArgs),

    /// Report on a whole game: status, goals, moves.
    Game(GameArgs),

    /// Decode a move history into glyphs, stats and a legend.
    Symbols(SymbolsArgs),

    /// Look up glyphs by symbol index, or indices by glyph.
    Glyph(GlyphArgs),

    /// Show or initialize configuration.
    Config(ConfigArgs),

    /// Print version information.
    Version,

    /// Generate shell completions.
    Completion(CompletionArgs),
}

// ---------------------------------------------------------------------------
// Goal
// ---------------------------------------------------------------------------

/// Arguments for `ocs goal`.
#[derive(Args, Debug)]
pub struct GoalArgs {
    /// Formula elements: raw integers, operators (+ - / * < >=),
    /// attr[N] or @N, op[N].
    #[arg(required = true, num_args = 1..)]
    pub formula: Vec<String>,

    /// Attribute vector, comma separated.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub attrs: Vec<f64>,

    /// Also print the formula as an infix expression.
    #[arg(long)]
    pub tree: bool,
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// Arguments for `ocs game`.
#[derive(Args, Debug)]
pub struct GameArgs {
    /// Game details payload (JSON or TOML, `-` for stdin).
    #[arg(long)]
    pub details: PathBuf,

    /// Game params payload with the goal formulas.
    #[arg(long)]
    pub params: PathBuf,

    /// Symbol history payload.
    #[arg(long)]
    pub symbols: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Symbols / Glyph
// ---------------------------------------------------------------------------

/// Arguments for `ocs symbols`.
#[derive(Args, Debug)]
pub struct SymbolsArgs {
    /// A symbol history file (`-` for stdin), or raw symbol codes.
    #[arg(required = true, num_args = 1..)]
    pub input: Vec<String>,
}

/// Arguments for `ocs glyph`.
#[derive(Args, Debug)]
pub struct GlyphArgs {
    /// Symbol indices (0-127) or single glyph characters.
    #[arg(required = true, num_args = 1..)]
    pub keys: Vec<String>,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Arguments for `ocs config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration (default).
    Show,
    /// Print the configuration directory in use.
    Path,
    /// Write a default config file into ./.ocs/.
    Init(ConfigInitArgs),
}

/// Arguments for `ocs config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `ocs completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: Shell,
}
