//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use glass_calculator::feedback::Theme;
use std::path::PathBuf;

/// glass-calc: terminal front end for the glass calculator
#[derive(Parser, Debug)]
#[command(name = "glass-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Widget configuration file (JSON)
    #[arg(long, global = true, env = "GLASS_CALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// File holding the persisted theme
    #[arg(long, global = true, env = "GLASS_CALC_THEME_FILE")]
    pub theme_file: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press keys or buttons and print the resulting screen
    ///
    /// Tokens are key names (`7`, `+`, `Enter`, `Escape`, `Backspace`),
    /// keypad button ids (`btn-sign`), runs of single-character keys
    /// (`12.5`), or `history:<n>` to recall the n-th newest result.
    Press(PressArgs),

    /// Interactive calculator in the terminal
    Repl,

    /// Show or change the persisted theme
    Theme(ThemeArgs),

    /// Print the keyboard mapping
    Keys,
}

/// Arguments for the press command
#[derive(Parser, Debug)]
pub struct PressArgs {
    /// Keys, button ids or history recalls, applied in order
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub tokens: Vec<String>,

    /// Print the screen as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the theme command
#[derive(Parser, Debug)]
pub struct ThemeArgs {
    /// Theme operation
    #[command(subcommand)]
    pub action: ThemeAction,
}

/// Theme operations
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set a specific theme
    Set {
        /// Theme to store
        theme: ThemeArg,
    },
}

/// Theme argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    /// Light background
    Light,
    /// Dark background
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

/// Color argument
#[derive(ValueEnum, Debug, Clone, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
