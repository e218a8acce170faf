//! glass-calc CLI library
//!
//! Terminal front end for the glass calculator widget: scripted key
//! presses, an interactive REPL and theme management.

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]
#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
pub mod output;
pub mod press;
pub mod repl;

pub use commands::{Cli, ColorArg, Commands, PressArgs, ThemeAction, ThemeArg, ThemeArgs};
pub use config::{CliConfig, ColorChoice, Verbosity, DEFAULT_THEME_FILE};
pub use error::{CliError, CliResult};
