//! CLI configuration

use glass_calculator::config::CalculatorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default theme file name, placed in the system temp directory
pub const DEFAULT_THEME_FILE: &str = "glass-calc-theme.json";

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - info logs
    Verbose,
    /// Debug - every dispatched action
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Log level used when `RUST_LOG` is not set
    #[must_use]
    pub const fn log_level(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stdout()),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Widget settings
    pub widget: CalculatorConfig,
    /// Where the theme is persisted
    pub theme_file: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            color: ColorChoice::Auto,
            widget: CalculatorConfig::default(),
            theme_file: std::env::temp_dir().join(DEFAULT_THEME_FILE),
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set widget settings
    #[must_use]
    pub fn with_widget(mut self, widget: CalculatorConfig) -> Self {
        self.widget = widget;
        self
    }

    /// Set the theme file
    #[must_use]
    pub fn with_theme_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.theme_file = path.into();
        self
    }

    /// Theme file path
    #[must_use]
    pub fn theme_file(&self) -> &Path {
        &self.theme_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert!(Verbosity::Quiet.is_quiet());
        assert!(!Verbosity::Normal.is_verbose());
        assert!(Verbosity::Verbose.is_verbose());
        assert!(Verbosity::Debug.is_verbose());
        assert_eq!(Verbosity::Quiet.log_level(), "error");
        assert_eq!(Verbosity::Debug.log_level(), "debug");
    }

    #[test]
    fn test_color_choice() {
        assert!(ColorChoice::Always.should_color());
        assert!(!ColorChoice::Never.should_color());
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert_eq!(config.widget, CalculatorConfig::default());
        assert!(config.theme_file().ends_with(DEFAULT_THEME_FILE));
    }

    #[test]
    fn test_builders() {
        let config = CliConfig::new()
            .with_verbosity(Verbosity::Quiet)
            .with_color(ColorChoice::Never)
            .with_widget(CalculatorConfig::new().with_history_capacity(3))
            .with_theme_file("/tmp/theme.json");
        assert!(config.verbosity.is_quiet());
        assert_eq!(config.color, ColorChoice::Never);
        assert_eq!(config.widget.history_capacity, 3);
        assert_eq!(config.theme_file(), Path::new("/tmp/theme.json"));
    }
}
