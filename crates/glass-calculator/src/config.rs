//! Widget configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::{History, NumberFormat};
use crate::error::{WidgetError, WidgetResult};
use crate::feedback::Theme;

/// Largest fractional precision `f64` can meaningfully render
const MAX_PRECISION: usize = 15;

/// Tunable widget settings
///
/// Every field has a default, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Maximum number of history entries kept
    pub history_capacity: usize,
    /// Number formatting rules
    pub number_format: NumberFormat,
    /// How long a key press highlights its button, in milliseconds
    pub press_feedback_ms: u64,
    /// How long the display pops after a value change, in milliseconds
    pub pulse_ms: u64,
    /// Play click sounds
    pub sound_enabled: bool,
    /// Theme used when none is stored
    pub default_theme: Theme,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            history_capacity: History::DEFAULT_MAX_ENTRIES,
            number_format: NumberFormat::default(),
            press_feedback_ms: 150,
            pulse_ms: 150,
            sound_enabled: true,
            default_theme: Theme::default(),
        }
    }
}

impl CalculatorConfig {
    /// Create a new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the number format
    #[must_use]
    pub const fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    /// Set the pressed-highlight duration
    #[must_use]
    pub const fn with_press_feedback_ms(mut self, ms: u64) -> Self {
        self.press_feedback_ms = ms;
        self
    }

    /// Set the display pop duration
    #[must_use]
    pub const fn with_pulse_ms(mut self, ms: u64) -> Self {
        self.pulse_ms = ms;
        self
    }

    /// Enable or disable click sounds
    #[must_use]
    pub const fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Set the fallback theme
    #[must_use]
    pub const fn with_default_theme(mut self, theme: Theme) -> Self {
        self.default_theme = theme;
        self
    }

    /// Pressed-highlight duration
    #[must_use]
    pub const fn press_feedback(&self) -> Duration {
        Duration::from_millis(self.press_feedback_ms)
    }

    /// Display pop duration
    #[must_use]
    pub const fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }

    /// Checks that the settings describe a usable widget
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> WidgetResult<()> {
        let fmt = &self.number_format;
        if self.history_capacity == 0 {
            return Err(WidgetError::invalid_config(
                "history_capacity must be at least 1",
            ));
        }
        if fmt.result_precision > MAX_PRECISION {
            return Err(WidgetError::invalid_config(format!(
                "number_format.result_precision must be at most {MAX_PRECISION}, got {}",
                fmt.result_precision
            )));
        }
        if fmt.display_precision > MAX_PRECISION {
            return Err(WidgetError::invalid_config(format!(
                "number_format.display_precision must be at most {MAX_PRECISION}, got {}",
                fmt.display_precision
            )));
        }
        if fmt.exponential_digits > MAX_PRECISION {
            return Err(WidgetError::invalid_config(format!(
                "number_format.exponential_digits must be at most {MAX_PRECISION}, got {}",
                fmt.exponential_digits
            )));
        }
        if !fmt.exponential_threshold.is_finite() || fmt.exponential_threshold <= 0.0 {
            return Err(WidgetError::invalid_config(
                "number_format.exponential_threshold must be a positive number",
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or settings that fail
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> WidgetResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: &Path) -> WidgetResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serializes the configuration as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> WidgetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.history_capacity, 20);
        assert_eq!(config.number_format.result_precision, 6);
        assert_eq!(config.number_format.display_precision, 8);
        assert_eq!(config.press_feedback(), Duration::from_millis(150));
        assert_eq!(config.pulse(), Duration::from_millis(150));
        assert!(config.sound_enabled);
        assert_eq!(config.default_theme, Theme::Dark);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = CalculatorConfig::new()
            .with_history_capacity(5)
            .with_press_feedback_ms(200)
            .with_pulse_ms(0)
            .with_sound(false)
            .with_default_theme(Theme::Light);
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.press_feedback_ms, 200);
        assert_eq!(config.pulse_ms, 0);
        assert!(!config.sound_enabled);
        assert_eq!(config.default_theme, Theme::Light);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            CalculatorConfig::from_json(r#"{"history_capacity": 3, "default_theme": "light"}"#)
                .unwrap();
        assert_eq!(config.history_capacity, 3);
        assert_eq!(config.default_theme, Theme::Light);
        assert_eq!(config.pulse_ms, 150);
        assert_eq!(config.number_format, NumberFormat::default());
    }

    #[test]
    fn test_nested_number_format() {
        let config =
            CalculatorConfig::from_json(r#"{"number_format": {"result_precision": 2}}"#).unwrap();
        assert_eq!(config.number_format.result_precision, 2);
        assert_eq!(config.number_format.display_precision, 8);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = CalculatorConfig::new()
            .with_history_capacity(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("history_capacity"));
    }

    #[test]
    fn test_excessive_precision_rejected() {
        let err = CalculatorConfig::from_json(r#"{"number_format": {"display_precision": 40}}"#)
            .unwrap_err();
        assert!(matches!(err, WidgetError::InvalidConfig { .. }));
    }

    #[test]
    fn test_bad_threshold_rejected() {
        let format = NumberFormat {
            exponential_threshold: -1.0,
            ..NumberFormat::default()
        };
        let config = CalculatorConfig::new().with_number_format(format);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = CalculatorConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, WidgetError::Serialization(_)));
    }

    #[test]
    fn test_unknown_theme_in_json_is_error() {
        assert!(CalculatorConfig::from_json(r#"{"default_theme": "neon"}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"sound_enabled": false}"#).unwrap();
        let config = CalculatorConfig::load(file.path()).unwrap();
        assert!(!config.sound_enabled);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CalculatorConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, WidgetError::Io(_)));
    }

    #[test]
    fn test_to_json_round_trip() {
        let config = CalculatorConfig::new().with_history_capacity(7);
        let json = config.to_json().unwrap();
        assert_eq!(CalculatorConfig::from_json(&json).unwrap(), config);
    }
}
