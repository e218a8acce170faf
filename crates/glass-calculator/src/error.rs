//! Error types for the widget's ambient layers
//!
//! The calculator core never fails; these errors come from configuration
//! and theme persistence.

use thiserror::Error;

/// Result type for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Errors that can occur outside the arithmetic core
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Configuration failed validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// Theme could not be loaded or stored
    #[error("Theme storage failed: {message}")]
    ThemeStore {
        /// Error message
        message: String,
    },

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WidgetError {
    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a theme storage error
    #[must_use]
    pub fn theme_store(message: impl Into<String>) -> Self {
        Self::ThemeStore {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = WidgetError::invalid_config("history_capacity must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: history_capacity must be at least 1"
        );
    }

    #[test]
    fn test_theme_store_display() {
        let err = WidgetError::theme_store("storage unavailable");
        assert_eq!(err.to_string(), "Theme storage failed: storage unavailable");
    }

    #[test]
    fn test_from_serde_error() {
        let serde_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: WidgetError = serde_err.into();
        assert!(matches!(err, WidgetError::Serialization(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: WidgetError = io_err.into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
