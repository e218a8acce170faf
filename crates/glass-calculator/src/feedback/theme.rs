//! Light/dark theme and its persistence
//!
//! The theme is stored as a plain string (`"light"` / `"dark"`) under
//! [`THEME_STORAGE_KEY`]. Any other stored value falls back to
//! [`Theme::default`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::sound::{SoundKind, SoundPlayer};
use crate::error::{WidgetError, WidgetResult};

/// Storage key of the persisted theme
pub const THEME_STORAGE_KEY: &str = "calculator-theme";

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    Light,
    /// Dark background
    #[default]
    Dark,
}

impl Theme {
    /// Stored form of the theme
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored value; only the exact stored forms are accepted
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// True for [`Theme::Dark`]
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value storage for the theme preference
pub trait ThemeStore: fmt::Debug {
    /// Reads the raw stored value, `None` when nothing is stored
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&self) -> WidgetResult<Option<String>>;

    /// Stores a raw value
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn save(&mut self, value: &str) -> WidgetResult<()>;
}

impl<T: ThemeStore + ?Sized> ThemeStore for Box<T> {
    fn load(&self) -> WidgetResult<Option<String>> {
        (**self).load()
    }

    fn save(&mut self, value: &str) -> WidgetResult<()> {
        (**self).save(value)
    }
}

/// In-memory theme storage
#[derive(Debug, Default, Clone)]
pub struct MemoryThemeStore {
    value: Option<String>,
}

impl MemoryThemeStore {
    /// Creates empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage already holding `value`
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> WidgetResult<Option<String>> {
        Ok(self.value.clone())
    }

    fn save(&mut self, value: &str) -> WidgetResult<()> {
        self.value = Some(value.to_string());
        Ok(())
    }
}

/// Theme storage in a JSON object file, keyed like browser storage
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    /// Storage backed by the file at `path`; the file is created on first save
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> WidgetResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> WidgetResult<Option<String>> {
        let mut map = self.read_map()?;
        Ok(map.remove(THEME_STORAGE_KEY))
    }

    fn save(&mut self, value: &str) -> WidgetResult<()> {
        let mut map = self.read_map()?;
        map.insert(THEME_STORAGE_KEY.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&map)?;
        fs::write(&self.path, json).map_err(|e| {
            WidgetError::theme_store(format!("cannot write {}: {e}", self.path.display()))
        })
    }
}

/// Owns the current theme and keeps the store in sync
#[derive(Debug)]
pub struct ThemeController<S: ThemeStore> {
    store: S,
    theme: Theme,
    fallback: Theme,
}

impl<S: ThemeStore> ThemeController<S> {
    /// Loads the stored theme, falling back to `fallback`
    ///
    /// Unreadable storage is logged and treated as empty.
    pub fn load(store: S, fallback: Theme) -> Self {
        let theme = match store.load() {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|| {
                debug!(stored = %raw, "unknown stored theme, using fallback");
                fallback
            }),
            Ok(None) => fallback,
            Err(err) => {
                warn!(error = %err, "theme storage unreadable, using fallback");
                fallback
            }
        };
        Self {
            store,
            theme,
            fallback,
        }
    }

    /// Current theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Theme used when nothing valid is stored
    #[must_use]
    pub fn fallback(&self) -> Theme {
        self.fallback
    }

    /// Underlying store
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Sets and persists the theme
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written. The in-memory
    /// theme is updated regardless.
    pub fn set(&mut self, theme: Theme) -> WidgetResult<()> {
        self.theme = theme;
        info!(%theme, "theme changed");
        self.store.save(theme.as_str())
    }

    /// Switches to the other theme with a function click
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn toggle(&mut self, sound: &mut dyn SoundPlayer) -> WidgetResult<Theme> {
        sound.play(SoundKind::Function);
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }
}
