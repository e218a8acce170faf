//! Feedback collaborators: click sounds and the color theme
//!
//! Neither influences arithmetic. Both sit behind small capability traits
//! ([`SoundPlayer`], [`ThemeStore`]) so the widget can run headless.

mod sound;
mod theme;

pub use sound::{ClickTone, RecordingPlayer, SilentPlayer, SoundKind, SoundPlayer};
pub use theme::{
    FileThemeStore, MemoryThemeStore, Theme, ThemeController, ThemeStore, THEME_STORAGE_KEY,
};
