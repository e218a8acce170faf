//! Widget presentation model
//!
//! [`CalculatorWidget`] wraps the [`Calculator`] with everything the screen
//! needs but arithmetic does not: the keypad and keyboard front ends, click
//! sounds, the theme, and two short-lived highlights (the pressed button and
//! the display pop). Timers are driven by the caller's clock in milliseconds,
//! so the model stays deterministic and runs the same in a browser or a
//! terminal.

use serde::Serialize;
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::core::{Action, Calculator, History};
use crate::error::WidgetResult;
use crate::feedback::{
    MemoryThemeStore, SilentPlayer, SoundKind, SoundPlayer, Theme, ThemeController, ThemeStore,
};
use crate::input::{button_id, KeyboardMapper, Keypad};

/// Text shown in the history panel when it is empty
pub const EMPTY_HISTORY_TEXT: &str = "Empty history";

/// Font size tier of the display, shrinking as the value grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplaySize {
    /// Up to 6 characters
    ExtraLarge,
    /// 7 or 8 characters
    Large,
    /// 9 or 10 characters
    Medium,
    /// Anything longer
    Small,
}

impl DisplaySize {
    /// Tier for a formatted display value; a leading minus sign is not counted
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        let len = text.replacen('-', "", 1).chars().count();
        match len {
            0..=6 => Self::ExtraLarge,
            7..=8 => Self::Large,
            9..=10 => Self::Medium,
            _ => Self::Small,
        }
    }
}

/// One row of the history panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryItemView {
    /// Stable list key
    pub id: u64,
    /// Upper line, e.g. `"5 × 4"`
    pub expression: String,
    /// Lower line, e.g. `"= 20"`
    pub result_line: String,
    /// Value recalled when the row is clicked
    pub result: String,
}

/// Everything needed to draw the widget at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetView {
    /// Formatted display value
    pub display: String,
    /// Pending computation trace, empty when none
    pub expression: String,
    /// `"AC"` or `"C"`
    pub clear_label: String,
    /// Button id of the highlighted operator
    pub active_operator: Option<String>,
    /// Button id highlighted by a recent key press
    pub pressed_button: Option<String>,
    /// True while the display pop is running
    pub pulsing: bool,
    /// Display font tier
    pub display_size: DisplaySize,
    /// History rows, newest first
    pub history: Vec<HistoryItemView>,
    /// Placeholder shown instead of an empty history
    pub history_placeholder: Option<String>,
    /// Current color theme
    pub theme: Theme,
}

/// A highlight that expires at a given clock time
#[derive(Debug, Clone, PartialEq, Eq)]
struct Highlight {
    button: &'static str,
    until_ms: u64,
}

/// Calculator widget: state machine plus presentation state
#[derive(Debug)]
pub struct CalculatorWidget {
    calculator: Calculator,
    keypad: Keypad,
    keyboard: KeyboardMapper,
    sound: Box<dyn SoundPlayer>,
    sound_enabled: bool,
    last_sound: Option<SoundKind>,
    theme: ThemeController<Box<dyn ThemeStore>>,
    pressed: Option<Highlight>,
    pulse_until_ms: Option<u64>,
    shown_display: String,
    press_feedback_ms: u64,
    pulse_ms: u64,
}

impl Default for CalculatorWidget {
    fn default() -> Self {
        Self::new(&CalculatorConfig::default())
    }
}

impl CalculatorWidget {
    /// Creates a silent widget with in-memory theme storage
    #[must_use]
    pub fn new(config: &CalculatorConfig) -> Self {
        let calculator = Calculator::with_parts(
            History::with_capacity(config.history_capacity),
            config.number_format,
        );
        let shown_display = calculator.formatted_display();
        let store: Box<dyn ThemeStore> = Box::new(MemoryThemeStore::new());
        Self {
            calculator,
            keypad: Keypad::new(),
            keyboard: KeyboardMapper::new(),
            sound: Box::new(SilentPlayer),
            sound_enabled: config.sound_enabled,
            last_sound: None,
            theme: ThemeController::load(store, config.default_theme),
            pressed: None,
            pulse_until_ms: None,
            shown_display,
            press_feedback_ms: config.press_feedback_ms,
            pulse_ms: config.pulse_ms,
        }
    }

    /// Replaces the sound output
    #[must_use]
    pub fn with_sound_player(mut self, player: Box<dyn SoundPlayer>) -> Self {
        self.sound = player;
        self
    }

    /// Replaces the theme storage and loads the theme stored there
    #[must_use]
    pub fn with_theme_store(mut self, store: Box<dyn ThemeStore>) -> Self {
        let fallback = self.theme.fallback();
        self.theme = ThemeController::load(store, fallback);
        self
    }

    // ===== Accessors =====

    /// The wrapped state machine
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// The on-screen keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Current color theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Most recent click played, if sound is enabled
    #[must_use]
    pub fn last_sound(&self) -> Option<SoundKind> {
        self.last_sound
    }

    /// Button highlighted by a key press at clock time `now_ms`
    #[must_use]
    pub fn pressed_button(&self, now_ms: u64) -> Option<&'static str> {
        self.pressed
            .as_ref()
            .filter(|h| now_ms < h.until_ms)
            .map(|h| h.button)
    }

    /// True while the display pop runs at clock time `now_ms`
    #[must_use]
    pub fn is_pulsing(&self, now_ms: u64) -> bool {
        self.pulse_until_ms.is_some_and(|until| now_ms < until)
    }

    // ===== Input =====

    /// Handles a key event; returns `false` for unmapped keys
    ///
    /// A handled key should have its default browser behavior suppressed.
    pub fn press_key(&mut self, key: &str, now_ms: u64) -> bool {
        let Some(action) = self.keyboard.map_key(key) else {
            debug!(key, "unmapped key ignored");
            return false;
        };

        if let Some(button) = button_id(&action) {
            self.pressed = Some(Highlight {
                button,
                until_ms: now_ms.saturating_add(self.press_feedback_ms),
            });
        }
        if let Some(kind) = SoundKind::for_action(&action) {
            self.play(kind);
        }
        self.apply(&action, now_ms);
        true
    }

    /// Handles a keypad click by element id; returns `false` for unknown ids
    pub fn click_button(&mut self, element_id: &str, now_ms: u64) -> bool {
        let Some(button) = self.keypad.find_button_by_id(element_id) else {
            debug!(element_id, "unknown button ignored");
            return false;
        };
        let action = button.action.clone();
        self.play(SoundKind::for_variant(button.variant));
        self.apply(&action, now_ms);
        true
    }

    /// Recalls the history row at `index` (0 = newest); returns `false` if absent
    pub fn select_history(&mut self, index: usize, now_ms: u64) -> bool {
        let Some(result) = self
            .calculator
            .history()
            .get(index)
            .map(|entry| entry.result.clone())
        else {
            return false;
        };
        self.apply(&Action::SelectHistory(result), now_ms);
        true
    }

    /// Empties the history panel
    pub fn clear_history(&mut self) {
        self.calculator.clear_history();
    }

    /// Switches between light and dark, persisting the choice
    ///
    /// # Errors
    ///
    /// Returns an error if the theme store cannot be written.
    pub fn toggle_theme(&mut self) -> WidgetResult<Theme> {
        let next = self.theme.theme().toggled();
        self.play(SoundKind::Function);
        self.theme.set(next)?;
        Ok(next)
    }

    /// Sets the theme without a click, persisting the choice
    ///
    /// # Errors
    ///
    /// Returns an error if the theme store cannot be written.
    pub fn set_theme(&mut self, theme: Theme) -> WidgetResult<()> {
        self.theme.set(theme)
    }

    // ===== Rendering =====

    /// Snapshot of everything on screen at clock time `now_ms`
    #[must_use]
    pub fn view(&self, now_ms: u64) -> WidgetView {
        let display = self.calculator.formatted_display();
        let history: Vec<HistoryItemView> = self
            .calculator
            .history()
            .iter()
            .map(|entry| HistoryItemView {
                id: entry.id,
                expression: entry.expression.clone(),
                result_line: format!("= {}", entry.result),
                result: entry.result.clone(),
            })
            .collect();
        let history_placeholder = history
            .is_empty()
            .then(|| EMPTY_HISTORY_TEXT.to_string());

        WidgetView {
            display_size: DisplaySize::for_text(&display),
            display,
            expression: self.calculator.current_expression(),
            clear_label: self.calculator.clear_label().to_string(),
            active_operator: self
                .calculator
                .active_operator()
                .and_then(|op| button_id(&Action::Operation(op)))
                .map(str::to_string),
            pressed_button: self.pressed_button(now_ms).map(str::to_string),
            pulsing: self.is_pulsing(now_ms),
            history,
            history_placeholder,
            theme: self.theme.theme(),
        }
    }

    fn apply(&mut self, action: &Action, now_ms: u64) {
        self.calculator.dispatch(action);

        let shown = self.calculator.formatted_display();
        if shown != self.shown_display {
            self.pulse_until_ms = Some(now_ms.saturating_add(self.pulse_ms));
            self.shown_display = shown;
        }
    }

    fn play(&mut self, kind: SoundKind) {
        if self.sound_enabled {
            self.sound.play(kind);
            self.last_sound = Some(kind);
        }
    }
}
