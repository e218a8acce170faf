//! Browser bindings
//!
//! Exposes [`BrowserCalculator`] to JavaScript. The page forwards key
//! events and button clicks with its own clock (`performance.now()`), reads
//! back the view as JSON, and synthesizes the click described by
//! [`BrowserCalculator::last_click_tone`]. The theme is kept in
//! `localStorage` and mirrored as the `dark` class on `<html>`.

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::config::CalculatorConfig;
use crate::error::{WidgetError, WidgetResult};
use crate::feedback::{Theme, ThemeStore, THEME_STORAGE_KEY};
use crate::widget::CalculatorWidget;

/// Theme storage in the page's `localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageThemeStore;

impl LocalStorageThemeStore {
    fn storage() -> WidgetResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| WidgetError::theme_store("no window"))?
            .local_storage()
            .map_err(|e| WidgetError::theme_store(format!("{e:?}")))?
            .ok_or_else(|| WidgetError::theme_store("localStorage unavailable"))
    }
}

impl ThemeStore for LocalStorageThemeStore {
    fn load(&self) -> WidgetResult<Option<String>> {
        Self::storage()?
            .get_item(THEME_STORAGE_KEY)
            .map_err(|e| WidgetError::theme_store(format!("{e:?}")))
    }

    fn save(&mut self, value: &str) -> WidgetResult<()> {
        Self::storage()?
            .set_item(THEME_STORAGE_KEY, value)
            .map_err(|e| WidgetError::theme_store(format!("{e:?}")))
    }
}

/// Mirrors the theme onto the document root's class list
fn apply_theme_class(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        if let Err(e) = root.class_list().toggle_with_force("dark", theme.is_dark()) {
            console::warn_1(&e);
        }
    }
}

fn clock(now_ms: f64) -> u64 {
    if now_ms.is_finite() && now_ms > 0.0 {
        now_ms as u64
    } else {
        0
    }
}

/// Browser calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    widget: CalculatorWidget,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create a calculator with the stored theme applied
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();

        let widget = CalculatorWidget::new(&CalculatorConfig::default())
            .with_theme_store(Box::new(LocalStorageThemeStore));
        apply_theme_class(widget.theme());
        Self { widget }
    }

    /// Handle a keyboard key; `true` means the page should prevent the default
    pub fn handle_key(&mut self, key: &str, now_ms: f64) -> bool {
        self.widget.press_key(key, clock(now_ms))
    }

    /// Handle a keypad button click by element id
    pub fn handle_button(&mut self, button_id: &str, now_ms: f64) -> bool {
        self.widget.click_button(button_id, clock(now_ms))
    }

    /// Recall the history row at `index` (0 = newest)
    pub fn select_history(&mut self, index: usize, now_ms: f64) -> bool {
        self.widget.select_history(index, clock(now_ms))
    }

    /// Empty the history panel
    pub fn clear_history(&mut self) {
        self.widget.clear_history();
    }

    /// Toggle light/dark; returns the new theme name
    pub fn toggle_theme(&mut self) -> String {
        let theme = match self.widget.toggle_theme() {
            Ok(theme) => theme,
            Err(e) => {
                console::warn_1(&e.to_string().into());
                self.widget.theme()
            }
        };
        apply_theme_class(theme);
        theme.as_str().to_string()
    }

    /// Formatted display value
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.widget.calculator().formatted_display()
    }

    /// Pending computation trace
    #[wasm_bindgen(getter)]
    pub fn expression(&self) -> String {
        self.widget.calculator().current_expression()
    }

    /// `"AC"` or `"C"`
    #[wasm_bindgen(getter)]
    pub fn clear_label(&self) -> String {
        self.widget.calculator().clear_label().to_string()
    }

    /// Current theme name
    #[wasm_bindgen(getter)]
    pub fn theme(&self) -> String {
        self.widget.theme().as_str().to_string()
    }

    /// Whole view at `now_ms` as JSON
    pub fn view_json(&self, now_ms: f64) -> String {
        serde_json::to_string(&self.widget.view(clock(now_ms))).unwrap_or_else(|_| "{}".into())
    }

    /// History entries as JSON, newest first
    pub fn history_json(&self) -> String {
        self.widget
            .calculator()
            .history()
            .to_json()
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Tone of the most recent click as JSON, `null` if none
    pub fn last_click_tone(&self) -> String {
        self.widget
            .last_sound()
            .and_then(|kind| serde_json::to_string(&kind.tone()).ok())
            .unwrap_or_else(|| "null".to_string())
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the calculator module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Glass calculator initialized".into());
}
