//! Unified calculator drivers
//!
//! The keyboard and the keypad must behave identically. Each front end gets
//! a [`CalculatorDriver`], and the `verify_*` checks below are
//! written once against the trait and run against both.

use crate::widget::{CalculatorWidget, WidgetView};

/// Abstract driver for calculator interactions
///
/// Input sequences use one character per press: digits, `.`, `+ - * /`,
/// `=`, `%` and `C` (clear). Whitespace is skipped.
pub trait CalculatorDriver {
    /// Presses each character of `sequence`; returns `false` on the first
    /// press the front end cannot express
    fn enter(&mut self, sequence: &str) -> bool;

    /// Formatted display value
    fn display(&self) -> String;

    /// Pending computation trace
    fn expression(&self) -> String;

    /// Recalls the history row at `index` (0 = newest)
    fn recall(&mut self, index: usize) -> bool;

    /// History rows, newest first
    fn history(&self) -> Vec<HistoryItem>;
}

/// A simplified history item for driver results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// The expression that was evaluated
    pub expression: String,
    /// The formatted result
    pub result: String,
}

fn history_items(view: &WidgetView) -> Vec<HistoryItem> {
    view.history
        .iter()
        .map(|item| HistoryItem {
            expression: item.expression.clone(),
            result: item.result.clone(),
        })
        .collect()
}

/// Drives the widget through key names
#[derive(Debug, Default)]
pub struct KeyboardDriver {
    widget: CalculatorWidget,
    clock_ms: u64,
}

impl KeyboardDriver {
    /// Creates a driver over a default widget
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver over an existing widget
    #[must_use]
    pub fn with_widget(widget: CalculatorWidget) -> Self {
        Self {
            widget,
            clock_ms: 0,
        }
    }

    /// The underlying widget
    #[must_use]
    pub fn widget(&self) -> &CalculatorWidget {
        &self.widget
    }
}

impl CalculatorDriver for KeyboardDriver {
    fn enter(&mut self, sequence: &str) -> bool {
        for ch in sequence.chars().filter(|c| !c.is_whitespace()) {
            self.clock_ms += 10;
            let key = match ch {
                'C' => "Escape".to_string(),
                other => other.to_string(),
            };
            if !self.widget.press_key(&key, self.clock_ms) {
                return false;
            }
        }
        true
    }

    fn display(&self) -> String {
        self.widget.view(self.clock_ms).display
    }

    fn expression(&self) -> String {
        self.widget.view(self.clock_ms).expression
    }

    fn recall(&mut self, index: usize) -> bool {
        self.widget.select_history(index, self.clock_ms)
    }

    fn history(&self) -> Vec<HistoryItem> {
        history_items(&self.widget.view(self.clock_ms))
    }
}

/// Drives the widget through keypad button ids
#[derive(Debug, Default)]
pub struct KeypadDriver {
    widget: CalculatorWidget,
    clock_ms: u64,
}

impl KeypadDriver {
    /// Creates a driver over a default widget
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying widget
    #[must_use]
    pub fn widget(&self) -> &CalculatorWidget {
        &self.widget
    }

    fn button_for(ch: char) -> Option<String> {
        let id = match ch {
            '0'..='9' => return Some(format!("btn-{ch}")),
            '.' => "btn-decimal",
            '+' => "btn-plus",
            '-' => "btn-minus",
            '*' => "btn-times",
            '/' => "btn-divide",
            '=' => "btn-equals",
            '%' => "btn-percent",
            'C' => "btn-clear",
            _ => return None,
        };
        Some(id.to_string())
    }
}

impl CalculatorDriver for KeypadDriver {
    fn enter(&mut self, sequence: &str) -> bool {
        for ch in sequence.chars().filter(|c| !c.is_whitespace()) {
            self.clock_ms += 10;
            let Some(id) = Self::button_for(ch) else {
                return false;
            };
            if !self.widget.click_button(&id, self.clock_ms) {
                return false;
            }
        }
        true
    }

    fn display(&self) -> String {
        self.widget.view(self.clock_ms).display
    }

    fn expression(&self) -> String {
        self.widget.view(self.clock_ms).expression
    }

    fn recall(&mut self, index: usize) -> bool {
        self.widget.select_history(index, self.clock_ms)
    }

    fn history(&self) -> Vec<HistoryItem> {
        history_items(&self.widget.view(self.clock_ms))
    }
}

// ===== Shared Behaviour Checks =====
// These work with ANY CalculatorDriver implementation

/// Verifies the four operations
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    assert!(driver.enter("2+3="));
    assert_eq!(driver.display(), "5");
    driver.enter("C");

    driver.enter("10-4=");
    assert_eq!(driver.display(), "6");
    driver.enter("C");

    driver.enter("6*7=");
    assert_eq!(driver.display(), "42");
    driver.enter("C");

    driver.enter("20/4=");
    assert_eq!(driver.display(), "5");
    driver.enter("C");
}

/// Verifies strict left-to-right chaining
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.enter("2+3*");
    assert_eq!(driver.display(), "5");
    assert_eq!(driver.expression(), "5 ×");

    driver.enter("4=");
    assert_eq!(driver.display(), "20");
    assert_eq!(driver.expression(), "");
    assert_eq!(
        driver.history().first(),
        Some(&HistoryItem {
            expression: "5 × 4".to_string(),
            result: "20".to_string(),
        })
    );
    driver.enter("C");
}

/// Verifies division by zero and equals without an operation
pub fn verify_degenerate_input<D: CalculatorDriver>(driver: &mut D) {
    driver.enter("5/0=");
    assert_eq!(driver.display(), "0");
    driver.enter("C");

    let before = driver.history().len();
    driver.enter("7=");
    assert_eq!(driver.display(), "7");
    assert_eq!(driver.history().len(), before);
    driver.enter("C");
}

/// Verifies decimal entry, rounding and percent
pub fn verify_decimals<D: CalculatorDriver>(driver: &mut D) {
    driver.enter("..5");
    assert_eq!(driver.display(), "0.5");
    driver.enter("C");

    driver.enter("1/3=");
    assert_eq!(driver.display(), "0.333333");
    driver.enter("C");

    driver.enter("50%");
    assert_eq!(driver.display(), "0.5");
    driver.enter("C");

    driver.enter("0.1+0.2=");
    assert_eq!(driver.display(), "0.3");
    driver.enter("C");
}

/// Verifies history order and recall into a pending operation
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) {
    driver.enter("C");
    driver.enter("1+1=");
    driver.enter("2+2=");
    driver.enter("3+3=");

    let history = driver.history();
    assert!(history.len() >= 3);
    assert_eq!(history[0].expression, "3 + 3");
    assert_eq!(history[0].result, "6");
    assert_eq!(history[2].expression, "1 + 1");

    driver.enter("C10+");
    assert!(driver.recall(1));
    assert_eq!(driver.display(), "4");
    assert_eq!(driver.expression(), "10 +");
    driver.enter("=");
    assert_eq!(driver.display(), "14");
    driver.enter("C");
}

/// Complete verification suite
pub fn run_all_checks<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_chaining(driver);
    verify_degenerate_input(driver);
    verify_decimals(driver);
    verify_history(driver);
}
