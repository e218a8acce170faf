//! On-screen keypad
//!
//! Visual feedback: each button knows its action, its look (variant) and
//! its position, so the pointer front end is a lookup from element id to
//! [`Action`].
//!
//! Layout:
//! ```text
//! [ AC ] [ ± ] [ % ] [ ÷ ]
//! [ 7  ] [ 8 ] [ 9 ] [ × ]
//! [ 4  ] [ 5 ] [ 6 ] [ − ]
//! [ 1  ] [ 2 ] [ 3 ] [ + ]
//! [ 0        ] [ . ] [ = ]
//! ```

use serde::Serialize;

use crate::core::{Action, Operator};

/// Visual family of a button; also selects its click sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Digits, decimal point
    Number,
    /// Clear, sign, percent
    Function,
    /// Arithmetic operators and equals
    Operator,
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeypadButtonDef {
    /// Element id, e.g. `"btn-7"`
    pub id: String,
    /// Printed label
    pub label: String,
    /// Visual family
    pub variant: ButtonVariant,
    /// Action dispatched on click
    pub action: Action,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub col_span: usize,
}

impl KeypadButtonDef {
    /// Creates a single-column button for `action`
    #[must_use]
    pub fn new(action: Action, row: usize, col: usize) -> Self {
        Self {
            id: button_id(&action).unwrap_or("btn-unknown").to_string(),
            label: button_label(&action),
            variant: button_variant(&action),
            action,
            row,
            col,
            col_span: 1,
        }
    }

    /// Widens the button over `span` columns
    #[must_use]
    pub fn spanning(mut self, span: usize) -> Self {
        self.col_span = span;
        self
    }

    /// True if the button covers grid cell (`row`, `col`)
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && col >= self.col && col < self.col + self.col_span
    }
}

/// Element id of the button that dispatches `action`
///
/// Backspace is keyboard-only and history selection happens in the
/// history panel, so neither has a keypad button.
#[must_use]
pub fn button_id(action: &Action) -> Option<&'static str> {
    const DIGITS: [&str; 10] = [
        "btn-0", "btn-1", "btn-2", "btn-3", "btn-4", "btn-5", "btn-6", "btn-7", "btn-8", "btn-9",
    ];
    match action {
        Action::Digit(d) => DIGITS.get(usize::from(*d)).copied(),
        Action::Decimal => Some("btn-decimal"),
        Action::ToggleSign => Some("btn-sign"),
        Action::Percent => Some("btn-percent"),
        Action::Clear => Some("btn-clear"),
        Action::Operation(op) => Some(match op {
            Operator::Add => "btn-plus",
            Operator::Subtract => "btn-minus",
            Operator::Multiply => "btn-times",
            Operator::Divide => "btn-divide",
        }),
        Action::Equals => Some("btn-equals"),
        Action::Backspace | Action::SelectHistory(_) => None,
    }
}

fn button_label(action: &Action) -> String {
    match action {
        Action::Digit(d) => d.to_string(),
        Action::Decimal => ".".to_string(),
        Action::ToggleSign => "±".to_string(),
        Action::Percent => "%".to_string(),
        Action::Backspace => "⌫".to_string(),
        Action::Clear => "AC".to_string(),
        Action::Operation(op) => op.button_label().to_string(),
        Action::Equals => "=".to_string(),
        Action::SelectHistory(result) => result.clone(),
    }
}

/// Visual family of the button that dispatches `action`
#[must_use]
pub fn button_variant(action: &Action) -> ButtonVariant {
    match action {
        Action::Digit(_) | Action::Decimal | Action::Backspace | Action::SelectHistory(_) => {
            ButtonVariant::Number
        }
        Action::ToggleSign | Action::Percent | Action::Clear => ButtonVariant::Function,
        Action::Operation(_) | Action::Equals => ButtonVariant::Operator,
    }
}

/// The calculator keypad grid
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Button definitions in row-major order
    buttons: Vec<KeypadButtonDef>,
    /// Number of columns
    cols: usize,
    /// Number of rows
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard 5×4 keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            // Row 0: AC ± % ÷
            KeypadButtonDef::new(Action::Clear, 0, 0),
            KeypadButtonDef::new(Action::ToggleSign, 0, 1),
            KeypadButtonDef::new(Action::Percent, 0, 2),
            KeypadButtonDef::new(Action::Operation(Operator::Divide), 0, 3),
            // Row 1: 7 8 9 ×
            KeypadButtonDef::new(Action::Digit(7), 1, 0),
            KeypadButtonDef::new(Action::Digit(8), 1, 1),
            KeypadButtonDef::new(Action::Digit(9), 1, 2),
            KeypadButtonDef::new(Action::Operation(Operator::Multiply), 1, 3),
            // Row 2: 4 5 6 −
            KeypadButtonDef::new(Action::Digit(4), 2, 0),
            KeypadButtonDef::new(Action::Digit(5), 2, 1),
            KeypadButtonDef::new(Action::Digit(6), 2, 2),
            KeypadButtonDef::new(Action::Operation(Operator::Subtract), 2, 3),
            // Row 3: 1 2 3 +
            KeypadButtonDef::new(Action::Digit(1), 3, 0),
            KeypadButtonDef::new(Action::Digit(2), 3, 1),
            KeypadButtonDef::new(Action::Digit(3), 3, 2),
            KeypadButtonDef::new(Action::Operation(Operator::Add), 3, 3),
            // Row 4: 0 (wide) . =
            KeypadButtonDef::new(Action::Digit(0), 4, 0).spanning(2),
            KeypadButtonDef::new(Action::Decimal, 4, 2),
            KeypadButtonDef::new(Action::Equals, 4, 3),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets the button covering grid cell (`row`, `col`)
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        if row < self.rows && col < self.cols {
            self.buttons.iter().find(|b| b.covers(row, col))
        } else {
            None
        }
    }

    /// Finds a button by element id
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button that dispatches `action`
    #[must_use]
    pub fn find_button_by_action(&self, action: &Action) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| &b.action == action)
    }

    /// Processes a button click and returns its action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<Action> {
        self.find_button_by_id(element_id).map(|btn| btn.action.clone())
    }
}
