//! Keyboard input mapping
//!
//! Error prevention: keys are mapped to a closed set of [`Action`]s, and
//! anything unmapped is ignored rather than inserted.
//!
//! Key names follow the browser `KeyboardEvent.key` convention (`"Enter"`,
//! `"Escape"`, `"Backspace"`, or the typed character).

use crate::core::{Action, Operator};
use crate::input::keypad::button_id;

/// Maps key names to calculator actions
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyboardMapper;

impl KeyboardMapper {
    /// Creates a new keyboard mapper
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key name to an action, `None` for unmapped keys
    #[must_use]
    pub fn map_key(&self, key: &str) -> Option<Action> {
        let action = match key {
            "." | "," => Action::Decimal,
            "+" => Action::Operation(Operator::Add),
            "-" => Action::Operation(Operator::Subtract),
            "*" | "x" | "X" => Action::Operation(Operator::Multiply),
            "/" => Action::Operation(Operator::Divide),
            "=" | "Enter" => Action::Equals,
            "Escape" | "c" | "C" => Action::Clear,
            "Backspace" => Action::Backspace,
            "%" => Action::Percent,
            _ => {
                let mut chars = key.chars();
                let digit = match (chars.next(), chars.next()) {
                    (Some(ch), None) => ch.to_digit(10)?,
                    _ => return None,
                };
                Action::Digit(digit as u8)
            }
        };
        Some(action)
    }

    /// True if the key drives the calculator; its default browser
    /// behavior should then be suppressed
    #[must_use]
    pub fn handles(&self, key: &str) -> bool {
        self.map_key(key).is_some()
    }

    /// Element id of the keypad button mirrored by `key`
    ///
    /// Used for the transient pressed highlight. `Backspace` has no button.
    #[must_use]
    pub fn button_for_key(&self, key: &str) -> Option<&'static str> {
        self.map_key(key).as_ref().and_then(button_id)
    }

    /// The full key table as `(keys, description)` rows
    #[must_use]
    pub fn key_table() -> &'static [(&'static str, &'static str)] {
        &[
            ("0-9", "digit"),
            (". ,", "decimal point"),
            ("+", "add"),
            ("-", "subtract"),
            ("* x X", "multiply"),
            ("/", "divide"),
            ("= Enter", "equals"),
            ("Escape c C", "clear"),
            ("Backspace", "delete last character"),
            ("%", "percent"),
        ]
    }
}
