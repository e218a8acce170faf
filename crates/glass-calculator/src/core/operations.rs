//! Binary operators and their arithmetic
//!
//! Error prevention: the operator set is a closed enum, so every pending
//! operation is one of the four keypad operators.

use serde::{Deserialize, Serialize};

/// Type-safe operator enum - one variant per keypad operator button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operator {
    /// All operators in keypad order (top to bottom)
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the operator symbol used in expressions and history
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Returns the label printed on the keypad button
    ///
    /// Subtraction uses the typographic minus sign on the button while the
    /// expression trace keeps the ASCII hyphen.
    #[must_use]
    pub const fn button_label(&self) -> &'static str {
        match self {
            Self::Subtract => "−",
            other => other.symbol(),
        }
    }

    /// Applies the operator to two operands
    ///
    /// Division by zero yields `0`. Any other non-finite result (overflow)
    /// is also collapsed to `0` so the display always holds a finite number.
    #[must_use]
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        let result = match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => {
                if right == 0.0 {
                    return 0.0;
                }
                left / right
            }
        };

        if result.is_finite() {
            result
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
