//! Glass Calculator - arithmetic widget backend
//!
//! A four-function calculator with the behavior of a pocket device: digits
//! are typed into a display, operators chain strictly left to right, and
//! every completed calculation lands in a bounded history.
//!
//! # Layers
//!
//! - [`core`]: the input state machine, number formatting and history.
//!   Pure and infallible.
//! - [`input`]: keyboard mapping and the on-screen keypad, both producing
//!   the same [`core::Action`]s.
//! - [`feedback`]: click sounds and the persisted light/dark theme.
//! - [`widget`]: the presentation model tying it together, with the
//!   pressed-key and display-pop timers.
//!
//! # Example
//!
//! ```rust
//! use glass_calculator::prelude::*;
//!
//! let mut calc = Calculator::new();
//! for action in [
//!     Action::Digit(2),
//!     Action::Operation(Operator::Add),
//!     Action::Digit(3),
//!     Action::Operation(Operator::Multiply),
//!     Action::Digit(4),
//!     Action::Equals,
//! ] {
//!     calc.dispatch(&action);
//! }
//!
//! // No precedence: (2 + 3) × 4
//! assert_eq!(calc.display(), "20");
//! assert_eq!(calc.history().latest().unwrap().expression, "5 × 4");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod feedback;
pub mod input;
pub mod widget;

#[cfg(feature = "wasm")]
pub mod browser;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::CalculatorConfig;
    pub use crate::core::{
        format_display, format_number, parse_number, Action, Calculator, CalculatorState, History,
        HistoryEntry, NumberFormat, Operator, PendingOperation, Phase,
    };
    pub use crate::driver::{CalculatorDriver, HistoryItem, KeyboardDriver, KeypadDriver};
    pub use crate::error::{WidgetError, WidgetResult};
    pub use crate::feedback::{
        ClickTone, FileThemeStore, MemoryThemeStore, SoundKind, SoundPlayer, Theme, ThemeStore,
    };
    pub use crate::input::{ButtonVariant, KeyboardMapper, Keypad};
    pub use crate::widget::{CalculatorWidget, DisplaySize, WidgetView};

    #[cfg(feature = "wasm")]
    pub use crate::browser::BrowserCalculator;
}
