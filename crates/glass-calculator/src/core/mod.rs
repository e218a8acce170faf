//! Calculator core: state machine, operators, formatting and history
//!
//! Nothing in here touches rendering, audio or storage. The presentation
//! layer reads the state and feeds actions back in.

mod calculator;
pub mod format;
pub mod history;
mod operations;

pub use calculator::{Action, Calculator, CalculatorState, PendingOperation, Phase};
pub use format::{format_display, format_number, parse_number, NumberFormat};
pub use history::{History, HistoryEntry};
pub use operations::Operator;
