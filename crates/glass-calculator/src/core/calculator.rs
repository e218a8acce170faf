//! Arithmetic input state machine
//!
//! Every handler is total: any action is valid in any state, runs to
//! completion synchronously and never reports an error. Invalid input is
//! normalized (division by zero gives `0`, equals without a pending
//! operation does nothing).

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::format::{parse_number, NumberFormat};
use super::history::History;
use super::operations::Operator;

/// Logical user actions accepted by the calculator
///
/// Both front ends (keypad clicks and keyboard keys) translate raw input
/// into exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Digit key `0`..=`9`
    Digit(u8),
    /// Decimal point
    Decimal,
    /// Sign toggle (±)
    ToggleSign,
    /// Percent (%)
    Percent,
    /// Remove the last typed character
    Backspace,
    /// Reset to the initial state (AC / C)
    Clear,
    /// Binary operator
    Operation(Operator),
    /// Evaluate the pending operation
    Equals,
    /// Recall a history result into the display
    SelectHistory(String),
}

/// A left operand waiting for its right operand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    /// Left operand
    pub left: f64,
    /// Operator to apply once the right operand is known
    pub op: Operator,
}

/// Named view of the machine's implicit states
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Initial state: display `"0"`, nothing pending
    Idle,
    /// Typing an operand with nothing pending
    Entering,
    /// An operation is pending
    OperatorPending {
        /// Pending left operand
        left: f64,
        /// Pending operator
        op: Operator,
        /// True until the first digit of the right operand is typed
        awaiting_operand: bool,
    },
    /// Showing a result after equals
    ShowingResult,
}

/// Flat snapshot of the calculator state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Current operand text
    pub display: String,
    /// Left operand of the pending operation
    pub previous_value: Option<f64>,
    /// Operator of the pending operation
    pub operator: Option<Operator>,
    /// Next digit replaces the display instead of appending
    pub waiting_for_operand: bool,
    /// Trace of the pending computation, e.g. `"5 ×"`
    pub current_expression: String,
}

impl CalculatorState {
    /// The state of a fresh or cleared calculator
    #[must_use]
    pub fn initial() -> Self {
        Self {
            display: "0".to_string(),
            previous_value: None,
            operator: None,
            waiting_for_operand: false,
            current_expression: String::new(),
        }
    }
}

/// The calculator state machine
///
/// Owns the display, the pending operation and the history log.
#[derive(Debug, Clone)]
pub struct Calculator {
    display: String,
    pending: Option<PendingOperation>,
    waiting_for_operand: bool,
    history: History,
    format: NumberFormat,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a calculator in the initial state
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(History::new(), NumberFormat::default())
    }

    /// Creates a calculator with a custom history log and number format
    #[must_use]
    pub fn with_parts(history: History, format: NumberFormat) -> Self {
        Self {
            display: "0".to_string(),
            pending: None,
            waiting_for_operand: false,
            history,
            format,
        }
    }

    // ===== Accessors =====

    /// Raw display text, exactly as typed or computed
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Display text formatted for rendering
    #[must_use]
    pub fn formatted_display(&self) -> String {
        self.format.format_display(&self.display)
    }

    /// The pending operation, if any
    #[must_use]
    pub fn pending(&self) -> Option<PendingOperation> {
        self.pending
    }

    /// True when the next digit replaces the display
    #[must_use]
    pub fn is_waiting_for_operand(&self) -> bool {
        self.waiting_for_operand
    }

    /// Trace of the pending computation (`"5 ×"`), empty when none
    #[must_use]
    pub fn current_expression(&self) -> String {
        match self.pending {
            Some(PendingOperation { left, op }) => format!("{} {}", self.format.format(left), op),
            None => String::new(),
        }
    }

    /// Completed calculations, newest first
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number format used for computed values
    #[must_use]
    pub fn number_format(&self) -> &NumberFormat {
        &self.format
    }

    /// Label of the clear button: `"AC"` in the initial display, else `"C"`
    #[must_use]
    pub fn clear_label(&self) -> &'static str {
        if self.display == "0" && self.pending.is_none() {
            "AC"
        } else {
            "C"
        }
    }

    /// Operator to highlight: the pending one while awaiting its operand
    #[must_use]
    pub fn active_operator(&self) -> Option<Operator> {
        self.pending
            .filter(|_| self.waiting_for_operand)
            .map(|pending| pending.op)
    }

    /// Names the current implicit state
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.pending {
            Some(PendingOperation { left, op }) => Phase::OperatorPending {
                left,
                op,
                awaiting_operand: self.waiting_for_operand,
            },
            None if self.waiting_for_operand => Phase::ShowingResult,
            None if self.display == "0" => Phase::Idle,
            None => Phase::Entering,
        }
    }

    /// Flat snapshot of the state
    #[must_use]
    pub fn state(&self) -> CalculatorState {
        CalculatorState {
            display: self.display.clone(),
            previous_value: self.pending.map(|p| p.left),
            operator: self.pending.map(|p| p.op),
            waiting_for_operand: self.waiting_for_operand,
            current_expression: self.current_expression(),
        }
    }

    /// Numeric value of the display; unparseable text counts as `0`
    #[must_use]
    pub fn value(&self) -> f64 {
        parse_number(&self.display).unwrap_or(0.0)
    }

    // ===== Dispatch =====

    /// Applies one logical action
    pub fn dispatch(&mut self, action: &Action) {
        debug!(?action, "dispatch");
        match action {
            Action::Digit(d) => self.input_digit(*d),
            Action::Decimal => self.input_decimal(),
            Action::ToggleSign => self.toggle_sign(),
            Action::Percent => self.input_percent(),
            Action::Backspace => self.backspace(),
            Action::Clear => self.clear(),
            Action::Operation(op) => self.perform_operation(*op),
            Action::Equals => self.equals(),
            Action::SelectHistory(result) => self.select_history(result),
        }
        trace!(
            display = %self.display,
            pending = ?self.pending,
            waiting = self.waiting_for_operand,
            "state after dispatch"
        );
    }

    // ===== Handlers =====

    /// Types a digit; values above 9 are ignored
    pub fn input_digit(&mut self, digit: u8) {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            return;
        };

        if self.waiting_for_operand {
            self.display = ch.to_string();
            self.waiting_for_operand = false;
        } else if self.display == "0" {
            self.display = ch.to_string();
        } else {
            self.display.push(ch);
        }
    }

    /// Types the decimal point, at most once per operand
    pub fn input_decimal(&mut self) {
        if self.waiting_for_operand {
            self.display = "0.".to_string();
            self.waiting_for_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// Negates the displayed value
    pub fn toggle_sign(&mut self) {
        self.display = self.format.format(-self.value());
    }

    /// Divides the displayed value by 100
    pub fn input_percent(&mut self) {
        self.display = self.format.format(self.value() / 100.0);
    }

    /// Removes the last character; an empty or lone `"-"` display becomes `"0"`
    pub fn backspace(&mut self) {
        self.display.pop();
        if self.display.is_empty() || self.display == "-" {
            self.display = "0".to_string();
        }
    }

    /// Returns to the initial state; history is kept
    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.pending = None;
        self.waiting_for_operand = false;
    }

    /// Starts or chains a binary operation
    ///
    /// With an operation already pending, it is evaluated first and its
    /// result becomes the new left operand (left-to-right, no precedence).
    pub fn perform_operation(&mut self, op: Operator) {
        let value = self.value();

        let left = match self.pending {
            None => value,
            Some(pending) => {
                let result = pending.op.apply(pending.left, value);
                self.display = self.format.format(result);
                result
            }
        };

        self.pending = Some(PendingOperation { left, op });
        self.waiting_for_operand = true;
    }

    /// Evaluates the pending operation and records it in history
    pub fn equals(&mut self) {
        let Some(PendingOperation { left, op }) = self.pending else {
            return;
        };

        let right = self.value();
        let result = self.format.format(op.apply(left, right));
        let expression = format!(
            "{} {} {}",
            self.format.format(left),
            op,
            self.format.format(right)
        );

        info!(%expression, %result, "calculation completed");
        self.history.record(expression, result.clone());

        self.display = result;
        self.pending = None;
        self.waiting_for_operand = true;
    }

    /// Puts a recalled history result into the display
    ///
    /// A pending operation is left untouched, so the recalled value becomes
    /// its right operand.
    pub fn select_history(&mut self, result: &str) {
        self.display = result.to_string();
        self.waiting_for_operand = false;
    }

    /// Drops all history entries
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(calc: &mut Calculator, actions: &[Action]) {
        for action in actions {
            calc.dispatch(action);
        }
    }

    fn digits(calc: &mut Calculator, text: &str) {
        for ch in text.chars() {
            match ch {
                '.' => calc.input_decimal(),
                d => calc.input_digit(d.to_digit(10).unwrap() as u8),
            }
        }
    }

    // ===== Digit entry =====

    #[test]
    fn test_initial_state() {
        let calc = Calculator::new();
        assert_eq!(calc.state(), CalculatorState::initial());
        assert_eq!(calc.phase(), Phase::Idle);
    }

    #[test]
    fn test_digits_concatenate() {
        let mut calc = Calculator::new();
        digits(&mut calc, "1203");
        assert_eq!(calc.display(), "1203");
        assert_eq!(calc.phase(), Phase::Entering);
    }

    #[test]
    fn test_leading_zero_suppressed() {
        let mut calc = Calculator::new();
        digits(&mut calc, "05");
        assert_eq!(calc.display(), "5");

        calc.clear();
        digits(&mut calc, "00");
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_invalid_digit_ignored() {
        let mut calc = Calculator::new();
        calc.input_digit(12);
        assert_eq!(calc.display(), "0");
    }

    // ===== Decimal =====

    #[test]
    fn test_decimal_is_idempotent() {
        let mut calc = Calculator::new();
        calc.input_decimal();
        calc.input_decimal();
        assert_eq!(calc.display(), "0.");
        digits(&mut calc, "5.");
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn test_decimal_after_operator_starts_fresh() {
        let mut calc = Calculator::new();
        digits(&mut calc, "3");
        calc.perform_operation(Operator::Add);
        calc.input_decimal();
        assert_eq!(calc.display(), "0.");
        assert!(!calc.is_waiting_for_operand());
    }

    // ===== Sign and percent =====

    #[test]
    fn test_toggle_sign() {
        let mut calc = Calculator::new();
        digits(&mut calc, "12.5");
        calc.toggle_sign();
        assert_eq!(calc.display(), "-12.5");
        calc.toggle_sign();
        assert_eq!(calc.display(), "12.5");
    }

    #[test]
    fn test_toggle_sign_of_zero_stays_zero() {
        let mut calc = Calculator::new();
        calc.toggle_sign();
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_percent() {
        let mut calc = Calculator::new();
        digits(&mut calc, "50");
        calc.input_percent();
        assert_eq!(calc.display(), "0.5");
    }

    #[test]
    fn test_percent_rounds_to_six_digits() {
        let mut calc = Calculator::new();
        digits(&mut calc, "0.0001234");
        calc.input_percent();
        assert_eq!(calc.display(), "0.000001");
    }

    // ===== Backspace =====

    #[test]
    fn test_backspace_removes_last_char() {
        let mut calc = Calculator::new();
        digits(&mut calc, "123");
        calc.backspace();
        assert_eq!(calc.display(), "12");
    }

    #[test]
    fn test_backspace_single_char_resets() {
        let mut calc = Calculator::new();
        digits(&mut calc, "7");
        calc.backspace();
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_backspace_negative_single_digit_resets() {
        let mut calc = Calculator::new();
        digits(&mut calc, "7");
        calc.toggle_sign();
        assert_eq!(calc.display(), "-7");
        calc.backspace();
        assert_eq!(calc.display(), "0");
    }

    // ===== Operations =====

    #[test]
    fn test_operation_sets_pending() {
        let mut calc = Calculator::new();
        digits(&mut calc, "5");
        calc.perform_operation(Operator::Multiply);
        assert_eq!(calc.current_expression(), "5 ×");
        assert_eq!(calc.active_operator(), Some(Operator::Multiply));
        assert_eq!(
            calc.phase(),
            Phase::OperatorPending {
                left: 5.0,
                op: Operator::Multiply,
                awaiting_operand: true
            }
        );
    }

    #[test]
    fn test_digit_after_operator_replaces_display() {
        let mut calc = Calculator::new();
        digits(&mut calc, "5");
        calc.perform_operation(Operator::Add);
        digits(&mut calc, "3");
        assert_eq!(calc.display(), "3");
        assert_eq!(calc.active_operator(), None);
    }

    #[test]
    fn test_chaining_has_no_precedence() {
        let mut calc = Calculator::new();
        press(
            &mut calc,
            &[
                Action::Digit(2),
                Action::Operation(Operator::Add),
                Action::Digit(3),
                Action::Operation(Operator::Multiply),
            ],
        );
        assert_eq!(calc.display(), "5");
        assert_eq!(calc.current_expression(), "5 ×");

        press(&mut calc, &[Action::Digit(4), Action::Equals]);
        assert_eq!(calc.display(), "20");

        let latest = calc.history().latest().unwrap();
        assert_eq!(latest.expression, "5 × 4");
        assert_eq!(latest.result, "20");
    }

    #[test]
    fn test_repeated_operator_applies_pending() {
        // Second operator press evaluates the pending operation with the
        // displayed value as right operand
        let mut calc = Calculator::new();
        digits(&mut calc, "5");
        calc.perform_operation(Operator::Add);
        calc.perform_operation(Operator::Multiply);
        assert_eq!(calc.display(), "10");
        assert_eq!(calc.current_expression(), "10 ×");
    }

    // ===== Equals =====

    #[test]
    fn test_equals_without_pending_is_noop() {
        let mut calc = Calculator::new();
        digits(&mut calc, "42");
        let before = calc.state();
        calc.equals();
        assert_eq!(calc.state(), before);
        assert!(calc.history().is_empty());
    }

    #[test]
    fn test_equals_records_and_resets() {
        let mut calc = Calculator::new();
        digits(&mut calc, "9");
        calc.perform_operation(Operator::Subtract);
        digits(&mut calc, "12");
        calc.equals();

        assert_eq!(calc.display(), "-3");
        assert_eq!(calc.pending(), None);
        assert!(calc.is_waiting_for_operand());
        assert_eq!(calc.current_expression(), "");
        assert_eq!(calc.phase(), Phase::ShowingResult);
        assert_eq!(calc.history().latest().unwrap().expression, "9 - 12");
    }

    #[test]
    fn test_division_by_zero_yields_zero() {
        let mut calc = Calculator::new();
        press(
            &mut calc,
            &[
                Action::Digit(5),
                Action::Operation(Operator::Divide),
                Action::Digit(0),
                Action::Equals,
            ],
        );
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.history().latest().unwrap().expression, "5 ÷ 0");
    }

    #[test]
    fn test_halfway_result_rounds_up() {
        let mut calc = Calculator::new();
        digits(&mut calc, "1");
        calc.perform_operation(Operator::Divide);
        digits(&mut calc, "128");
        calc.equals();
        assert_eq!(calc.display(), "0.007813");
        assert_eq!(calc.history().latest().unwrap().result, "0.007813");
    }

    #[test]
    fn test_equals_rounds_result() {
        let mut calc = Calculator::new();
        digits(&mut calc, "1");
        calc.perform_operation(Operator::Divide);
        digits(&mut calc, "3");
        calc.equals();
        assert_eq!(calc.display(), "0.333333");
    }

    #[test]
    fn test_large_result_is_exponential() {
        let mut calc = Calculator::new();
        digits(&mut calc, "100000");
        calc.perform_operation(Operator::Multiply);
        digits(&mut calc, "100000");
        calc.equals();
        assert_eq!(calc.display(), "1.0000e+10");
        assert_eq!(calc.value(), 1e10);
    }

    #[test]
    fn test_digits_after_exponent_can_overflow_to_zero() {
        let mut calc = Calculator::new();
        calc.select_history("1.0000e+10");
        digits(&mut calc, "5");
        assert_eq!(calc.value(), 1e105);

        digits(&mut calc, "55");
        assert_eq!(calc.display(), "1.0000e+10555");
        assert_eq!(calc.value(), 0.0);
        assert_eq!(calc.formatted_display(), "0");

        calc.perform_operation(Operator::Add);
        digits(&mut calc, "1");
        calc.equals();
        assert_eq!(calc.display(), "1");
    }

    #[test]
    fn test_digit_after_equals_starts_new_operand() {
        let mut calc = Calculator::new();
        digits(&mut calc, "2");
        calc.perform_operation(Operator::Add);
        digits(&mut calc, "2");
        calc.equals();
        digits(&mut calc, "7");
        assert_eq!(calc.display(), "7");
    }

    #[test]
    fn test_operator_after_equals_uses_result() {
        let mut calc = Calculator::new();
        digits(&mut calc, "2");
        calc.perform_operation(Operator::Add);
        digits(&mut calc, "2");
        calc.equals();
        calc.perform_operation(Operator::Multiply);
        digits(&mut calc, "3");
        calc.equals();
        assert_eq!(calc.display(), "12");
        assert_eq!(calc.history().len(), 2);
    }

    // ===== History selection =====

    #[test]
    fn test_select_history_keeps_pending() {
        let mut calc = Calculator::new();
        digits(&mut calc, "8");
        calc.perform_operation(Operator::Add);
        calc.select_history("12");

        assert_eq!(calc.display(), "12");
        assert!(!calc.is_waiting_for_operand());
        assert_eq!(
            calc.pending(),
            Some(PendingOperation {
                left: 8.0,
                op: Operator::Add
            })
        );

        calc.perform_operation(Operator::Subtract);
        assert_eq!(calc.display(), "20");
    }

    // ===== Clear =====

    #[test]
    fn test_clear_restores_initial_state() {
        let mut calc = Calculator::new();
        digits(&mut calc, "4.5");
        calc.perform_operation(Operator::Divide);
        digits(&mut calc, "9");
        calc.clear();
        assert_eq!(calc.state(), CalculatorState::initial());
    }

    #[test]
    fn test_clear_keeps_history() {
        let mut calc = Calculator::new();
        digits(&mut calc, "1");
        calc.perform_operation(Operator::Add);
        digits(&mut calc, "1");
        calc.equals();
        calc.clear();
        assert_eq!(calc.history().len(), 1);
    }

    #[test]
    fn test_clear_label() {
        let mut calc = Calculator::new();
        assert_eq!(calc.clear_label(), "AC");
        digits(&mut calc, "3");
        assert_eq!(calc.clear_label(), "C");
        calc.backspace();
        assert_eq!(calc.clear_label(), "AC");
        calc.perform_operation(Operator::Add);
        assert_eq!(calc.clear_label(), "C");
    }

    #[test]
    fn test_formatted_display_for_unparseable_text() {
        let mut calc = Calculator::new();
        calc.select_history("not a number");
        assert_eq!(calc.formatted_display(), "0");
        assert_eq!(calc.display(), "not a number");
        assert_eq!(calc.value(), 0.0);
    }

    #[test]
    fn test_state_snapshot() {
        let mut calc = Calculator::new();
        digits(&mut calc, "6");
        calc.perform_operation(Operator::Divide);
        let state = calc.state();
        assert_eq!(state.previous_value, Some(6.0));
        assert_eq!(state.operator, Some(Operator::Divide));
        assert!(state.waiting_for_operand);
        assert_eq!(state.current_expression, "6 ÷");
    }
}
