//! Property-based tests for the keypad and keyboard front ends

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use glass_calculator::core::{Action, Operator};
use glass_calculator::feedback::SoundKind;
use glass_calculator::input::{button_id, KeyboardMapper, Keypad};
use glass_calculator::widget::CalculatorWidget;
use proptest::prelude::*;

// ===== Strategy definitions =====

/// Generate valid grid positions
fn grid_position_strategy() -> impl Strategy<Value = (usize, usize)> {
    (0usize..5usize, 0usize..4usize)
}

/// Generate positions outside the grid
fn out_of_grid_strategy() -> impl Strategy<Value = (usize, usize)> {
    prop_oneof![(5usize..50, 0usize..50), (0usize..50, 4usize..50)]
}

/// Every key name the mapper understands
fn mapped_key_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", ",", "+", "-", "*", "x", "X",
        "/", "=", "Enter", "Escape", "c", "C", "Backspace", "%",
    ])
}

// ===== Keypad layout =====

proptest! {
    /// Every cell of the 5×4 grid is covered by exactly one button
    #[test]
    fn prop_grid_fully_covered((row, col) in grid_position_strategy()) {
        let keypad = Keypad::new();
        let covering = keypad.buttons().iter().filter(|b| b.covers(row, col)).count();
        prop_assert_eq!(covering, 1);
        prop_assert!(keypad.get_button_at(row, col).is_some());
    }

    /// Nothing exists outside the grid
    #[test]
    fn prop_outside_grid_is_empty((row, col) in out_of_grid_strategy()) {
        prop_assert!(Keypad::new().get_button_at(row, col).is_none());
    }

    /// Clicking a button dispatches the action it was defined with
    #[test]
    fn prop_click_matches_definition((row, col) in grid_position_strategy()) {
        let keypad = Keypad::new();
        let button = keypad.get_button_at(row, col).unwrap();
        prop_assert_eq!(keypad.handle_click(&button.id), Some(button.action.clone()));
        prop_assert_eq!(button_id(&button.action), Some(button.id.as_str()));
    }

    /// Ids that are not on the keypad do nothing
    #[test]
    fn prop_unknown_ids_ignored(id in "[a-z-]{0,12}") {
        let keypad = Keypad::new();
        let known: HashSet<&str> = keypad.buttons().iter().map(|b| b.id.as_str()).collect();
        prop_assume!(!known.contains(id.as_str()));
        prop_assert_eq!(keypad.handle_click(&id), None);
    }
}

// ===== Keyboard =====

proptest! {
    /// Every mapped key except backspace mirrors a keypad button
    #[test]
    fn prop_mapped_keys_mirror_buttons(key in mapped_key_strategy()) {
        let mapper = KeyboardMapper::new();
        let keypad = Keypad::new();
        let action = mapper.map_key(key).unwrap();
        match mapper.button_for_key(key) {
            Some(id) => prop_assert_eq!(keypad.handle_click(id), Some(action)),
            None => prop_assert_eq!(action, Action::Backspace),
        }
    }

    /// Keys longer than one character are ignored unless named
    #[test]
    fn prop_unnamed_words_ignored(word in "[a-z]{2,10}") {
        prop_assert_eq!(KeyboardMapper::new().map_key(&word), None);
    }

    /// Every key press plays a click matching its action
    #[test]
    fn prop_key_sound_matches_action(key in mapped_key_strategy()) {
        let mut widget = CalculatorWidget::default();
        prop_assert!(widget.press_key(key, 0));
        let action = KeyboardMapper::new().map_key(key).unwrap();
        prop_assert_eq!(widget.last_sound(), SoundKind::for_action(&action));
    }

    /// Operator keys highlight their button until an operand is typed
    #[test]
    fn prop_operator_key_highlights(
        key in prop::sample::select(vec!["+", "-", "*", "x", "X", "/"]),
        digit in 0u8..=9,
    ) {
        let mut widget = CalculatorWidget::default();
        widget.press_key("7", 0);
        widget.press_key(key, 1_000);

        let view = widget.view(1_000);
        let op = match key {
            "+" => Operator::Add,
            "-" => Operator::Subtract,
            "/" => Operator::Divide,
            _ => Operator::Multiply,
        };
        let expected = button_id(&Action::Operation(op));
        prop_assert_eq!(view.active_operator.as_deref(), expected);
        prop_assert_eq!(view.pressed_button.as_deref(), expected);

        widget.press_key(&digit.to_string(), 2_000);
        prop_assert_eq!(widget.view(2_000).active_operator, None);
    }
}
