//! Input front ends: keyboard mapping and the on-screen keypad
//!
//! Both translate raw input into the same [`crate::core::Action`] set.

mod keyboard;
mod keypad;

pub use keyboard::KeyboardMapper;
pub use keypad::{button_id, button_variant, ButtonVariant, Keypad, KeypadButtonDef};
