//! Click sound feedback
//!
//! The widget never synthesizes audio itself. It decides *which* click to
//! play and hands a [`ClickTone`] to an injected [`SoundPlayer`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::Action;
use crate::input::ButtonVariant;

/// Family of click sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundKind {
    /// Soft click for digits, decimal point and backspace
    Number,
    /// Mid-pitch click for clear, sign, percent and the theme toggle
    Function,
    /// Higher, longer click for operators and equals
    Operator,
}

impl SoundKind {
    /// Sound played for an action; history recall is silent
    #[must_use]
    pub fn for_action(action: &Action) -> Option<Self> {
        match action {
            Action::Digit(_) | Action::Decimal | Action::Backspace => Some(Self::Number),
            Action::ToggleSign | Action::Percent | Action::Clear => Some(Self::Function),
            Action::Operation(_) | Action::Equals => Some(Self::Operator),
            Action::SelectHistory(_) => None,
        }
    }

    /// Sound of a keypad button, chosen by its look
    #[must_use]
    pub const fn for_variant(variant: ButtonVariant) -> Self {
        match variant {
            ButtonVariant::Number => Self::Number,
            ButtonVariant::Function => Self::Function,
            ButtonVariant::Operator => Self::Operator,
        }
    }

    /// Tone profile of this click
    #[must_use]
    pub fn tone(self) -> ClickTone {
        match self {
            Self::Operator => ClickTone {
                start_hz: 1200.0,
                end_hz: 800.0,
                ramp: Duration::from_millis(50),
                gain: 0.15,
                duration: Duration::from_millis(80),
            },
            Self::Function => ClickTone {
                start_hz: 900.0,
                end_hz: 600.0,
                ramp: Duration::from_millis(40),
                gain: 0.12,
                duration: Duration::from_millis(60),
            },
            Self::Number => ClickTone {
                start_hz: 600.0,
                end_hz: 400.0,
                ramp: Duration::from_millis(30),
                gain: 0.08,
                duration: Duration::from_millis(40),
            },
        }
    }
}

/// A sine click with an exponential pitch and gain decay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickTone {
    /// Starting frequency
    pub start_hz: f32,
    /// Frequency reached after `ramp`
    pub end_hz: f32,
    /// Length of the pitch ramp
    pub ramp: Duration,
    /// Starting gain, decaying to near silence over `duration`
    pub gain: f32,
    /// Total length of the click
    pub duration: Duration,
}

/// Capability that plays click sounds
pub trait SoundPlayer: std::fmt::Debug {
    /// Plays one click
    fn play(&mut self, kind: SoundKind);
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Box<T> {
    fn play(&mut self, kind: SoundKind) {
        (**self).play(kind);
    }
}

/// Player that discards every click
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&mut self, _kind: SoundKind) {}
}

/// Player that remembers what it was asked to play
#[derive(Debug, Default, Clone)]
pub struct RecordingPlayer {
    played: Vec<SoundKind>,
}

impl RecordingPlayer {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clicks played so far, oldest first
    #[must_use]
    pub fn played(&self) -> &[SoundKind] {
        &self.played
    }

    /// The most recent click
    #[must_use]
    pub fn last(&self) -> Option<SoundKind> {
        self.played.last().copied()
    }
}

impl SoundPlayer for RecordingPlayer {
    fn play(&mut self, kind: SoundKind) {
        self.played.push(kind);
    }
}
