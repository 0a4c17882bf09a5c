//! Effects: immutable requests to claim pending input slots.
//!
//! Every variant implements [`ApplyEffect`]. Slot policies differ per
//! variant and are encoded in each `apply` separately:
//!
//! | Effect | Guarded by `can_press` | Slot policy |
//! |---|---|---|
//! | [`PressEffect`] | yes | press slot: first claim wins |
//! | [`MoveEffect`] | no | move slot: last claim wins |
//! | [`MoveAndPressEffect`] | yes | overwrites move, press and delay |
//! | [`MoveAndKeyEffect`] | yes | key slot: first claim wins |

mod combined;
mod pointer;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::result::ApplicationResult;
use crate::state::PendingActionState;

pub use combined::{MoveAndKeyEffect, MoveAndPressEffect};
pub use pointer::{MoveEffect, PressEffect};

/// The single capability shared by every effect.
pub trait ApplyEffect {
    /// Inspects `state`, possibly claims slots, and reports the outcome.
    fn apply(&self, state: &mut PendingActionState) -> ApplicationResult;
}

/// Closed set of effect variants.
///
/// Serialized as an internally tagged object so rule descriptors can be
/// written as JSON:
///
/// ```
/// use slotwise::{MouseButton, Point, SideEffect};
///
/// let effect: SideEffect = serde_json::from_str(
///     r#"{"type":"move_and_press","position":{"x":4,"y":2},"delay_ms":25}"#,
/// ).unwrap();
/// let SideEffect::MoveAndPress(inner) = &effect else { panic!() };
/// assert_eq!(inner.position, Point::from_ints(4, 2));
/// assert_eq!(inner.button, MouseButton::Left);
/// assert_eq!(inner.delay_ms, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SideEffect {
    /// Press a pointer button at a position.
    Press(PressEffect),
    /// Move the pointer.
    Move(MoveEffect),
    /// Move the pointer, then press a button there.
    MoveAndPress(MoveAndPressEffect),
    /// Move the pointer, then press a key.
    MoveAndKey(MoveAndKeyEffect),
}

impl SideEffect {
    /// Returns true if the effect is gated by the press guard.
    #[must_use]
    pub const fn requires_press(&self) -> bool {
        match self {
            Self::Press(_) | Self::MoveAndPress(_) | Self::MoveAndKey(_) => true,
            Self::Move(_) => false,
        }
    }

    /// Returns true for effects that write the action delay.
    #[must_use]
    pub const fn sets_delay(&self) -> bool {
        matches!(self, Self::MoveAndPress(_) | Self::MoveAndKey(_))
    }

    /// Returns a short stable identifier suitable for logging/debugging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Press(_) => "press",
            Self::Move(_) => "move",
            Self::MoveAndPress(_) => "move_and_press",
            Self::MoveAndKey(_) => "move_and_key",
        }
    }
}

impl ApplyEffect for SideEffect {
    fn apply(&self, state: &mut PendingActionState) -> ApplicationResult {
        match self {
            Self::Press(effect) => effect.apply(state),
            Self::Move(effect) => effect.apply(state),
            Self::MoveAndPress(effect) => effect.apply(state),
            Self::MoveAndKey(effect) => effect.apply(state),
        }
    }
}

impl fmt::Display for SideEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Press(effect) => fmt::Display::fmt(effect, f),
            Self::Move(effect) => fmt::Display::fmt(effect, f),
            Self::MoveAndPress(effect) => fmt::Display::fmt(effect, f),
            Self::MoveAndKey(effect) => fmt::Display::fmt(effect, f),
        }
    }
}

impl From<PressEffect> for SideEffect {
    fn from(effect: PressEffect) -> Self {
        Self::Press(effect)
    }
}

impl From<MoveEffect> for SideEffect {
    fn from(effect: MoveEffect) -> Self {
        Self::Move(effect)
    }
}

impl From<MoveAndPressEffect> for SideEffect {
    fn from(effect: MoveAndPressEffect) -> Self {
        Self::MoveAndPress(effect)
    }
}

impl From<MoveAndKeyEffect> for SideEffect {
    fn from(effect: MoveAndKeyEffect) -> Self {
        Self::MoveAndKey(effect)
    }
}
