//! Combined effects that move the cursor and then act: a mouse press or a
//! key press, with an optional delay in between.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::{Hotkey, MouseButton};
use crate::point::Point;
use crate::result::ApplicationResult;
use crate::state::{PendingActionState, PendingClick};

use super::ApplyEffect;

fn write_delay_suffix(f: &mut fmt::Formatter<'_>, delay_ms: u32) -> fmt::Result {
    if delay_ms > 0 {
        write!(f, " after {delay_ms}ms")?;
    }
    Ok(())
}

/// Move the pointer, wait `delay_ms`, then press a button there.
///
/// Unlike [`PressEffect`](super::PressEffect), this does not check whether
/// the press slot is already claimed. Past the guard it always overwrites
/// the move target, the press slot and the action delay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveAndPressEffect {
    /// Pointer destination and press position.
    pub position: Point,
    /// Which button to press.
    #[serde(default)]
    pub button: MouseButton,
    /// Delay before the press, in milliseconds.
    #[serde(default)]
    pub delay_ms: u32,
}

impl MoveAndPressEffect {
    /// Creates a combined move-and-press effect.
    #[must_use]
    pub const fn new(position: Point, button: MouseButton, delay_ms: u32) -> Self {
        Self {
            position,
            button,
            delay_ms,
        }
    }

    /// Creates a left-button move-and-press at integer coordinates, no delay.
    #[must_use]
    pub fn at(x: i32, y: i32) -> Self {
        Self::new(Point::from_ints(x, y), MouseButton::Left, 0)
    }

    /// Sets the button.
    #[must_use]
    pub const fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// Sets the delay.
    #[must_use]
    pub const fn with_delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl ApplyEffect for MoveAndPressEffect {
    fn apply(&self, state: &mut PendingActionState) -> ApplicationResult {
        if !state.can_press() {
            return ApplicationResult::UnableToApply;
        }

        let click = PendingClick::new(self.position, self.button);
        if state.move_target == Some(self.position) && state.pending_press == Some(click) {
            return ApplicationResult::AppliedDuplicate;
        }

        state.move_target = Some(self.position);
        state.pending_press = Some(click);
        state.action_delay_ms = self.delay_ms;
        ApplicationResult::AppliedUnique
    }
}

impl fmt::Display for MoveAndPressEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move to {} and click {}", self.position, self.button)?;
        write_delay_suffix(f, self.delay_ms)
    }
}

/// Move the pointer, wait `delay_ms`, then press a key.
///
/// The key slot is first-claim-wins: a differing pending key rejects this
/// effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveAndKeyEffect {
    /// Pointer destination.
    pub position: Point,
    /// Key to press.
    pub key: Hotkey,
    /// Delay before the key press, in milliseconds.
    #[serde(default)]
    pub delay_ms: u32,
}

impl MoveAndKeyEffect {
    /// Creates a combined move-and-key effect.
    #[must_use]
    pub const fn new(position: Point, key: Hotkey, delay_ms: u32) -> Self {
        Self {
            position,
            key,
            delay_ms,
        }
    }

    /// Creates a move-and-key effect at integer coordinates, no delay.
    #[must_use]
    pub fn at(x: i32, y: i32, key: Hotkey) -> Self {
        Self::new(Point::from_ints(x, y), key, 0)
    }

    /// Sets the delay.
    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl ApplyEffect for MoveAndKeyEffect {
    fn apply(&self, state: &mut PendingActionState) -> ApplicationResult {
        if !state.can_press() {
            return ApplicationResult::UnableToApply;
        }

        if state.move_target == Some(self.position) && state.pending_key.as_ref() == Some(&self.key) {
            return ApplicationResult::AppliedDuplicate;
        }

        if let Some(pending) = &state.pending_key {
            if *pending != self.key {
                return ApplicationResult::UnableToApply;
            }
        }

        state.move_target = Some(self.position);
        state.pending_key = Some(self.key.clone());
        state.action_delay_ms = self.delay_ms;
        ApplicationResult::AppliedUnique
    }
}

impl fmt::Display for MoveAndKeyEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move to {} and press key {}", self.position, self.key)?;
        write_delay_suffix(f, self.delay_ms)
    }
}
