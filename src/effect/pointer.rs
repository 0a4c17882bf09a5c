//! Pointer-only effects: a press at a position, or a bare cursor move.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::MouseButton;
use crate::point::Point;
use crate::result::ApplicationResult;
use crate::state::{PendingActionState, PendingClick};

use super::ApplyEffect;

/// Press a pointer button at a position.
///
/// The press slot is first-claim-wins: once claimed, only an identical
/// request is accepted (as a duplicate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressEffect {
    /// Where to press.
    pub position: Point,
    /// Which button to press.
    #[serde(default)]
    pub button: MouseButton,
}

impl PressEffect {
    /// Creates a press effect.
    #[must_use]
    pub const fn new(position: Point, button: MouseButton) -> Self {
        Self { position, button }
    }

    /// Creates a left-button press at integer coordinates.
    #[must_use]
    pub fn at(x: i32, y: i32) -> Self {
        Self::new(Point::from_ints(x, y), MouseButton::Left)
    }

    /// Sets the button.
    #[must_use]
    pub const fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

impl ApplyEffect for PressEffect {
    fn apply(&self, state: &mut PendingActionState) -> ApplicationResult {
        if !state.can_press() {
            return ApplicationResult::UnableToApply;
        }

        if let Some(pending) = state.pending_press {
            if pending.position == self.position && pending.button == self.button {
                return ApplicationResult::AppliedDuplicate;
            }
            return ApplicationResult::UnableToApply;
        }

        state.pending_press = Some(PendingClick::new(self.position, self.button));
        ApplicationResult::AppliedUnique
    }
}

impl fmt::Display for PressEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Click {} mouse button at {}", self.button, self.position)
    }
}

/// Move the pointer to a position.
///
/// The move slot has no conflict policy: a differing target replaces the
/// pending one, so the last applied move wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveEffect {
    /// Pointer destination.
    pub position: Point,
}

impl MoveEffect {
    /// Creates a move effect.
    #[must_use]
    pub const fn new(position: Point) -> Self {
        Self { position }
    }

    /// Creates a move effect at integer coordinates.
    #[must_use]
    pub fn at(x: i32, y: i32) -> Self {
        Self::new(Point::from_ints(x, y))
    }
}

impl ApplyEffect for MoveEffect {
    fn apply(&self, state: &mut PendingActionState) -> ApplicationResult {
        if state.move_target == Some(self.position) {
            return ApplicationResult::AppliedDuplicate;
        }

        state.move_target = Some(self.position);
        ApplicationResult::AppliedUnique
    }
}

impl fmt::Display for MoveEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move mouse to {}", self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_claims_empty_slot() {
        let mut state = PendingActionState::new(true);
        let effect = PressEffect::at(1, 1);
        assert_eq!(effect.apply(&mut state), ApplicationResult::AppliedUnique);
        assert_eq!(
            state.pending_press,
            Some(PendingClick::new(Point::from_ints(1, 1), MouseButton::Left))
        );
        assert!(state.move_target.is_none());
    }

    #[test]
    fn test_press_blocked_by_guard() {
        let mut state = PendingActionState::new(false);
        let before = state.clone();
        assert_eq!(PressEffect::at(1, 1).apply(&mut state), ApplicationResult::UnableToApply);
        assert_eq!(state, before);
    }

    #[test]
    fn test_press_same_request_is_duplicate() {
        let mut state = PendingActionState::new(true);
        let effect = PressEffect::at(1, 1).with_button(MouseButton::Right);
        effect.apply(&mut state);
        let after_first = state.clone();
        assert_eq!(effect.apply(&mut state), ApplicationResult::AppliedDuplicate);
        assert_eq!(state, after_first);
    }

    #[test]
    fn test_press_different_button_conflicts() {
        let mut state = PendingActionState::new(true);
        assert_eq!(PressEffect::at(1, 1).apply(&mut state), ApplicationResult::AppliedUnique);
        let right = PressEffect::at(1, 1).with_button(MouseButton::Right);
        assert_eq!(right.apply(&mut state), ApplicationResult::UnableToApply);
        assert_eq!(state.pending_press.unwrap().button, MouseButton::Left);
    }

    #[test]
    fn test_press_different_position_conflicts() {
        let mut state = PendingActionState::new(true);
        PressEffect::at(1, 1).apply(&mut state);
        assert_eq!(PressEffect::at(2, 2).apply(&mut state), ApplicationResult::UnableToApply);
        assert_eq!(state.pending_press.unwrap().position, Point::from_ints(1, 1));
    }

    #[test]
    fn test_press_ignores_key_slot() {
        let mut state = PendingActionState::new(true);
        state.pending_key = Some(crate::input::Hotkey::key("Q").unwrap());
        assert_eq!(PressEffect::at(1, 1).apply(&mut state), ApplicationResult::AppliedUnique);
        assert!(state.pending_key.is_some());
    }

    #[test]
    fn test_move_twice_is_duplicate() {
        let mut state = PendingActionState::new(true);
        let effect = MoveEffect::at(5, 5);
        assert_eq!(effect.apply(&mut state), ApplicationResult::AppliedUnique);
        let after_first = state.clone();
        assert_eq!(effect.apply(&mut state), ApplicationResult::AppliedDuplicate);
        assert_eq!(state, after_first);
    }

    #[test]
    fn test_move_last_writer_wins() {
        let mut state = PendingActionState::new(true);
        assert_eq!(MoveEffect::at(1, 1).apply(&mut state), ApplicationResult::AppliedUnique);
        assert_eq!(MoveEffect::at(2, 2).apply(&mut state), ApplicationResult::AppliedUnique);
        assert_eq!(state.move_target, Some(Point::from_ints(2, 2)));
    }

    #[test]
    fn test_move_ignores_guard() {
        let mut state = PendingActionState::new(false);
        assert_eq!(MoveEffect::at(3, 3).apply(&mut state), ApplicationResult::AppliedUnique);
        assert_eq!(state.move_target, Some(Point::from_ints(3, 3)));
    }

    #[test]
    fn test_display() {
        assert_eq!(PressEffect::at(1, 2).to_string(), "Click Left mouse button at (1, 2)");
        assert_eq!(MoveEffect::at(7, 8).to_string(), "Move mouse to (7, 8)");
    }
}
