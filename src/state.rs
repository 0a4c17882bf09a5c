//! Per-cycle pending input state.
//!
//! A [`PendingActionState`] is the shared record that effects compete over
//! during one evaluation cycle. It is created empty at the start of the
//! cycle, mutated only by [`ApplyEffect::apply`](crate::ApplyEffect::apply),
//! read once by the dispatcher and then dropped.

use serde::{Deserialize, Serialize};

use crate::input::{Hotkey, MouseButton};
use crate::point::Point;

/// A pointer press bound to the position it should happen at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingClick {
    /// Where to press.
    pub position: Point,
    /// Which button to press.
    pub button: MouseButton,
}

impl PendingClick {
    /// Creates a pending click.
    #[must_use]
    pub const fn new(position: Point, button: MouseButton) -> Self {
        Self { position, button }
    }
}

/// Output slots claimed by effects during a single cycle.
///
/// Slot policies are enforced by the effects themselves, not here. Each
/// effect only inspects the slots it needs; this type does not add any
/// cross-slot exclusivity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PendingActionState {
    /// Pointer destination for this cycle.
    pub move_target: Option<Point>,
    /// Pointer press for this cycle.
    pub pending_press: Option<PendingClick>,
    /// Key press for this cycle.
    pub pending_key: Option<Hotkey>,
    /// Delay before the press part of a combined move-then-act effect.
    pub action_delay_ms: u32,
    /// Externally supplied guard; never mutated by effects.
    can_press: bool,
}

impl PendingActionState {
    /// Creates an empty state for a new cycle.
    #[must_use]
    pub fn new(can_press: bool) -> Self {
        Self {
            can_press,
            ..Self::default()
        }
    }

    /// Returns whether pressing is currently permitted.
    #[must_use]
    pub const fn can_press(&self) -> bool {
        self.can_press
    }

    /// Returns true if no slot has been claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.move_target.is_none()
            && self.pending_press.is_none()
            && self.pending_key.is_none()
            && self.action_delay_ms == 0
    }

    /// Returns true if a press or key action is pending.
    #[must_use]
    pub fn has_press_action(&self) -> bool {
        self.pending_press.is_some() || self.pending_key.is_some()
    }
}
