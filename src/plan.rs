//! Handoff from a finished cycle to the input dispatcher.
//!
//! The reconciliation core never emits input. After a cycle completes, the
//! finalized [`PendingActionState`] is flattened into an ordered
//! [`ActionPlan`] and handed to an [`InputDispatcher`] implementation that
//! talks to the actual pointer/keyboard backend.

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::input::{Hotkey, MouseButton};
use crate::point::Point;
use crate::state::PendingActionState;

/// A single low-level input step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ActionStep {
    /// Move the pointer.
    MoveTo {
        /// Destination.
        target: Point,
    },
    /// Wait before pressing.
    Wait {
        /// Milliseconds to wait.
        ms: u32,
    },
    /// Press a pointer button.
    Click {
        /// Press position.
        position: Point,
        /// Button to press.
        button: MouseButton,
    },
    /// Press a key.
    PressKey {
        /// Key to press.
        key: Hotkey,
    },
}

/// Ordered input steps for one cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionPlan {
    steps: Vec<ActionStep>,
}

impl ActionPlan {
    /// Flattens a finalized state into steps.
    ///
    /// Order is move, wait, click, key. The wait is only emitted when the
    /// delay is non-zero and something will be pressed after it.
    #[must_use]
    pub fn from_state(state: &PendingActionState) -> Self {
        let mut steps = Vec::with_capacity(4);

        if let Some(target) = state.move_target {
            steps.push(ActionStep::MoveTo { target });
        }

        if state.action_delay_ms > 0 && state.has_press_action() {
            steps.push(ActionStep::Wait {
                ms: state.action_delay_ms,
            });
        }

        if let Some(click) = state.pending_press {
            steps.push(ActionStep::Click {
                position: click.position,
                button: click.button,
            });
        }

        if let Some(key) = &state.pending_key {
            steps.push(ActionStep::PressKey { key: key.clone() });
        }

        Self { steps }
    }

    /// Returns the steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[ActionStep] {
        &self.steps
    }

    /// Returns true if there is nothing to emit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

impl From<&PendingActionState> for ActionPlan {
    fn from(state: &PendingActionState) -> Self {
        Self::from_state(state)
    }
}

/// Downstream consumer of finished plans.
///
/// Implementations translate steps into real input. They are called at most
/// once per cycle, after every effect for that cycle has been applied.
pub trait InputDispatcher {
    /// Emits the plan.
    fn dispatch(&mut self, plan: &ActionPlan) -> Result<(), DispatchError>;
}

/// In-memory dispatcher that keeps every plan it receives.
///
/// Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    plans: Vec<ActionPlan>,
}

impl RecordingDispatcher {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded plans, oldest first.
    #[must_use]
    pub fn plans(&self) -> &[ActionPlan] {
        &self.plans
    }

    /// Returns the most recent plan.
    #[must_use]
    pub fn last(&self) -> Option<&ActionPlan> {
        self.plans.last()
    }
}

impl InputDispatcher for RecordingDispatcher {
    fn dispatch(&mut self, plan: &ActionPlan) -> Result<(), DispatchError> {
        self.plans.push(plan.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PendingClick;

    #[test]
    fn test_empty_state_gives_empty_plan() {
        let plan = ActionPlan::from_state(&PendingActionState::new(true));
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn test_full_order() {
        let mut state = PendingActionState::new(true);
        state.move_target = Some(Point::from_ints(1, 1));
        state.pending_press = Some(PendingClick::new(Point::from_ints(1, 1), MouseButton::Left));
        state.pending_key = Some(Hotkey::key("R").unwrap());
        state.action_delay_ms = 20;

        let plan = ActionPlan::from_state(&state);
        assert_eq!(
            plan.steps(),
            &[
                ActionStep::MoveTo { target: Point::from_ints(1, 1) },
                ActionStep::Wait { ms: 20 },
                ActionStep::Click {
                    position: Point::from_ints(1, 1),
                    button: MouseButton::Left,
                },
                ActionStep::PressKey { key: Hotkey::key("R").unwrap() },
            ]
        );
    }

    #[test]
    fn test_delay_without_press_is_dropped() {
        let mut state = PendingActionState::new(true);
        state.move_target = Some(Point::from_ints(2, 2));
        state.action_delay_ms = 100;

        let plan = ActionPlan::from_state(&state);
        assert_eq!(plan.steps(), &[ActionStep::MoveTo { target: Point::from_ints(2, 2) }]);
    }

    #[test]
    fn test_recording_dispatcher() {
        let mut dispatcher = RecordingDispatcher::new();
        assert!(dispatcher.last().is_none());

        let mut state = PendingActionState::new(true);
        state.move_target = Some(Point::from_ints(3, 3));
        dispatcher.dispatch(&ActionPlan::from(&state)).unwrap();

        assert_eq!(dispatcher.plans().len(), 1);
        assert_eq!(dispatcher.last().unwrap().len(), 1);
    }

    #[test]
    fn test_step_serialization() {
        let step = ActionStep::Wait { ms: 5 };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["step"], "wait");
        assert_eq!(json["ms"], 5);
    }
}
