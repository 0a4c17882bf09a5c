use proptest::prelude::*;

use slotwise::{
    ApplicationResult, ApplyEffect, Hotkey, MouseButton, MoveAndKeyEffect, MoveAndPressEffect,
    MoveEffect, PendingActionState, PlannedEffect, Point, PressEffect, Reconciler, SideEffect,
};

fn point() -> impl Strategy<Value = Point> {
    (-50i32..50, -50i32..50).prop_map(|(x, y)| Point::from_ints(x, y))
}

fn button() -> impl Strategy<Value = MouseButton> {
    prop_oneof![
        Just(MouseButton::Left),
        Just(MouseButton::Right),
        Just(MouseButton::Middle),
    ]
}

fn hotkey() -> impl Strategy<Value = Hotkey> {
    prop_oneof![Just("A"), Just("B"), Just("F1"), Just("Ctrl+A"), Just("Space")]
        .prop_map(|name| name.parse::<Hotkey>().unwrap())
}

fn effect() -> impl Strategy<Value = SideEffect> {
    prop_oneof![
        (point(), button()).prop_map(|(p, b)| SideEffect::from(PressEffect::new(p, b))),
        point().prop_map(|p| SideEffect::from(MoveEffect::new(p))),
        (point(), button(), 0u32..100)
            .prop_map(|(p, b, d)| SideEffect::from(MoveAndPressEffect::new(p, b, d))),
        (point(), hotkey(), 0u32..100)
            .prop_map(|(p, k, d)| SideEffect::from(MoveAndKeyEffect::new(p, k, d))),
    ]
}

/// Applies a random prefix so properties are checked against arbitrary
/// mid-cycle states, not just empty ones.
fn state_after(prefix: &[SideEffect], can_press: bool) -> PendingActionState {
    let mut state = PendingActionState::new(can_press);
    for e in prefix {
        e.apply(&mut state);
    }
    state
}

proptest! {
    #[test]
    fn fresh_state_always_accepts(candidate in effect()) {
        let mut state = PendingActionState::new(true);
        prop_assert_eq!(candidate.apply(&mut state), ApplicationResult::AppliedUnique);
    }

    #[test]
    fn guard_leaves_state_untouched(
        prefix in prop::collection::vec(effect(), 0..6),
        candidate in effect(),
    ) {
        prop_assume!(candidate.requires_press());
        let mut state = state_after(&prefix, false);
        let before = state.clone();
        prop_assert_eq!(candidate.apply(&mut state), ApplicationResult::UnableToApply);
        prop_assert_eq!(state, before);
    }

    #[test]
    fn reapplying_is_duplicate_and_idempotent(
        prefix in prop::collection::vec(effect(), 0..6),
        candidate in effect(),
    ) {
        let mut state = state_after(&prefix, true);
        if candidate.apply(&mut state).is_unique() {
            let after_first = state.clone();
            prop_assert_eq!(candidate.apply(&mut state), ApplicationResult::AppliedDuplicate);
            prop_assert_eq!(state, after_first);
        }
    }

    #[test]
    fn rejection_never_mutates(
        prefix in prop::collection::vec(effect(), 0..8),
        candidate in effect(),
        can_press in any::<bool>(),
    ) {
        let mut state = state_after(&prefix, can_press);
        let before = state.clone();
        if candidate.apply(&mut state).is_rejected() {
            prop_assert_eq!(state, before);
        }
    }

    #[test]
    fn last_move_wins(targets in prop::collection::vec(point(), 1..10)) {
        let mut state = PendingActionState::new(true);
        for p in &targets {
            MoveEffect::new(*p).apply(&mut state);
        }
        prop_assert_eq!(state.move_target, targets.last().copied());
    }

    #[test]
    fn first_press_wins(
        presses in prop::collection::vec((point(), button()), 1..10),
    ) {
        let mut state = PendingActionState::new(true);
        for (p, b) in &presses {
            PressEffect::new(*p, *b).apply(&mut state);
        }
        let (p, b) = presses[0];
        prop_assert_eq!(state.pending_press.map(|c| (c.position, c.button)), Some((p, b)));
    }

    #[test]
    fn reconciler_matches_manual_application(
        effects in prop::collection::vec(effect(), 0..300),
        can_press in any::<bool>(),
    ) {
        let planned: Vec<PlannedEffect> = effects
            .iter()
            .enumerate()
            .map(|(i, e)| PlannedEffect::new(format!("rule-{i}"), e.clone()).unwrap())
            .collect();
        let report = Reconciler::default().run_cycle(&planned, can_press);

        let mut state = PendingActionState::new(can_press);
        let expected: Vec<ApplicationResult> = effects.iter().map(|e| e.apply(&mut state)).collect();

        prop_assert_eq!(report.results(), expected);
        prop_assert_eq!(report.state, state);
    }
}
