//! Reconciliation loop driver.
//!
//! One call to [`Reconciler::run_cycle`] is one evaluation cycle: a fresh
//! [`PendingActionState`] is built with the press guard, every planned effect
//! is applied strictly in priority order, and the outcomes are collected
//! into a [`CycleReport`]. List order is the only conflict-resolution
//! mechanism; nothing here reorders, retries or skips effects on failure.
//!
//! Effects never log. All diagnostics are emitted from this module.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::effect::{ApplyEffect, SideEffect};
use crate::error::{SlotwiseError, SlotwiseResult, ValidationError};
use crate::plan::{ActionPlan, InputDispatcher};
use crate::result::ApplicationResult;
use crate::state::PendingActionState;

/// Unique identifier for a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleId(Uuid);

impl CycleId {
    /// Creates a new random cycle ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Emit a warning for every effect that could not be applied.
    pub log_rejections: bool,
    /// Emit a trace event for every duplicate.
    pub log_duplicates: bool,
    /// Warn when a cycle carries more effects than this. All effects are
    /// still applied.
    pub warn_effects_above: usize,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            log_rejections: true,
            log_duplicates: false,
            warn_effects_above: 256,
        }
    }
}

impl ReconcilerConfig {
    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.warn_effects_above == 0 {
            return Err(ValidationError::InvalidConfig {
                field: "warn_effects_above".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> SlotwiseResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SlotwiseError::config(format!("invalid reconciler config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

/// An effect produced by a named rule, ready to apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedEffect {
    /// Name of the rule that produced the effect.
    pub rule: String,
    /// The effect itself.
    pub effect: SideEffect,
}

impl PlannedEffect {
    /// Pairs an effect with the rule that produced it.
    pub fn new(rule: impl Into<String>, effect: impl Into<SideEffect>) -> Result<Self, ValidationError> {
        let rule = rule.into();
        if rule.trim().is_empty() {
            return Err(ValidationError::EmptyRuleName);
        }
        Ok(Self {
            rule,
            effect: effect.into(),
        })
    }
}

impl<'de> Deserialize<'de> for PlannedEffect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            rule: String,
            effect: SideEffect,
        }

        let raw = Raw::deserialize(deserializer)?;
        PlannedEffect::new(raw.rule, raw.effect).map_err(serde::de::Error::custom)
    }
}

/// Why an effect returned [`ApplicationResult::UnableToApply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    /// Pressing was not permitted this cycle.
    Guard,
    /// A mutually exclusive slot was already claimed by a different request.
    SlotConflict,
}

impl RejectionKind {
    fn classify(effect: &SideEffect, can_press: bool) -> Self {
        if effect.requires_press() && !can_press {
            Self::Guard
        } else {
            Self::SlotConflict
        }
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guard => write!(f, "guard"),
            Self::SlotConflict => write!(f, "slot_conflict"),
        }
    }
}

/// Result of applying one planned effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectOutcome {
    /// Position in the priority-ordered input.
    pub index: usize,
    /// Rule that produced the effect.
    pub rule: String,
    /// The applied effect.
    pub effect: SideEffect,
    /// What happened.
    pub result: ApplicationResult,
    /// Classification, set only when `result` is a rejection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<RejectionKind>,
}

/// A combined effect replaced a different delay set earlier in the cycle.
///
/// Which delay the dispatcher should honor in this case is ambiguous
/// upstream; the state keeps the last writer's value and this record lets
/// the caller see that an earlier one was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayOverwrite {
    /// Index of the effect that overwrote the delay.
    pub index: usize,
    /// Delay that was discarded.
    pub previous_ms: u32,
    /// Delay now pending.
    pub new_ms: u32,
}

/// Everything one cycle produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Cycle identifier, for correlating log lines.
    pub id: CycleId,
    /// When the cycle started.
    pub started_at: DateTime<Utc>,
    /// Finalized slot state for the dispatcher.
    pub state: PendingActionState,
    /// One outcome per applied effect, in input order.
    pub outcomes: Vec<EffectOutcome>,
    /// Delay values discarded by later combined effects.
    pub delay_overwrites: Vec<DelayOverwrite>,
}

impl CycleReport {
    /// Returns the results in input order.
    #[must_use]
    pub fn results(&self) -> Vec<ApplicationResult> {
        self.outcomes.iter().map(|o| o.result).collect()
    }

    /// Number of effects that claimed or changed a slot.
    #[must_use]
    pub fn applied_unique(&self) -> usize {
        self.count(ApplicationResult::AppliedUnique)
    }

    /// Number of no-op duplicates.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.count(ApplicationResult::AppliedDuplicate)
    }

    /// Number of effects that could not be applied.
    #[must_use]
    pub fn rejections(&self) -> usize {
        self.count(ApplicationResult::UnableToApply)
    }

    /// Iterates over rejected outcomes.
    pub fn rejected(&self) -> impl Iterator<Item = &EffectOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_rejected())
    }

    /// Flattens the finalized state into dispatcher steps.
    #[must_use]
    pub fn plan(&self) -> ActionPlan {
        ActionPlan::from_state(&self.state)
    }

    fn count(&self, result: ApplicationResult) -> usize {
        self.outcomes.iter().filter(|o| o.result == result).count()
    }
}

/// Drives evaluation cycles against fresh pending state.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcilerConfig,
}

impl Reconciler {
    /// Creates a reconciler with a validated config.
    pub fn new(config: ReconcilerConfig) -> SlotwiseResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the active config.
    #[must_use]
    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Applies `effects` in order against a fresh state.
    ///
    /// `can_press` is the externally computed guard and stays fixed for the
    /// whole cycle.
    #[must_use]
    pub fn run_cycle(&self, effects: &[PlannedEffect], can_press: bool) -> CycleReport {
        let id = CycleId::new();
        let started_at = Utc::now();
        let mut state = PendingActionState::new(can_press);

        debug!(cycle = %id, effects = effects.len(), can_press, "cycle started");
        let threshold = self.config.warn_effects_above;
        if effects.len() > threshold {
            warn!(cycle = %id, effects = effects.len(), threshold, "unusually long effect list for one cycle");
        }

        let mut outcomes = Vec::with_capacity(effects.len());
        let mut delay_overwrites = Vec::new();
        let mut delay_claimed = false;

        for (index, planned) in effects.iter().enumerate() {
            let previous_delay = state.action_delay_ms;
            let result = planned.effect.apply(&mut state);

            if planned.effect.sets_delay() && result.is_unique() {
                if delay_claimed && previous_delay != state.action_delay_ms {
                    warn!(
                        cycle = %id,
                        rule = %planned.rule,
                        previous_ms = previous_delay,
                        new_ms = state.action_delay_ms,
                        "action delay overwritten by a later combined effect"
                    );
                    delay_overwrites.push(DelayOverwrite {
                        index,
                        previous_ms: previous_delay,
                        new_ms: state.action_delay_ms,
                    });
                }
                delay_claimed = true;
            }

            let rejection = result
                .is_rejected()
                .then(|| RejectionKind::classify(&planned.effect, can_press));

            match (result, rejection) {
                (ApplicationResult::UnableToApply, Some(kind)) if self.config.log_rejections => {
                    warn!(cycle = %id, rule = %planned.rule, effect = %planned.effect, reason = %kind, "unable to apply effect");
                }
                (ApplicationResult::AppliedDuplicate, _) if self.config.log_duplicates => {
                    trace!(cycle = %id, rule = %planned.rule, effect = %planned.effect, "duplicate effect");
                }
                _ => {}
            }

            outcomes.push(EffectOutcome {
                index,
                rule: planned.rule.clone(),
                effect: planned.effect.clone(),
                result,
                rejection,
            });
        }

        let report = CycleReport {
            id,
            started_at,
            state,
            outcomes,
            delay_overwrites,
        };

        debug!(
            cycle = %id,
            unique = report.applied_unique(),
            duplicates = report.duplicates(),
            rejections = report.rejections(),
            "cycle finished"
        );

        report
    }

    /// Runs one cycle and hands the resulting plan to `dispatcher`.
    ///
    /// Empty plans are not dispatched. On dispatch failure the cycle report
    /// travels inside the error; see [`SlotwiseError::cycle_report`].
    pub fn run_and_dispatch<D>(
        &self,
        effects: &[PlannedEffect],
        can_press: bool,
        dispatcher: &mut D,
    ) -> SlotwiseResult<CycleReport>
    where
        D: InputDispatcher + ?Sized,
    {
        let report = self.run_cycle(effects, can_press);
        let plan = report.plan();
        if !plan.is_empty() {
            if let Err(e) = dispatcher.dispatch(&plan) {
                warn!(
                    cycle = %report.id,
                    error = %e,
                    unique = report.applied_unique(),
                    duplicates = report.duplicates(),
                    rejections = report.rejections(),
                    "dispatch failed"
                );
                return Err(SlotwiseError::dispatch(e, report));
            }
        }
        Ok(report)
    }
}
