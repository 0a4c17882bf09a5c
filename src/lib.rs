//! # slotwise - Per-cycle input intent reconciliation
//!
//! A rule system evaluates many independent rules every cycle, and each rule
//! may ask for some low-level input: move the pointer, press a button, press
//! a key. slotwise decides which of those requests may claim the shared
//! output slots so that exactly one coherent set of actions is emitted per
//! cycle.
//!
//! ## Core Concepts
//!
//! - **Effect**: An immutable request to claim slots ([`SideEffect`])
//! - **PendingActionState**: The per-cycle slot record effects compete over
//! - **ApplicationResult**: Unique, duplicate, or unable to apply
//! - **Reconciler**: Drives one cycle in priority order and reports outcomes
//!
//! Slot policies are deliberately asymmetric. A plain press or key claim is
//! first-writer-wins, movement is last-writer-wins, and the combined
//! move-and-press effect overwrites whatever press is pending.
//!
//! ## Usage
//!
//! ```rust
//! use slotwise::{ApplicationResult, MouseButton, MoveEffect, PlannedEffect, PressEffect, Reconciler};
//!
//! let effects = vec![
//!     PlannedEffect::new("approach", MoveEffect::at(10, 10))?,
//!     PlannedEffect::new("attack", PressEffect::at(10, 10))?,
//!     PlannedEffect::new("inspect", PressEffect::at(10, 10).with_button(MouseButton::Right))?,
//! ];
//!
//! let report = Reconciler::default().run_cycle(&effects, true);
//! assert_eq!(
//!     report.results(),
//!     vec![
//!         ApplicationResult::AppliedUnique,
//!         ApplicationResult::AppliedUnique,
//!         ApplicationResult::UnableToApply,
//!     ]
//! );
//! # Ok::<(), slotwise::ValidationError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cycle;
pub mod effect;
pub mod error;
pub mod input;
pub mod plan;
pub mod point;
pub mod result;
pub mod state;

// Re-export primary types at crate root for convenience
pub use cycle::{
    CycleId, CycleReport, DelayOverwrite, EffectOutcome, PlannedEffect, Reconciler,
    ReconcilerConfig, RejectionKind,
};
pub use effect::{ApplyEffect, MoveAndKeyEffect, MoveAndPressEffect, MoveEffect, PressEffect, SideEffect};
pub use error::{DispatchError, SlotwiseError, SlotwiseResult, ValidationError};
pub use input::{Hotkey, MouseButton};
pub use plan::{ActionPlan, ActionStep, InputDispatcher, RecordingDispatcher};
pub use point::Point;
pub use result::ApplicationResult;
pub use state::{PendingActionState, PendingClick};
