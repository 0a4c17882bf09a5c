//! Outcome of applying one effect to the pending state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Three-valued outcome returned by every effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationResult {
    /// The effect newly claimed or changed a slot.
    AppliedUnique,
    /// The effect matches what is already pending; nothing changed.
    AppliedDuplicate,
    /// The effect was blocked by the press guard or an occupied slot.
    UnableToApply,
}

impl ApplicationResult {
    /// Returns true for both applied outcomes.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::AppliedUnique | Self::AppliedDuplicate)
    }

    /// Returns true if the effect mutated the state.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        matches!(self, Self::AppliedUnique)
    }

    /// Returns true for a no-op duplicate.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::AppliedDuplicate)
    }

    /// Returns true if the effect could not be applied.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::UnableToApply)
    }
}

impl fmt::Display for ApplicationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AppliedUnique => write!(f, "applied_unique"),
            Self::AppliedDuplicate => write!(f, "applied_duplicate"),
            Self::UnableToApply => write!(f, "unable_to_apply"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(ApplicationResult::AppliedUnique.is_applied());
        assert!(ApplicationResult::AppliedDuplicate.is_applied());
        assert!(!ApplicationResult::UnableToApply.is_applied());

        assert!(ApplicationResult::AppliedUnique.is_unique());
        assert!(ApplicationResult::AppliedDuplicate.is_duplicate());
        assert!(ApplicationResult::UnableToApply.is_rejected());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ApplicationResult::AppliedDuplicate), "applied_duplicate");
        assert_eq!(format!("{}", ApplicationResult::UnableToApply), "unable_to_apply");
    }
}
