//! Error types for slotwise.
//!
//! Applying an effect never fails: contention is reported through
//! [`ApplicationResult`](crate::ApplicationResult). The errors here cover the
//! edges around the core: parsing descriptors, loading configuration, and
//! handing the finished plan to a dispatcher.

use thiserror::Error;

use crate::cycle::CycleReport;

/// Validation errors that occur during input validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid hotkey '{input}': {reason}")]
    InvalidHotkey {
        input: String,
        reason: String,
    },

    #[error("Unknown mouse button '{input}'")]
    UnknownMouseButton {
        input: String,
    },

    #[error("Position ({x}, {y}) has a non-finite coordinate")]
    NonFinitePosition {
        x: f32,
        y: f32,
    },

    #[error("Rule name cannot be empty")]
    EmptyRuleName,

    #[error("Invalid config value for '{field}': {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },
}

/// Errors raised by an [`InputDispatcher`](crate::InputDispatcher).
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Dispatcher rejected the plan: {reason}")]
    Rejected {
        reason: String,
    },

    #[error("Input device unavailable: {message}")]
    Unavailable {
        message: String,
    },
}

/// Top-level error type for slotwise.
#[derive(Debug, Error)]
pub enum SlotwiseError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Dispatch failed after the cycle completed. The cycle's report is kept
    /// so its outcomes are not lost.
    #[error("Dispatch error: {source}")]
    Dispatch {
        source: DispatchError,
        report: Box<CycleReport>,
    },

    #[error("Config error: {message}")]
    Config {
        message: String,
    },
}

impl SlotwiseError {
    /// Creates a dispatch error carrying the report of the failed cycle.
    #[must_use]
    pub fn dispatch(source: DispatchError, report: CycleReport) -> Self {
        Self::Dispatch {
            source,
            report: Box::new(report),
        }
    }

    /// Creates a config error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a dispatch error.
    #[must_use]
    pub const fn is_dispatch(&self) -> bool {
        matches!(self, Self::Dispatch { .. })
    }

    /// Returns true if this is a config error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns the report of the cycle whose dispatch failed.
    #[must_use]
    pub fn cycle_report(&self) -> Option<&CycleReport> {
        match self {
            Self::Dispatch { report, .. } => Some(&**report),
            _ => None,
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// Only a temporarily unavailable input device is worth retrying on the
    /// next cycle.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Dispatch {
                source: DispatchError::Unavailable { .. },
                ..
            }
        )
    }
}

/// Result type alias for slotwise operations.
pub type SlotwiseResult<T> = Result<T, SlotwiseError>;
