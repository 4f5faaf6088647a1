//! Common error infrastructure for arena-core.
//!
//! Domain-specific errors (`SetupError`, `TurnError`) live in
//! [`crate::action::error`] next to the transitions that raise them. This
//! module only holds the classification shared by all of them.
//!
//! No arena error is fatal: every rejected operation leaves the battle state
//! untouched and the caller may simply try something else.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same caller can succeed with a different action right now.
    ///
    /// Examples: heal already used (attack instead), avatar missing (pick one)
    Recoverable,

    /// The request was illegal for the current phase or turn and should not
    /// be retried unchanged.
    ///
    /// Examples: acting out of turn, selecting an avatar mid-match
    Validation,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }
}

/// Common trait for all arena-core errors.
///
/// Use `#[derive(thiserror::Error)]` for the Display/Error impl and classify
/// severity by recoverability, not by impact.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
