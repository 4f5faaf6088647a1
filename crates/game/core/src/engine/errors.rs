//! Error type for the engine's generic `execute` entry point.

use core::convert::Infallible;

use crate::action::{SetupError, TurnError};
use crate::error::{ErrorSeverity, GameError};

/// Any failure surfaced by [`super::BattleEngine::execute`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl From<Infallible> for BattleError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Setup(error) => error.severity(),
            Self::Turn(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Setup(error) => error.error_code(),
            Self::Turn(error) => error.error_code(),
        }
    }
}
