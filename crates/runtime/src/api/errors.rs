//! Unified error types surfaced by the runtime API.
//!
//! Wraps rejected battle operations and failures from worker coordination so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use arena_core::{BattleError, SetupError, Side, TurnError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("match worker command channel closed")]
    CommandChannelClosed,

    #[error("match worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("match worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("{side} action provider has no legal action in the current state")]
    NoActionAvailable { side: Side },

    #[error("match worker answered {action} with a mismatched result")]
    UnexpectedResult { action: &'static str },
}

impl RuntimeError {
    /// The battle rejection behind this error, if any.
    pub fn battle_error(&self) -> Option<&BattleError> {
        match self {
            Self::Battle(error) => Some(error),
            _ => None,
        }
    }

    pub fn setup_error(&self) -> Option<&SetupError> {
        match self.battle_error()? {
            BattleError::Setup(error) => Some(error),
            BattleError::Turn(_) => None,
        }
    }

    pub fn turn_error(&self) -> Option<&TurnError> {
        match self.battle_error()? {
            BattleError::Turn(error) => Some(error),
            BattleError::Setup(_) => None,
        }
    }
}

impl From<SetupError> for RuntimeError {
    fn from(error: SetupError) -> Self {
        Self::Battle(error.into())
    }
}

impl From<TurnError> for RuntimeError {
    fn from(error: TurnError) -> Self {
        Self::Battle(error.into())
    }
}
