//! Errors raised by battle actions.
//!
//! Both enums are returned before any state is touched; see
//! [`crate::action::ActionTransition`].

use crate::env::AvatarId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{BattleState, Phase, Side};

/// Failures of the setup operations (`select_avatar`, `start`).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    /// Setup operations are only legal before the match starts.
    #[error("match already started (phase: {phase})")]
    AlreadyStarted { phase: Phase },

    /// A required side has not picked an avatar.
    #[error("{side} side has not chosen an avatar")]
    MissingAvatar { side: Side },

    #[error("avatar {avatar} is not in the roster")]
    UnknownAvatar { avatar: AvatarId },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingAvatar { .. } => ErrorSeverity::Recoverable,
            Self::AlreadyStarted { .. } | Self::UnknownAvatar { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyStarted { .. } => "SETUP_ALREADY_STARTED",
            Self::MissingAvatar { .. } => "SETUP_MISSING_AVATAR",
            Self::UnknownAvatar { .. } => "SETUP_UNKNOWN_AVATAR",
        }
    }
}

/// Failures of the in-match operations (`attack`, `heal`).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("not {side}'s turn ({current} is acting)")]
    NotYourTurn { side: Side, current: Side },

    #[error("{side} has already used its heal this match")]
    HealUnavailable { side: Side },

    #[error("no match in progress (phase: {phase})")]
    MatchNotActive { phase: Phase },
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::HealUnavailable { .. } => ErrorSeverity::Recoverable,
            Self::NotYourTurn { .. } | Self::MatchNotActive { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotYourTurn { .. } => "TURN_NOT_YOUR_TURN",
            Self::HealUnavailable { .. } => "TURN_HEAL_UNAVAILABLE",
            Self::MatchNotActive { .. } => "TURN_MATCH_NOT_ACTIVE",
        }
    }
}

/// Checks that `side` may act in `state`; shared by attack and heal.
pub(crate) fn ensure_turn(state: &BattleState, side: Side) -> Result<(), TurnError> {
    if !state.is_active() {
        return Err(TurnError::MatchNotActive { phase: state.phase });
    }
    match state.current_turn {
        Some(current) if current != side => Err(TurnError::NotYourTurn { side, current }),
        Some(_) => Ok(()),
        None => Err(TurnError::MatchNotActive { phase: state.phase }),
    }
}
