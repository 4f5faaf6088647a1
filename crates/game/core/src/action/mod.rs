//! Battle actions and their transitions.
//!
//! Each operation of the state machine is a small action struct implementing
//! [`ActionTransition`]. [`Action`] wraps them so runtimes and providers can
//! pass requests around as values and route them through
//! [`crate::engine::BattleEngine::execute`].
mod combat;
pub mod error;
mod heal;
mod setup;
mod transition;

pub use combat::AttackAction;
pub use error::{SetupError, TurnError};
pub use heal::HealAction;
pub use setup::{ResetAction, SelectAvatarAction, SetModeAction, StartAction};
pub use transition::ActionTransition;

use crate::config::OpponentMode;
use crate::env::AvatarId;
use crate::state::Side;

/// A request against the battle state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    SelectAvatar(SelectAvatarAction),
    Start(StartAction),
    Attack(AttackAction),
    Heal(HealAction),
    Reset(ResetAction),
    SetMode(SetModeAction),
}

impl Action {
    pub fn select_avatar(side: Side, avatar: AvatarId) -> Self {
        Self::SelectAvatar(SelectAvatarAction::new(side, avatar))
    }

    pub fn start() -> Self {
        Self::Start(StartAction)
    }

    pub fn attack(side: Side) -> Self {
        Self::Attack(AttackAction::new(side))
    }

    pub fn heal(side: Side) -> Self {
        Self::Heal(HealAction::new(side))
    }

    pub fn reset() -> Self {
        Self::Reset(ResetAction)
    }

    pub fn set_mode(mode: OpponentMode) -> Self {
        Self::SetMode(SetModeAction::new(mode))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelectAvatar(_) => "select_avatar",
            Self::Start(_) => "start",
            Self::Attack(_) => "attack",
            Self::Heal(_) => "heal",
            Self::Reset(_) => "reset",
            Self::SetMode(_) => "set_mode",
        }
    }
}

/// Result of a successful `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchStarted {
    pub first_turn: Side,
    pub generation: u64,
    /// Avatar given to SECOND because the automated opponent had none.
    pub auto_assigned: Option<AvatarId>,
}

/// Result of a successful `attack`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub attacker: Side,
    pub defender: Side,
    pub damage: u32,
    pub defender_health: u32,
    /// The attack brought the defender to zero and ended the match.
    pub victory: bool,
}

/// Result of a successful `heal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealOutcome {
    pub side: Side,
    pub amount_applied: u32,
    pub health: u32,
}

/// Action-specific result returned by [`crate::engine::BattleEngine::execute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    AvatarSelected,
    Started(MatchStarted),
    Attack(AttackOutcome),
    Heal(HealOutcome),
    Reset,
    ModeChanged,
}
