//! Observable facts emitted by the engine.
//!
//! Every successful transition appends zero or more [`BattleEvent`]s; callers
//! forward them to whoever presents the match.

use crate::config::OpponentMode;
use crate::env::AvatarId;
use crate::state::Side;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    AvatarSelected {
        side: Side,
        avatar: AvatarId,
    },
    /// The automated opponent had no avatar at start and was given one.
    AvatarAutoAssigned {
        side: Side,
        avatar: AvatarId,
    },
    MatchStarted {
        first_turn: Side,
        generation: u64,
    },
    AttackResolved {
        attacker: Side,
        defender: Side,
        damage: u32,
        defender_health: u32,
    },
    HealResolved {
        side: Side,
        amount_applied: u32,
        health: u32,
    },
    Victory {
        winner: Side,
    },
    MatchReset {
        generation: u64,
    },
    ModeChanged {
        mode: OpponentMode,
    },
}
