//! Event types for different topics.

use arena_core::{BattleEvent, Side};
use serde::{Deserialize, Serialize};

/// An engine event tagged with the match it happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Generation of the match after the transition that emitted `event`.
    pub generation: u64,
    /// Transition counter after the emitting transition.
    pub nonce: u64,
    pub event: BattleEvent,
}

/// Announces who holds the turn (lightweight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub side: Side,
    pub generation: u64,
    /// The automated opponent will take this turn after its think delay.
    pub automated: bool,
}
