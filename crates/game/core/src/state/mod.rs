//! Authoritative battle state representation.
//!
//! [`BattleState`] is a plain value: the engine mutates it through
//! transitions, and runtimes clone it to hand snapshots to observers.
mod combatant;

pub use combatant::{Combatant, Side};

use crate::config::{ArenaConfig, OpponentMode};

/// Lifecycle of one match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    #[default]
    Setup,
    Active,
    Finished,
}

/// Canonical snapshot of one match.
///
/// `current_turn` is `Some` exactly while `phase == Active`, and `winner` is
/// `Some` exactly while `phase == Finished`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub phase: Phase,
    pub combatants: [Combatant; 2],
    pub current_turn: Option<Side>,
    pub winner: Option<Side>,
    pub mode: OpponentMode,

    /// Match identity. Bumped on every start and reset so work scheduled
    /// against an older match can recognise itself as stale.
    pub generation: u64,

    /// Count of successful transitions applied to this state.
    pub nonce: u64,
}

impl BattleState {
    pub fn new(mode: OpponentMode, config: &ArenaConfig) -> Self {
        Self {
            phase: Phase::Setup,
            combatants: [
                Combatant::new(Side::First, config.max_health),
                Combatant::new(Side::Second, config.max_health),
            ],
            current_turn: None,
            winner: None,
            mode,
            generation: 0,
            nonce: 0,
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        &mut self.combatants[side.index()]
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// True when `side` holds the turn of an active match.
    pub fn is_turn_of(&self, side: Side) -> bool {
        self.is_active() && self.current_turn == Some(side)
    }

    /// True when the automated opponent is expected to act next.
    pub fn awaits_automated_opponent(&self) -> bool {
        self.mode.is_automated() && self.is_turn_of(Side::Second)
    }

    /// Checks the phase/turn/winner coupling and health bounds.
    pub fn is_consistent(&self, config: &ArenaConfig) -> bool {
        let turn_ok = self.current_turn.is_some() == (self.phase == Phase::Active);
        let winner_ok = self.winner.is_some() == (self.phase == Phase::Finished);
        let health_ok = self
            .combatants
            .iter()
            .all(|combatant| combatant.health <= config.max_health);
        let slots_ok = Side::ALL
            .iter()
            .all(|side| self.combatant(*side).side == *side);
        turn_ok && winner_ok && health_ok && slots_ok
    }
}

impl Default for BattleState {
    fn default() -> Self {
        Self::new(OpponentMode::default(), &ArenaConfig::default())
    }
}
