//! Decision policy for the automated opponent.
//!
//! The policy never touches state. It reads a snapshot, picks one action for
//! its side, and leaves execution to whoever schedules it; that action is
//! always legal at the moment the policy is consulted.

use crate::action::Action;
use crate::config::ArenaConfig;
use crate::env::RandomSource;
use crate::state::{BattleState, Combatant, Side};

/// What the automated opponent does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpponentDecision {
    Attack,
    Heal,
}

/// Heals sometimes when low, otherwise attacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutomatedOpponentPolicy {
    side: Side,
    heal_threshold: u32,
    heal_chance_percent: u32,
}

impl AutomatedOpponentPolicy {
    pub fn from_config(config: &ArenaConfig) -> Self {
        Self {
            side: Side::Second,
            heal_threshold: config.opponent_heal_threshold,
            heal_chance_percent: config.opponent_heal_chance_percent.min(100),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// True when the automated mode is on and it is this policy's turn.
    pub fn should_act(&self, state: &BattleState) -> bool {
        state.mode.is_automated() && state.is_turn_of(self.side)
    }

    /// Heals when at or below the threshold, the heal is unused, and a d100
    /// roll lands within the heal chance. The roll is only drawn when the
    /// first two conditions hold.
    pub fn decide(&self, combatant: &Combatant, rng: &mut dyn RandomSource) -> OpponentDecision {
        let wants_heal = combatant.health <= self.heal_threshold && combatant.can_heal();
        if wants_heal && rng.roll_d100() <= self.heal_chance_percent {
            OpponentDecision::Heal
        } else {
            OpponentDecision::Attack
        }
    }

    /// The action to issue for this turn, or `None` when the policy is not
    /// supposed to act in `state`.
    pub fn next_action(&self, state: &BattleState, rng: &mut dyn RandomSource) -> Option<Action> {
        if !self.should_act(state) {
            return None;
        }
        let action = match self.decide(state.combatant(self.side), rng) {
            OpponentDecision::Heal => Action::heal(self.side),
            OpponentDecision::Attack => Action::attack(self.side),
        };
        Some(action)
    }
}

impl Default for AutomatedOpponentPolicy {
    fn default() -> Self {
        Self::from_config(&ArenaConfig::default())
    }
}
