use crate::action::error::ensure_turn;
use crate::action::{ActionTransition, AttackOutcome, TurnError};
use crate::env::BattleEnv;
use crate::event::BattleEvent;
use crate::rules::DamageRule;
use crate::state::{BattleState, Phase, Side};

/// Strike the opposing side for a random amount of damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub actor: Side,
}

impl AttackAction {
    pub fn new(actor: Side) -> Self {
        Self { actor }
    }
}

impl ActionTransition for AttackAction {
    type Error = TurnError;
    type Outcome = AttackOutcome;

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        ensure_turn(state, self.actor)
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &mut BattleEnv<'_>,
    ) -> Result<AttackOutcome, Self::Error> {
        let defender = self.actor.other();
        let damage = DamageRule::from_config(env.config()).roll_damage(env.rng());
        let defender_health = state.combatant_mut(defender).take_damage(damage);

        env.emit(BattleEvent::AttackResolved {
            attacker: self.actor,
            defender,
            damage,
            defender_health,
        });

        // Win check runs before the turn is handed over.
        let victory = defender_health == 0;
        if victory {
            state.phase = Phase::Finished;
            state.winner = Some(self.actor);
            state.current_turn = None;
            env.emit(BattleEvent::Victory { winner: self.actor });
        } else {
            state.current_turn = Some(defender);
        }

        Ok(AttackOutcome {
            attacker: self.actor,
            defender,
            damage,
            defender_health,
            victory,
        })
    }
}
