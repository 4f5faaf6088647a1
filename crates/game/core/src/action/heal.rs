use crate::action::error::ensure_turn;
use crate::action::{ActionTransition, HealOutcome, TurnError};
use crate::env::BattleEnv;
use crate::event::BattleEvent;
use crate::rules::HealRule;
use crate::state::{BattleState, Side};

/// Spend the once-per-match heal. Always passes the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealAction {
    pub actor: Side,
}

impl HealAction {
    pub fn new(actor: Side) -> Self {
        Self { actor }
    }
}

impl ActionTransition for HealAction {
    type Error = TurnError;
    type Outcome = HealOutcome;

    fn pre_validate(&self, state: &BattleState, env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        ensure_turn(state, self.actor)?;
        HealRule::from_config(env.config())
            .apply_heal(state.combatant(self.actor))
            .map(|_| ())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &mut BattleEnv<'_>,
    ) -> Result<HealOutcome, Self::Error> {
        let result = HealRule::from_config(env.config()).apply_heal(state.combatant(self.actor))?;

        let combatant = state.combatant_mut(self.actor);
        combatant.health = result.health;
        combatant.heal_used = result.heal_used;
        state.current_turn = Some(self.actor.other());

        env.emit(BattleEvent::HealResolved {
            side: self.actor,
            amount_applied: result.amount_applied,
            health: result.health,
        });

        Ok(HealOutcome {
            side: self.actor,
            amount_applied: result.amount_applied,
            health: result.health,
        })
    }
}
