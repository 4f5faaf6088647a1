use crate::action::TurnError;
use crate::config::ArenaConfig;
use crate::state::Combatant;

/// Once-per-match heal, capped at the configured maximum health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealRule {
    amount: u32,
    max_health: u32,
}

/// Combatant fields after a successful heal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealResult {
    pub health: u32,
    pub heal_used: bool,
    /// Health actually gained; below the heal amount when the cap bites.
    pub amount_applied: u32,
}

impl HealRule {
    pub const fn new(amount: u32, max_health: u32) -> Self {
        Self { amount, max_health }
    }

    pub fn from_config(config: &ArenaConfig) -> Self {
        Self::new(config.heal_amount, config.max_health)
    }

    /// Computes the heal without touching the combatant.
    pub fn apply_heal(&self, combatant: &Combatant) -> Result<HealResult, TurnError> {
        if combatant.heal_used {
            return Err(TurnError::HealUnavailable {
                side: combatant.side,
            });
        }

        let health = combatant
            .health
            .saturating_add(self.amount)
            .min(self.max_health);

        Ok(HealResult {
            health,
            heal_used: true,
            amount_applied: health.saturating_sub(combatant.health),
        })
    }
}

impl Default for HealRule {
    fn default() -> Self {
        Self::new(ArenaConfig::DEFAULT_HEAL_AMOUNT, ArenaConfig::DEFAULT_MAX_HEALTH)
    }
}
