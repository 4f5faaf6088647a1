use crate::config::ArenaConfig;
use crate::env::RandomSource;

/// Rolls the damage of a single attack, uniformly over a closed range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageRule {
    min: u32,
    max: u32,
}

impl DamageRule {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn from_config(config: &ArenaConfig) -> Self {
        Self::new(config.damage_min, config.damage_max)
    }

    /// Consumes exactly one draw from `rng`.
    pub fn roll_damage(&self, rng: &mut dyn RandomSource) -> u32 {
        rng.range(self.min, self.max)
    }
}

impl Default for DamageRule {
    fn default() -> Self {
        Self::new(ArenaConfig::DEFAULT_DAMAGE_MIN, ArenaConfig::DEFAULT_DAMAGE_MAX)
    }
}
