/// Controls who drives the SECOND side of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OpponentMode {
    /// Two humans share the device; both avatars must be picked before start.
    #[default]
    Local,
    /// SECOND is played by the automated opponent and may have its avatar
    /// assigned at start.
    Automated,
}

impl OpponentMode {
    pub const fn is_automated(self) -> bool {
        matches!(self, Self::Automated)
    }
}

/// Battle rule constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaConfig {
    /// Health every combatant starts a match with; also the heal cap.
    pub max_health: u32,
    /// Smallest damage a single attack can roll (inclusive).
    pub damage_min: u32,
    /// Largest damage a single attack can roll (inclusive).
    pub damage_max: u32,
    /// Health restored by the once-per-match heal, before capping.
    pub heal_amount: u32,
    /// The automated opponent only considers healing at or below this health.
    pub opponent_heal_threshold: u32,
    /// Chance (out of 100) that the automated opponent heals when eligible.
    pub opponent_heal_chance_percent: u32,
}

impl ArenaConfig {
    pub const DEFAULT_MAX_HEALTH: u32 = 100;
    pub const DEFAULT_DAMAGE_MIN: u32 = 10;
    pub const DEFAULT_DAMAGE_MAX: u32 = 30;
    pub const DEFAULT_HEAL_AMOUNT: u32 = 12;
    pub const DEFAULT_OPPONENT_HEAL_THRESHOLD: u32 = 45;
    pub const DEFAULT_OPPONENT_HEAL_CHANCE_PERCENT: u32 = 35;

    pub const fn new() -> Self {
        Self {
            max_health: Self::DEFAULT_MAX_HEALTH,
            damage_min: Self::DEFAULT_DAMAGE_MIN,
            damage_max: Self::DEFAULT_DAMAGE_MAX,
            heal_amount: Self::DEFAULT_HEAL_AMOUNT,
            opponent_heal_threshold: Self::DEFAULT_OPPONENT_HEAL_THRESHOLD,
            opponent_heal_chance_percent: Self::DEFAULT_OPPONENT_HEAL_CHANCE_PERCENT,
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}
