use crate::env::AvatarId;

/// Identifies a combatant slot; stable for the whole match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::First, Side::Second];

    /// The opposing slot.
    pub const fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// One side's fighter.
///
/// `health` stays within `0..=max_health`; `heal_used` only ever flips from
/// false to true within a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub side: Side,
    pub avatar: Option<AvatarId>,
    pub health: u32,
    pub heal_used: bool,
}

impl Combatant {
    pub fn new(side: Side, max_health: u32) -> Self {
        Self {
            side,
            avatar: None,
            health: max_health,
            heal_used: false,
        }
    }

    pub fn avatar_chosen(&self) -> bool {
        self.avatar.is_some()
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn can_heal(&self) -> bool {
        !self.heal_used
    }

    /// Restores full health and the heal charge, keeping the avatar.
    pub fn refresh(&mut self, max_health: u32) {
        self.health = max_health;
        self.heal_used = false;
    }

    /// Subtracts damage, flooring at zero. Returns the new health.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.health = self.health.saturating_sub(damage);
        self.health
    }
}
