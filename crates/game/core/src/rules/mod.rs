//! Stateless combat rules consulted by the attack and heal transitions.
mod damage;
mod heal;

pub use damage::DamageRule;
pub use heal::{HealResult, HealRule};
