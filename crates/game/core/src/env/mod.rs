//! Inputs the engine consumes but does not own.
//!
//! [`BattleEnv`] bundles the rule configuration, the injected random source,
//! and the event buffer a transition appends to while it applies.
mod avatars;
mod rng;

pub use avatars::{AVATARS, AvatarId};
pub use rng::{PcgRng, RandomSource, ScriptedRng};

use crate::config::ArenaConfig;
use crate::event::BattleEvent;

/// Environment handed to every transition.
pub struct BattleEnv<'a> {
    config: &'a ArenaConfig,
    rng: &'a mut dyn RandomSource,
    events: &'a mut Vec<BattleEvent>,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        config: &'a ArenaConfig,
        rng: &'a mut dyn RandomSource,
        events: &'a mut Vec<BattleEvent>,
    ) -> Self {
        Self {
            config,
            rng,
            events,
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        self.config
    }

    pub fn rng(&mut self) -> &mut dyn RandomSource {
        &mut *self.rng
    }

    /// Records an observable event for the current transition.
    pub fn emit(&mut self, event: BattleEvent) {
        self.events.push(event);
    }
}
