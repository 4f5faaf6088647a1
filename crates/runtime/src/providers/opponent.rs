//! Provider backing the automated opponent.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use arena_core::{
    Action, ArenaConfig, AutomatedOpponentPolicy, BattleState, PcgRng, RandomSource, Side,
};

use crate::api::{ActionProvider, Result, RuntimeError};

/// Wraps [`AutomatedOpponentPolicy`] with its own random source.
///
/// The policy is consulted against the snapshot handed in at the moment the
/// deferred turn fires, never against the state that scheduled it.
pub struct AutomatedOpponentProvider {
    policy: AutomatedOpponentPolicy,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl AutomatedOpponentProvider {
    pub fn new(policy: AutomatedOpponentPolicy, rng: impl RandomSource + 'static) -> Self {
        Self {
            policy,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    pub fn from_config(config: &ArenaConfig, seed: u64) -> Self {
        Self::new(
            AutomatedOpponentPolicy::from_config(config),
            PcgRng::seed_from(seed),
        )
    }
}

#[async_trait]
impl ActionProvider for AutomatedOpponentProvider {
    async fn provide_action(&self, side: Side, state: &BattleState) -> Result<Action> {
        if side != self.policy.side() {
            return Err(RuntimeError::NoActionAvailable { side });
        }

        let action = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.policy.next_action(state, rng.as_mut())
        };

        let action = action.ok_or(RuntimeError::NoActionAvailable { side })?;
        tracing::debug!(side = %side, action = action.as_str(), "automated opponent decided");
        Ok(action)
    }
}
