//! Asynchronous abstraction for sourcing each side's intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a side can be
//! driven by human input, scripted fixtures, or the automated policy.
use async_trait::async_trait;
use arena_core::{Action, BattleState, Side};

use super::errors::Result;

/// Trait for providing actions based on the current battle state.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - The automated opponent
/// - Scripted/replayed actions
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `side` based on a read-only snapshot.
    async fn provide_action(&self, side: Side, state: &BattleState) -> Result<Action>;
}

/// A simple action provider that always attacks.
/// Useful for testing or as a headless stand-in for a human.
pub struct AlwaysAttackProvider;

#[async_trait]
impl ActionProvider for AlwaysAttackProvider {
    async fn provide_action(&self, side: Side, _state: &BattleState) -> Result<Action> {
        Ok(Action::attack(side))
    }
}
