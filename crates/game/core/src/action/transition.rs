use crate::env::BattleEnv;
use crate::state::BattleState;

/// Defines how a concrete action mutates battle state.
///
/// `pre_validate` must reject every illegal request before `apply` runs, so
/// that a rejected action never leaves a partial mutation behind. The engine
/// still restores the previous state if `apply` itself fails.
pub trait ActionTransition {
    type Error;
    type Outcome;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the state directly. Implementations may
    /// assume `pre_validate` has already succeeded.
    fn apply(
        &self,
        state: &mut BattleState,
        env: &mut BattleEnv<'_>,
    ) -> Result<Self::Outcome, Self::Error>;
}
