use core::convert::Infallible;

use crate::action::{ActionTransition, MatchStarted, SetupError};
use crate::config::OpponentMode;
use crate::env::{AvatarId, BattleEnv};
use crate::event::BattleEvent;
use crate::state::{BattleState, Combatant, Phase, Side};

/// Records a side's avatar choice during setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectAvatarAction {
    pub side: Side,
    pub avatar: AvatarId,
}

impl SelectAvatarAction {
    pub fn new(side: Side, avatar: AvatarId) -> Self {
        Self { side, avatar }
    }
}

impl ActionTransition for SelectAvatarAction {
    type Error = SetupError;
    type Outcome = ();

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        ensure_setup(state)?;
        if !self.avatar.is_valid() {
            return Err(SetupError::UnknownAvatar {
                avatar: self.avatar,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut BattleState, env: &mut BattleEnv<'_>) -> Result<(), Self::Error> {
        state.combatant_mut(self.side).avatar = Some(self.avatar);
        env.emit(BattleEvent::AvatarSelected {
            side: self.side,
            avatar: self.avatar,
        });
        Ok(())
    }
}

/// Moves a prepared match from SETUP to ACTIVE.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartAction;

impl ActionTransition for StartAction {
    type Error = SetupError;
    type Outcome = MatchStarted;

    fn pre_validate(&self, state: &BattleState, _env: &BattleEnv<'_>) -> Result<(), Self::Error> {
        ensure_setup(state)?;
        if !state.combatant(Side::First).avatar_chosen() {
            return Err(SetupError::MissingAvatar { side: Side::First });
        }
        if !state.combatant(Side::Second).avatar_chosen() && !state.mode.is_automated() {
            return Err(SetupError::MissingAvatar { side: Side::Second });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut BattleState,
        env: &mut BattleEnv<'_>,
    ) -> Result<MatchStarted, Self::Error> {
        let mut auto_assigned = None;
        if !state.combatant(Side::Second).avatar_chosen() {
            let avatar = AvatarId::random(env.rng());
            state.combatant_mut(Side::Second).avatar = Some(avatar);
            auto_assigned = Some(avatar);
            env.emit(BattleEvent::AvatarAutoAssigned {
                side: Side::Second,
                avatar,
            });
        }

        let max_health = env.config().max_health;
        for combatant in &mut state.combatants {
            combatant.refresh(max_health);
        }

        let first_turn = Side::ALL[env.rng().pick_index(Side::ALL.len())];
        state.generation += 1;
        state.phase = Phase::Active;
        state.current_turn = Some(first_turn);
        state.winner = None;

        env.emit(BattleEvent::MatchStarted {
            first_turn,
            generation: state.generation,
        });

        Ok(MatchStarted {
            first_turn,
            generation: state.generation,
            auto_assigned,
        })
    }
}

/// Discards the current match and returns to SETUP with fresh combatants.
///
/// Legal in every phase. The opponent mode survives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResetAction;

impl ActionTransition for ResetAction {
    type Error = Infallible;
    type Outcome = ();

    fn apply(&self, state: &mut BattleState, env: &mut BattleEnv<'_>) -> Result<(), Self::Error> {
        reset_match(state, env);
        Ok(())
    }
}

/// Switches opponent mode; like the mode selector it always resets first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetModeAction {
    pub mode: OpponentMode,
}

impl SetModeAction {
    pub fn new(mode: OpponentMode) -> Self {
        Self { mode }
    }
}

impl ActionTransition for SetModeAction {
    type Error = Infallible;
    type Outcome = ();

    fn apply(&self, state: &mut BattleState, env: &mut BattleEnv<'_>) -> Result<(), Self::Error> {
        reset_match(state, env);
        state.mode = self.mode;
        env.emit(BattleEvent::ModeChanged { mode: self.mode });
        Ok(())
    }
}

fn ensure_setup(state: &BattleState) -> Result<(), SetupError> {
    if state.phase != Phase::Setup {
        return Err(SetupError::AlreadyStarted { phase: state.phase });
    }
    Ok(())
}

fn reset_match(state: &mut BattleState, env: &mut BattleEnv<'_>) {
    let max_health = env.config().max_health;
    state.combatants = [
        Combatant::new(Side::First, max_health),
        Combatant::new(Side::Second, max_health),
    ];
    state.phase = Phase::Setup;
    state.current_turn = None;
    state.winner = None;
    state.generation += 1;
    env.emit(BattleEvent::MatchReset {
        generation: state.generation,
    });
}
