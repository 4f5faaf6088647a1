//! The battle state machine.
//!
//! [`BattleEngine`] is the authoritative reducer for [`BattleState`]. Every
//! operation runs through the same pipeline: validate against the untouched
//! state, apply, and record the emitted events. A rejected operation leaves
//! the state and the event buffer exactly as they were.

mod errors;

pub use errors::BattleError;

use crate::action::{
    Action, ActionResult, ActionTransition, AttackAction, AttackOutcome, HealAction, HealOutcome,
    MatchStarted, ResetAction, SelectAvatarAction, SetModeAction, SetupError, StartAction,
    TurnError,
};
use crate::config::{ArenaConfig, OpponentMode};
use crate::env::{AvatarId, BattleEnv, RandomSource};
use crate::event::BattleEvent;
use crate::state::{BattleState, Side};

/// Drives one [`BattleState`] with a rule set and a random source.
///
/// The engine borrows everything it touches, so it is cheap to build per
/// operation. Events accumulate until taken with [`BattleEngine::into_events`].
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
    config: &'a ArenaConfig,
    rng: &'a mut dyn RandomSource,
    events: Vec<BattleEvent>,
}

impl<'a> BattleEngine<'a> {
    pub fn new(
        state: &'a mut BattleState,
        config: &'a ArenaConfig,
        rng: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            state,
            config,
            rng,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    pub fn select_avatar(&mut self, side: Side, avatar: AvatarId) -> Result<(), SetupError> {
        self.drive(&SelectAvatarAction::new(side, avatar))
    }

    pub fn start(&mut self) -> Result<MatchStarted, SetupError> {
        self.drive(&StartAction)
    }

    pub fn attack(&mut self, side: Side) -> Result<AttackOutcome, TurnError> {
        self.drive(&AttackAction::new(side))
    }

    pub fn heal(&mut self, side: Side) -> Result<HealOutcome, TurnError> {
        self.drive(&HealAction::new(side))
    }

    pub fn reset(&mut self) {
        match self.drive(&ResetAction) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    pub fn set_mode(&mut self, mode: OpponentMode) {
        match self.drive(&SetModeAction::new(mode)) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Routes an [`Action`] value to its transition.
    pub fn execute(&mut self, action: &Action) -> Result<ActionResult, BattleError> {
        let result = match action {
            Action::SelectAvatar(transition) => {
                self.drive(transition).map(|()| ActionResult::AvatarSelected)?
            }
            Action::Start(transition) => self.drive(transition).map(ActionResult::Started)?,
            Action::Attack(transition) => self.drive(transition).map(ActionResult::Attack)?,
            Action::Heal(transition) => self.drive(transition).map(ActionResult::Heal)?,
            Action::Reset(transition) => self.drive(transition).map(|()| ActionResult::Reset)?,
            Action::SetMode(transition) => {
                self.drive(transition).map(|()| ActionResult::ModeChanged)?
            }
        };
        Ok(result)
    }

    /// Events emitted so far, oldest first.
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    fn drive<T>(&mut self, transition: &T) -> Result<T::Outcome, T::Error>
    where
        T: ActionTransition,
    {
        let before = self.state.clone();
        let mark = self.events.len();

        let outcome = {
            let mut env = BattleEnv::new(self.config, &mut *self.rng, &mut self.events);
            match transition.pre_validate(self.state, &env) {
                Ok(()) => transition.apply(self.state, &mut env),
                Err(error) => Err(error),
            }
        };

        match outcome {
            Ok(outcome) => {
                self.state.nonce += 1;
                debug_assert!(
                    self.state.is_consistent(self.config),
                    "battle state invariants violated: {:?}",
                    self.state
                );
                Ok(outcome)
            }
            Err(error) => {
                *self.state = before;
                self.events.truncate(mark);
                Err(error)
            }
        }
    }
}
