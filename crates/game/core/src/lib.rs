//! Deterministic rules for a two-combatant, turn-based arena battle.
//!
//! `arena-core` defines the canonical state machine (avatar setup, start,
//! attack, heal, reset), the damage and heal rules, and the automated
//! opponent's decision policy. Everything here is synchronous and free of
//! I/O; randomness is injected through [`RandomSource`] so matches replay
//! exactly. All state mutation flows through [`engine::BattleEngine`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod opponent;
pub mod rules;
pub mod state;

pub use action::{
    Action, ActionResult, ActionTransition, AttackAction, AttackOutcome, HealAction, HealOutcome,
    MatchStarted, ResetAction, SelectAvatarAction, SetModeAction, SetupError, StartAction,
    TurnError,
};
pub use config::{ArenaConfig, OpponentMode};
pub use engine::{BattleEngine, BattleError};
pub use env::{AVATARS, AvatarId, BattleEnv, PcgRng, RandomSource, ScriptedRng};
pub use error::{ErrorSeverity, GameError};
pub use event::BattleEvent;
pub use opponent::{AutomatedOpponentPolicy, OpponentDecision};
pub use rules::{DamageRule, HealResult, HealRule};
pub use state::{BattleState, Combatant, Phase, Side};
