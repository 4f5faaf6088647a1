//! Match worker that owns the authoritative [`arena_core::BattleState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], executes actions via
//! [`arena_core::BattleEngine`], publishes events to the EventBus, and plays
//! the automated opponent's turns when the scheduler fires.

use std::ops::ControlFlow;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use arena_core::{
    Action, ActionResult, ArenaConfig, BattleEngine, BattleEvent, BattleState, GameError,
    RandomSource, Side,
};

use super::OpponentScheduler;
use crate::api::{ActionProvider, Result};
use crate::events::{Event, EventBus, MatchEvent, TurnEvent};

/// Commands that can be sent to the match worker
pub enum Command {
    /// Execute a battle action and reply with its outcome.
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<ActionResult>>,
    },
    /// Query the current battle state (read-only).
    QueryState { reply: oneshot::Sender<BattleState> },
    /// Deferred automated-opponent turn, posted by the scheduler. Only valid
    /// while the state still has this generation and nonce.
    OpponentTurn { generation: u64, nonce: u64 },
    /// Stop the worker loop.
    Shutdown,
}

/// Background task that processes battle commands.
pub struct MatchWorker {
    state: BattleState,
    config: ArenaConfig,
    rng: Box<dyn RandomSource>,
    opponent: Box<dyn ActionProvider>,
    scheduler: OpponentScheduler,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl MatchWorker {
    pub(crate) fn new(
        state: BattleState,
        config: ArenaConfig,
        rng: Box<dyn RandomSource>,
        opponent: Box<dyn ActionProvider>,
        scheduler: OpponentScheduler,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            state,
            config,
            rng,
            opponent,
            scheduler,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        info!(mode = %self.state.mode, "match worker started");

        while let Some(cmd) = self.command_rx.recv().await {
            if self.handle_command(cmd).await.is_break() {
                break;
            }
        }

        self.scheduler.cancel();
        info!(
            generation = self.state.generation,
            nonce = self.state.nonce,
            "match worker stopped"
        );
    }

    async fn handle_command(&mut self, cmd: Command) -> ControlFlow<()> {
        match cmd {
            Command::Execute { action, reply } => {
                let result = self.execute(&action);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::OpponentTurn { generation, nonce } => {
                self.play_opponent_turn(generation, nonce).await;
            }
            Command::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn execute(&mut self, action: &Action) -> Result<ActionResult> {
        let mut engine = BattleEngine::new(&mut self.state, &self.config, self.rng.as_mut());
        let result = engine.execute(action);
        let events = engine.into_events();

        match result {
            Ok(outcome) => {
                self.after_transition(events);
                Ok(outcome)
            }
            Err(error) => {
                debug!(
                    target: "runtime::worker",
                    action = action.as_str(),
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    phase = %self.state.phase,
                    nonce = self.state.nonce,
                    error = %error,
                    "Action rejected"
                );
                Err(error.into())
            }
        }
    }

    /// Publishes the transition's events and re-arms the opponent scheduler.
    ///
    /// Any committed transition invalidates a pending opponent turn, so the
    /// old one is always cancelled before deciding whether to schedule anew.
    fn after_transition(&mut self, events: Vec<BattleEvent>) {
        self.scheduler.cancel();

        for event in events {
            log_event(&event);
            self.event_bus.publish(Event::Battle(MatchEvent {
                generation: self.state.generation,
                nonce: self.state.nonce,
                event,
            }));
        }

        let Some(side) = self.state.current_turn else {
            return;
        };
        let automated = self.state.awaits_automated_opponent();
        self.event_bus.publish(Event::Turn(TurnEvent {
            side,
            generation: self.state.generation,
            automated,
        }));

        if automated {
            self.scheduler
                .schedule(self.state.generation, self.state.nonce);
        }
    }

    async fn play_opponent_turn(&mut self, generation: u64, nonce: u64) {
        self.scheduler.complete(generation, nonce);

        let current = (self.state.generation, self.state.nonce);
        if current != (generation, nonce) || !self.state.awaits_automated_opponent() {
            debug!(
                generation,
                nonce,
                current_generation = current.0,
                current_nonce = current.1,
                "Discarding stale opponent turn"
            );
            return;
        }

        let snapshot = self.state.clone();
        let action = match self.opponent.provide_action(Side::Second, &snapshot).await {
            Ok(action) => action,
            Err(error) => {
                warn!(generation, error = %error, "Opponent provider failed, attacking instead");
                self.play_fallback_attack(generation);
                return;
            }
        };

        if let Err(error) = self.execute(&action) {
            warn!(
                generation,
                action = action.as_str(),
                error = %error,
                "Opponent action rejected, attacking instead"
            );
            self.play_fallback_attack(generation);
        }
    }

    /// Attacking is legal whenever SECOND holds the turn, so the match never
    /// stalls on a provider that fails or picks an illegal action.
    fn play_fallback_attack(&mut self, generation: u64) {
        if let Err(error) = self.execute(&Action::attack(Side::Second)) {
            warn!(generation, error = %error, "Opponent fallback attack rejected");
        }
    }
}
