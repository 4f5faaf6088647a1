//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for each
//! battle operation, state snapshots, and topic subscriptions.
use tokio::sync::{broadcast, mpsc, oneshot};

use arena_core::{
    Action, ActionResult, AttackOutcome, AvatarId, BattleState, HealOutcome, MatchStarted,
    OpponentMode, Side,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the running match
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Execute any battle action against the authoritative state.
    ///
    /// Rejections come back as [`RuntimeError::Battle`] and leave the state
    /// untouched.
    pub async fn execute(&self, action: Action) -> Result<ActionResult> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Execute {
                action,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    pub async fn select_avatar(&self, side: Side, avatar: AvatarId) -> Result<()> {
        match self.execute(Action::select_avatar(side, avatar)).await? {
            ActionResult::AvatarSelected => Ok(()),
            _ => Err(RuntimeError::UnexpectedResult {
                action: "select_avatar",
            }),
        }
    }

    pub async fn start(&self) -> Result<MatchStarted> {
        match self.execute(Action::start()).await? {
            ActionResult::Started(started) => Ok(started),
            _ => Err(RuntimeError::UnexpectedResult { action: "start" }),
        }
    }

    pub async fn attack(&self, side: Side) -> Result<AttackOutcome> {
        match self.execute(Action::attack(side)).await? {
            ActionResult::Attack(outcome) => Ok(outcome),
            _ => Err(RuntimeError::UnexpectedResult { action: "attack" }),
        }
    }

    pub async fn heal(&self, side: Side) -> Result<HealOutcome> {
        match self.execute(Action::heal(side)).await? {
            ActionResult::Heal(outcome) => Ok(outcome),
            _ => Err(RuntimeError::UnexpectedResult { action: "heal" }),
        }
    }

    /// Discard the current match and return to setup. Any pending automated
    /// opponent turn is cancelled.
    pub async fn reset(&self) -> Result<()> {
        match self.execute(Action::reset()).await? {
            ActionResult::Reset => Ok(()),
            _ => Err(RuntimeError::UnexpectedResult { action: "reset" }),
        }
    }

    /// Switch who drives SECOND. Resets the match as a side effect.
    pub async fn set_mode(&self, mode: OpponentMode) -> Result<()> {
        match self.execute(Action::set_mode(mode)).await? {
            ActionResult::ModeChanged => Ok(()),
            _ => Err(RuntimeError::UnexpectedResult { action: "set_mode" }),
        }
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Battle` - Every engine event with the match it belongs to
    /// - `Topic::Turn` - Whose turn it is after each transition
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use arena_runtime::Topic;
    ///
    /// let mut turns = handle.subscribe(Topic::Turn);
    /// while let Ok(event) = turns.recv().await {
    ///     // Prompt whoever holds the turn
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Query the current battle state (read-only snapshot)
    pub async fn query_state(&self) -> Result<BattleState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
