//! Deferred, cancellable automated-opponent turns.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use super::Command;

struct Pending {
    generation: u64,
    nonce: u64,
    task: JoinHandle<()>,
}

/// Holds at most one pending opponent turn.
///
/// The spawned task sleeps for the think delay and then posts
/// [`Command::OpponentTurn`] back to the worker. It only keeps a weak sender,
/// so a pending turn never keeps the command channel alive on its own.
pub(crate) struct OpponentScheduler {
    delay: Duration,
    command_tx: mpsc::WeakSender<Command>,
    pending: Option<Pending>,
}

impl OpponentScheduler {
    pub(crate) fn new(delay: Duration, command_tx: mpsc::WeakSender<Command>) -> Self {
        Self {
            delay,
            command_tx,
            pending: None,
        }
    }

    /// Schedule the opponent's turn for the state identified by `generation`
    /// and `nonce`, replacing any pending one.
    pub(crate) fn schedule(&mut self, generation: u64, nonce: u64) {
        self.cancel();

        let delay = self.delay;
        let command_tx = self.command_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(command_tx) = command_tx.upgrade() else {
                return;
            };
            if command_tx
                .send(Command::OpponentTurn { generation, nonce })
                .await
                .is_err()
            {
                trace!(generation, "worker gone before opponent turn fired");
            }
        });

        debug!(
            generation,
            nonce,
            delay_ms = delay.as_millis() as u64,
            "opponent turn scheduled"
        );
        self.pending = Some(Pending {
            generation,
            nonce,
            task,
        });
    }

    /// Abort the pending turn, if any. Returns whether one was pending.
    pub(crate) fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.task.abort();
                debug!(generation = pending.generation, "pending opponent turn cancelled");
                true
            }
            None => false,
        }
    }

    /// Forget the pending turn once it has fired.
    pub(crate) fn complete(&mut self, generation: u64, nonce: u64) {
        if self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.generation == generation && pending.nonce == nonce)
        {
            self.pending = None;
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for OpponentScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
