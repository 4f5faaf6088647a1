//! High-level runtime orchestrator.
//!
//! The runtime owns the match worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a match.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use arena_core::{ArenaConfig, BattleState, OpponentMode, PcgRng, RandomSource};

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::providers::AutomatedOpponentProvider;
use crate::workers::{Command, MatchWorker, OpponentScheduler};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub arena: ArenaConfig,
    /// Mode the first match starts in.
    pub mode: OpponentMode,
    /// Pause before the automated opponent acts on its turn.
    pub think_delay: Duration,
    /// Seed for battle and opponent randomness; random when unset.
    pub seed: Option<u64>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(700);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            mode: OpponentMode::default(),
            think_delay: Self::DEFAULT_THINK_DELAY,
            seed: None,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that hosts one arena.
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Any pending automated opponent turn is cancelled. Outstanding handles
    /// start failing with [`RuntimeError::CommandChannelClosed`].
    pub async fn shutdown(self) -> Result<()> {
        // A closed channel means the worker already stopped on its own.
        let _ = self.handle.send(Command::Shutdown).await;
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    rng: Option<Box<dyn RandomSource>>,
    opponent: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            rng: None,
            opponent: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn mode(mut self, mode: OpponentMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn think_delay(mut self, delay: Duration) -> Self {
        self.config.think_delay = delay;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Replace the battle random source (damage, first turn, auto-assigned
    /// avatar). Takes precedence over the configured seed.
    pub fn rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Replace the provider that plays SECOND in automated mode.
    pub fn opponent_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.opponent = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let config = self.config;
        let seed = config.seed.unwrap_or_else(rand::random);

        let rng = self
            .rng
            .unwrap_or_else(|| Box::new(PcgRng::seed_from(seed)));
        let opponent = self.opponent.unwrap_or_else(|| {
            Box::new(AutomatedOpponentProvider::from_config(
                &config.arena,
                seed.wrapping_add(1),
            ))
        });

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let scheduler = OpponentScheduler::new(config.think_delay, command_tx.downgrade());

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let state = BattleState::new(config.mode, &config.arena);
        info!(
            mode = %config.mode,
            seed,
            think_delay_ms = config.think_delay.as_millis() as u64,
            "arena runtime starting"
        );

        let worker = MatchWorker::new(
            state,
            config.arena,
            rng,
            opponent,
            scheduler,
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
