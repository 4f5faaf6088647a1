//! Headless arena client.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ Runtime (authoritative match state, automated opponent)
//!   ├─→ Players (action providers for the sides the client drives)
//!   └─→ Narrator (prints Battle topic events)
//! ```
//!
//! The client only talks to the match through [`RuntimeHandle`]; in automated
//! mode it drives FIRST and leaves SECOND to the runtime.

pub mod config;
pub mod logging;

pub use config::ClientConfig;

use anyhow::{Result, bail};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use arena_core::{AvatarId, BattleEvent, Side};
use arena_runtime::{ActionProvider, AlwaysAttackProvider, Event, Runtime, RuntimeHandle, Topic};

/// How a finished match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchSummary {
    pub winner: Side,
    pub generation: u64,
    /// Attacks and heals resolved during the match.
    pub turns: u32,
}

/// Top-level client container.
pub struct Client {
    runtime: Runtime,
    first_avatar: AvatarId,
    second_avatar: Option<AvatarId>,
    first: Box<dyn ActionProvider>,
    second: Box<dyn ActionProvider>,
}

impl Client {
    /// Build the runtime described by `config` and seat always-attack players.
    pub async fn from_config(config: &ClientConfig) -> Result<Self> {
        let runtime = Runtime::builder()
            .config(config.runtime.clone())
            .build()
            .await?;

        Ok(Self::new(runtime, config.first_avatar(), config.second_avatar()))
    }

    /// Both seats the client drives are filled by [`AlwaysAttackProvider`];
    /// SECOND's seat is only consulted in local mode.
    pub fn new(runtime: Runtime, first_avatar: AvatarId, second_avatar: Option<AvatarId>) -> Self {
        Self {
            runtime,
            first_avatar,
            second_avatar,
            first: Box::new(AlwaysAttackProvider),
            second: Box::new(AlwaysAttackProvider),
        }
    }

    /// Play one match to the end, then shut the runtime down.
    pub async fn run(self) -> Result<MatchSummary> {
        let handle = self.runtime.handle();
        let narrator = tokio::spawn(narrate(handle.subscribe(Topic::Battle)));

        let result = self.play_match(&handle).await;

        narrator.abort();
        let _ = narrator.await;
        self.runtime.shutdown().await?;

        result
    }

    async fn play_match(&self, handle: &RuntimeHandle) -> Result<MatchSummary> {
        let mut battle = handle.subscribe(Topic::Battle);

        handle.select_avatar(Side::First, self.first_avatar).await?;
        if let Some(avatar) = self.second_avatar {
            handle.select_avatar(Side::Second, avatar).await?;
        }
        let started = handle.start().await?;
        info!(
            first_turn = %started.first_turn,
            generation = started.generation,
            "Match started"
        );

        let mut turns = 0;
        loop {
            let state = handle.query_state().await?;
            if let Some(winner) = state.winner {
                return Ok(MatchSummary {
                    winner,
                    generation: state.generation,
                    turns,
                });
            }
            let Some(side) = state.current_turn else {
                bail!("match left play without a winner (phase {})", state.phase);
            };

            if state.awaits_automated_opponent() {
                wait_for_action_by(&mut battle, side).await?;
            } else {
                let provider = match side {
                    Side::First => &self.first,
                    Side::Second => &self.second,
                };
                let action = provider.provide_action(side, &state).await?;
                debug!(%side, action = action.as_str(), "Submitting action");
                handle.execute(action).await?;
            }
            turns += 1;
        }
    }
}

/// Waits until `side` resolves an attack or heal.
async fn wait_for_action_by(rx: &mut broadcast::Receiver<Event>, side: Side) -> Result<()> {
    loop {
        match rx.recv().await {
            Ok(Event::Battle(notice)) => match notice.event {
                BattleEvent::AttackResolved { attacker, .. } if attacker == side => return Ok(()),
                BattleEvent::HealResolved { side: healer, .. } if healer == side => return Ok(()),
                _ => {}
            },
            Ok(Event::Turn(_)) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Battle events lagged while waiting for the opponent");
            }
            Err(broadcast::error::RecvError::Closed) => bail!("runtime stopped mid-match"),
        }
    }
}

async fn narrate(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(Event::Battle(notice)) => println!("{}", describe(&notice.event)),
            Ok(Event::Turn(_)) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Narrator lagged behind battle events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// One line of match commentary.
pub fn describe(event: &BattleEvent) -> String {
    match event {
        BattleEvent::AvatarSelected { side, avatar } => format!("{side} picks {avatar}"),
        BattleEvent::AvatarAutoAssigned { side, avatar } => {
            format!("{side} is assigned {avatar}")
        }
        BattleEvent::MatchStarted {
            first_turn,
            generation,
        } => format!("Match {generation} begins, {first_turn} moves first"),
        BattleEvent::AttackResolved {
            attacker,
            defender,
            damage,
            defender_health,
        } => format!("{attacker} hits {defender} for {damage} ({defender_health} HP left)"),
        BattleEvent::HealResolved {
            side,
            amount_applied,
            health,
        } => format!("{side} heals {amount_applied} ({health} HP)"),
        BattleEvent::Victory { winner } => format!("{winner} wins!"),
        BattleEvent::MatchReset { generation } => format!("Arena reset (match {generation})"),
        BattleEvent::ModeChanged { mode } => format!("Opponent mode set to {mode}"),
    }
}
