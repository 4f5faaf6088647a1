//! Async runtime hosting a live arena match.
//!
//! This crate wraps the synchronous `arena-core` engine in a worker task,
//! schedules the automated opponent's deferred turns, and fans events out to
//! observers. Consumers embed [`Runtime`] and talk to the match through the
//! cloneable [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`providers`] holds the automated opponent's action provider
//! - `workers` keeps the match worker and opponent scheduler internal
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{ActionProvider, AlwaysAttackProvider, Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, MatchEvent, Topic, TurnEvent};
pub use providers::AutomatedOpponentProvider;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
