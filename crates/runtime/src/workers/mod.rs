//! Worker tasks that back the runtime orchestration.
//!
//! The match worker owns the authoritative state and executes commands; the
//! opponent scheduler owns the single pending deferred turn.

mod match_worker;
mod scheduler;

pub use match_worker::{Command, MatchWorker};
pub(crate) use scheduler::OpponentScheduler;
