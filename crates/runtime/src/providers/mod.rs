//! Action provider implementations for sides the runtime drives itself.

mod opponent;

pub use opponent::AutomatedOpponentProvider;
