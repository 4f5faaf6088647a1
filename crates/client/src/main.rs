//! Arena client binary.
//!
//! Plays one headless match using the configuration from the environment
//! (and `.env`, when present), printing commentary to stdout.
//!
//! # Examples
//!
//! ```bash
//! # Two local always-attack players
//! cargo run -p arena-client
//!
//! # FIRST against the automated opponent, reproducible
//! ARENA_MODE=automated ARENA_SEED=7 cargo run -p arena-client
//! ```

use anyhow::Result;
use arena_client::{Client, ClientConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.session_id.as_deref(), config.log_to_file)?;

    tracing::info!(
        mode = %config.runtime.mode,
        seed = ?config.runtime.seed,
        "Starting arena client"
    );

    let summary = Client::from_config(&config).await?.run().await?;

    tracing::info!(
        winner = %summary.winner,
        turns = summary.turns,
        "Match finished"
    );
    Ok(())
}
