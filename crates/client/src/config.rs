//! Client configuration structures and loaders.
use std::env;
use std::time::Duration;

use arena_core::{AvatarId, OpponentMode};
use arena_runtime::RuntimeConfig;

/// Configuration required to bootstrap the runtime and play a match.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    pub first_avatar: Option<AvatarId>,
    pub second_avatar: Option<AvatarId>,
    pub log_to_file: bool,
    pub session_id: Option<String>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_MODE` - `local` or `automated` (default: local)
    /// - `ARENA_THINK_DELAY_MS` - Automated opponent delay (default: 700)
    /// - `ARENA_SEED` - Seed for all match randomness (default: random)
    /// - `ARENA_FIRST_AVATAR` - Roster index or glyph for FIRST
    /// - `ARENA_SECOND_AVATAR` - Roster index or glyph for SECOND
    /// - `ARENA_LOG_TO_FILE` - Also write logs to the session directory
    /// - `ARENA_SESSION_ID` - Session identifier for log files (default: auto-generated)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable source.
    /// Unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(mode) = read_var::<OpponentMode>(&lookup, "ARENA_MODE") {
            config.runtime.mode = mode;
        }

        if let Some(millis) = read_var::<u64>(&lookup, "ARENA_THINK_DELAY_MS") {
            config.runtime.think_delay = Duration::from_millis(millis);
        }

        config.runtime.seed = read_var::<u64>(&lookup, "ARENA_SEED");
        config.first_avatar = lookup("ARENA_FIRST_AVATAR").and_then(|raw| parse_avatar(&raw));
        config.second_avatar = lookup("ARENA_SECOND_AVATAR").and_then(|raw| parse_avatar(&raw));

        if let Some(enable) = read_var::<bool>(&lookup, "ARENA_LOG_TO_FILE") {
            config.log_to_file = enable;
        } else if lookup("ARENA_LOG_TO_FILE").is_some() {
            // Also accept just setting the variable without value as "true"
            config.log_to_file = true;
        }

        config.session_id = lookup("ARENA_SESSION_ID").filter(|id| !id.trim().is_empty());

        config
    }

    /// FIRST's avatar, defaulting to the head of the roster.
    pub fn first_avatar(&self) -> AvatarId {
        self.first_avatar.unwrap_or(AvatarId(0))
    }

    /// SECOND's avatar. Local matches need one, so they get the roster entry
    /// after FIRST's; automated matches leave it to start-time assignment.
    pub fn second_avatar(&self) -> Option<AvatarId> {
        match (self.second_avatar, self.runtime.mode) {
            (Some(avatar), _) => Some(avatar),
            (None, OpponentMode::Local) => {
                let next = (usize::from(self.first_avatar().0) + 1) % AvatarId::COUNT;
                Some(AvatarId(next as u8))
            }
            (None, OpponentMode::Automated) => None,
        }
    }
}

/// Accepts either a roster index or the avatar glyph itself.
fn parse_avatar(raw: &str) -> Option<AvatarId> {
    let raw = raw.trim();
    match raw.parse::<u8>() {
        Ok(index) => Some(AvatarId(index)).filter(|avatar| avatar.is_valid()),
        Err(_) => AvatarId::from_glyph(raw),
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
