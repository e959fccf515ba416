//! Session configuration.
//!
//! Rooms are configured once at creation. Every knob has a default, so
//! `SessionConfig::default()` is a complete, playable configuration.
//!
//! ```
//! use std::time::Duration;
//! use crazy_eights::core::SessionConfig;
//!
//! let config = SessionConfig::default()
//!     .with_seed(7)
//!     .with_wild_timeout(Duration::from_secs(10));
//!
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.command_buffer, 64);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};

use super::rng::GameRng;

/// Default time a player has to declare a suit after a wild card.
pub const DEFAULT_WILD_TIMEOUT: Duration = Duration::from_secs(30);

/// Default depth of a room's inbound command queue.
pub const DEFAULT_COMMAND_BUFFER: usize = 64;

/// Configuration for one room.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Seed for the deal and reshuffles. `None` draws one from the OS.
    pub seed: Option<u64>,

    /// How long a pending wild declaration may stay open before the
    /// session is closed. Serialized as milliseconds.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "wildTimeoutMs")]
    pub wild_timeout: Duration,

    /// Capacity of the room's inbound command channel.
    pub command_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            wild_timeout: DEFAULT_WILD_TIMEOUT,
            command_buffer: DEFAULT_COMMAND_BUFFER,
        }
    }
}

impl SessionConfig {
    /// Read overrides from `EIGHTS_SEED`, `EIGHTS_WILD_TIMEOUT_MS` and
    /// `EIGHTS_COMMAND_BUFFER`. Missing or unparseable values fall back to
    /// the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            seed: read_env::<u64>("EIGHTS_SEED"),
            wild_timeout: read_env::<u64>("EIGHTS_WILD_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.wild_timeout),
            command_buffer: read_env::<usize>("EIGHTS_COMMAND_BUFFER")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.command_buffer),
        }
    }

    /// Fix the seed (deterministic deals).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the wild declaration deadline.
    #[must_use]
    pub fn with_wild_timeout(mut self, timeout: Duration) -> Self {
        self.wild_timeout = timeout;
        self
    }

    /// Set the command channel capacity (minimum 1).
    #[must_use]
    pub fn with_command_buffer(mut self, capacity: usize) -> Self {
        self.command_buffer = capacity.max(1);
        self
    }

    /// Build the RNG this configuration asks for.
    #[must_use]
    pub fn rng(&self) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        }
    }
}

fn read_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|raw| raw.trim().parse().ok())
}
