//! Client-side view of a session.
//!
//! `ClientView` is what a well-behaved client does with `initGameState` and
//! `updateGameState`: replace on a full update, merge by field presence on
//! a delta, and refuse anything out of order.

use super::delta::StateDelta;
use super::synchronizer::FullUpdate;
use crate::core::GameState;
use crate::error::SyncError;

/// A client's replica of the authoritative state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientView {
    state: Option<GameState>,
    version: u64,
}

impl ClientView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The replica, once a full update has arrived.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Version of the last update applied.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the whole view.
    pub fn apply_full(&mut self, update: &FullUpdate) {
        self.state = Some(update.state.clone());
        self.version = update.version;
    }

    /// Merge a delta. It must be the very next version.
    pub fn apply_delta(&mut self, delta: &StateDelta) -> Result<(), SyncError> {
        let state = self.state.as_mut().ok_or(SyncError::NoBaseline)?;
        let expected = self.version + 1;
        if delta.version != expected {
            return Err(SyncError::OutOfOrder {
                expected,
                got: delta.version,
            });
        }
        delta.apply(state);
        self.version = delta.version;
        Ok(())
    }
}
