//! Room index.
//!
//! The lobby is the only state shared between rooms: a map from room code
//! to the handle of its running task. Joining an unknown code opens a room.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::connection::Connection;
use super::room::{Command, Room, RoomHandle};
use crate::core::SessionConfig;
use crate::error::SessionError;

#[derive(Debug, Default)]
pub(crate) struct Registry {
    rooms: FxHashMap<String, RoomHandle>,
    next_id: u64,
}

impl Registry {
    /// Drop the entry for `code`, unless a newer room already took the code.
    pub(crate) fn remove(&mut self, code: &str, id: u64) {
        if self.rooms.get(code).is_some_and(|handle| handle.id == id) {
            self.rooms.remove(code);
        }
    }
}

/// Entry point for clients.
///
/// Cheap to clone; every clone sees the same rooms.
///
/// ```no_run
/// # async fn run() -> Result<(), crazy_eights::error::SessionError> {
/// use crazy_eights::core::SessionConfig;
/// use crazy_eights::session::Lobby;
///
/// let lobby = Lobby::new(SessionConfig::from_env());
/// let mut alice = lobby.join("ROOM1").await?;
/// let mut bob = lobby.join("ROOM1").await?;
/// while let Some(msg) = alice.recv().await {
///     println!("{}", msg.to_json().unwrap_or_default());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Lobby {
    registry: Arc<Mutex<Registry>>,
    config: SessionConfig,
}

impl Lobby {
    /// Rooms opened by this lobby use `config`.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            registry: Arc::default(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Take a seat in `room`, opening it if needed.
    ///
    /// Must be called from within a tokio runtime. Fails with `RoomFull`
    /// when both seats are taken. A room that closes while the join is
    /// queued is replaced by a fresh one under the same code.
    pub async fn join(&self, room: &str) -> Result<Connection, SessionError> {
        let handle = self.room_handle(room);
        match self.join_handle(room, handle.clone()).await {
            Err(SessionError::RoomClosed(_)) => {
                debug!(room, "room closed under a queued join, reopening");
                self.registry.lock().remove(room, handle.id);
                self.join_handle(room, self.room_handle(room)).await
            }
            result => result,
        }
    }

    async fn join_handle(&self, room: &str, handle: RoomHandle) -> Result<Connection, SessionError> {
        let (outbound, inbound) = mpsc::unbounded_channel();
        let (reply, admitted) = oneshot::channel();

        handle
            .commands
            .send(Command::Join { outbound, reply })
            .await
            .map_err(|_| SessionError::RoomClosed(room.to_string()))?;
        let admission = admitted
            .await
            .map_err(|_| SessionError::RoomClosed(room.to_string()))??;

        debug!(room, seat = %admission.seat, "connection admitted");
        Ok(Connection::new(
            room.to_string(),
            admission.seat,
            admission.token,
            handle,
            inbound,
        ))
    }

    /// Is a room with this code running?
    #[must_use]
    pub fn contains(&self, room: &str) -> bool {
        self.registry.lock().rooms.contains_key(room)
    }

    /// Number of running rooms.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.registry.lock().rooms.len()
    }

    fn room_handle(&self, room: &str) -> RoomHandle {
        let mut registry = self.registry.lock();
        if let Some(handle) = registry.rooms.get(room) {
            return handle.clone();
        }

        registry.next_id += 1;
        let handle = Room::spawn(
            registry.next_id,
            room.to_string(),
            self.config.clone(),
            Arc::clone(&self.registry),
        );
        registry.rooms.insert(room.to_string(), handle.clone());
        handle
    }
}
