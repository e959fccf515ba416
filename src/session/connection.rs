//! One client's seat in a room.
//!
//! A `Connection` exists from a successful join until it is dropped or
//! disconnected; dropping it frees the seat. It holds no game state of its
//! own, only the channels to and from its room.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::protocol::{ClientMessage, ServerMessage};
use super::room::{Command, Leave, RoomHandle};
use crate::core::Player;
use crate::error::SessionError;

/// A joined client.
#[derive(Debug)]
pub struct Connection {
    room: String,
    seat: Player,
    token: u64,
    commands: mpsc::Sender<Command>,
    leaves: mpsc::UnboundedSender<Leave>,
    inbound: mpsc::UnboundedReceiver<ServerMessage>,
}

impl Connection {
    pub(crate) fn new(
        room: String,
        seat: Player,
        token: u64,
        handle: RoomHandle,
        inbound: mpsc::UnboundedReceiver<ServerMessage>,
    ) -> Self {
        Self {
            room,
            seat,
            token,
            commands: handle.commands,
            leaves: handle.leaves,
            inbound,
        }
    }

    /// The Player this connection controls.
    #[must_use]
    pub fn player(&self) -> Player {
        self.seat
    }

    #[must_use]
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Forward a message to the room.
    pub async fn send(&self, message: ClientMessage) -> Result<(), SessionError> {
        self.commands
            .send(Command::Client {
                seat: self.seat,
                token: self.token,
                message,
            })
            .await
            .map_err(|_| SessionError::RoomClosed(self.room.clone()))
    }

    /// Decode a raw JSON frame and forward it. Undecodable frames are
    /// logged and dropped.
    pub async fn send_text(&self, raw: &str) -> Result<(), SessionError> {
        match ClientMessage::from_json(raw) {
            Ok(message) => self.send(message).await,
            Err(err) => {
                warn!(%err, seat = %self.seat, "invalid inbound message");
                Ok(())
            }
        }
    }

    /// Next message from the room. `None` once the room has closed.
    pub async fn recv(&mut self) -> Option<ServerMessage> {
        self.inbound.recv().await
    }

    /// A message already waiting, if any.
    pub fn try_recv(&mut self) -> Option<ServerMessage> {
        self.inbound.try_recv().ok()
    }

    /// Leave the room and wait until the request is queued.
    pub async fn disconnect(self) {
        let _ = self.send(ClientMessage::Disconnect).await;
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        let leave = Leave {
            seat: self.seat,
            token: self.token,
        };
        if self.leaves.send(leave).is_err() {
            debug!(room = %self.room, "room already closed");
        }
    }
}
