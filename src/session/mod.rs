//! Rooms, connections and the wire protocol.
//!
//! ## Architecture
//!
//! ```text
//! Connection ──command──▶ room task (owns Synchronizer) ──ServerMessage──▶ Connection
//!                              ▲
//!                    Lobby (room code → handle)
//! ```
//!
//! Each room is a single tokio task, so its game state has exactly one
//! writer. The lobby's index is the only state shared across rooms.

pub mod connection;
pub mod lobby;
pub mod protocol;
mod room;

pub use connection::Connection;
pub use lobby::Lobby;
pub use protocol::{ChatEntry, ClientMessage, RosterEntry, ServerMessage, WILD_TIMEOUT_REASON};
