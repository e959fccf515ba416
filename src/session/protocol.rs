//! Wire messages.
//!
//! JSON objects tagged by `type`, camelCase names throughout.
//!
//! ```
//! use crazy_eights::session::ClientMessage;
//!
//! let msg = ClientMessage::from_json(r#"{"type":"playCard","card":"8S","suit":"hearts"}"#).unwrap();
//! assert!(matches!(msg, ClientMessage::PlayCard { .. }));
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::Player;
use crate::error::{MoveError, SessionError};
use crate::rules::DrawOutcome;
use crate::sync::{FullUpdate, StateDelta};

/// Reason sent when a pending wild declaration runs out of time.
pub const WILD_TIMEOUT_REASON: &str = "wildDeclarationTimeout";

/// Client → session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Enter a room. Only meaningful before a connection exists; see
    /// [`Lobby::join`](super::Lobby::join).
    Join { room: String },

    /// Play a card. `suit` may name the declaration for an Eight up front.
    PlayCard {
        card: Card,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suit: Option<String>,
    },

    DrawCard,

    /// Complete a pending wild card. Free text, parsed by the session.
    DeclareSuit { suit: String },

    /// Chat.
    SendMessage { text: String },

    Disconnect,
}

impl ClientMessage {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// One occupied seat, as listed in `roomData`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: Player,
    pub room: String,
}

/// A chat line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub user: Player,
    pub text: String,
}

/// Session → client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Replace the whole view.
    InitGameState(FullUpdate),

    /// Merge by field presence.
    UpdateGameState(StateDelta),

    RoomData { users: Vec<RosterEntry> },

    /// Which Player this connection controls.
    CurrentUserData { name: Player },

    Message(ChatEntry),

    /// The recipient must declare a suit for `card`.
    ChooseSuit { card: Card, drawn: bool },

    /// What the recipient's Draw did.
    DrawResult {
        card: Card,
        #[serde(rename = "autoPlayed")]
        auto_played: bool,
        notice: String,
    },

    /// A Move or declaration the session refused. Sent to the actor only.
    Rejected { code: String, message: String },

    /// A connection-level failure such as a full room.
    Error { code: String, message: String },

    /// The session ended; no further messages follow.
    SessionClosed { reason: String },
}

impl ServerMessage {
    #[must_use]
    pub fn rejected(err: &MoveError) -> Self {
        Self::Rejected {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }

    #[must_use]
    pub fn error(err: &SessionError) -> Self {
        Self::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }

    /// Tell the drawing player what happened to their card.
    #[must_use]
    pub fn draw_result(outcome: DrawOutcome) -> Self {
        let card = outcome.card();
        let notice = match outcome {
            DrawOutcome::AutoPlayed(_) | DrawOutcome::AutoPlayedWild(_) => {
                format!("You drew the {}. It was played for you.", card.name())
            }
            DrawOutcome::Kept(_) => format!("You drew the {}.", card.name()),
        };
        Self::DrawResult {
            card,
            auto_played: outcome.auto_played(),
            notice,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
