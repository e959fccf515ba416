//! Error types.
//!
//! Every error here is scoped to one Move, one connection, or one room.
//! None of them is fatal to the process.

use thiserror::Error;

use crate::cards::Card;
use crate::core::Player;

/// A Move (or suit declaration) that the authoritative state refused.
///
/// Rejections are local: they never mutate the game and are reported only to
/// the player who submitted the Move.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The actor does not hold the turn.
    #[error("it is {turn}'s turn")]
    NotYourTurn { turn: Player },

    /// The played card is not in the actor's hand.
    #[error("{0} is not in your hand")]
    CardNotOwned(Card),

    /// The played card matches neither the current suit nor rank.
    #[error("{0} does not match the current suit or rank")]
    NoMatch(Card),

    /// Both the draw pile and the reshuffle reserve are exhausted.
    #[error("no cards left to draw")]
    DrawPileEmpty,

    /// A wild declaration that does not name one of the four suits.
    #[error("'{0}' is not a suit")]
    InvalidSuitDeclaration(String),

    /// The game has ended; no further Moves are accepted.
    #[error("the game is over")]
    GameAlreadyOver,

    /// A wild card is waiting for its suit; nothing else may happen first.
    #[error("waiting for {actor} to declare a suit")]
    AwaitingSuitDeclaration { actor: Player },

    /// A suit was declared but no wild card is waiting for one.
    #[error("no wild card is waiting for a suit")]
    NoPendingDeclaration,
}

impl MoveError {
    /// Stable wire code for the `rejected` message.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            MoveError::NotYourTurn { .. } => "notYourTurn",
            MoveError::CardNotOwned(_) => "cardNotOwned",
            MoveError::NoMatch(_) => "noMatch",
            MoveError::DrawPileEmpty => "drawPileEmpty",
            MoveError::InvalidSuitDeclaration(_) => "invalidSuitDeclaration",
            MoveError::GameAlreadyOver => "gameAlreadyOver",
            MoveError::AwaitingSuitDeclaration { .. } => "awaitingSuitDeclaration",
            MoveError::NoPendingDeclaration => "noPendingDeclaration",
        }
    }
}

/// Failures at the room/connection level.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Both seats of the room are taken.
    #[error("room '{0}' is full")]
    RoomFull(String),

    /// The room task has shut down.
    #[error("room '{0}' is closed")]
    RoomClosed(String),

    /// A Move arrived before both players joined.
    #[error("the game has not started yet")]
    GameNotStarted,
}

impl SessionError {
    /// Stable wire code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::RoomFull(_) => "roomFull",
            SessionError::RoomClosed(_) => "roomClosed",
            SessionError::GameNotStarted => "gameNotStarted",
        }
    }
}

/// Failures applying published updates to a client-side view.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyncError {
    /// A delta arrived out of emission order.
    #[error("expected update version {expected}, got {got}")]
    OutOfOrder { expected: u64, got: u64 },

    /// A delta arrived before any full state.
    #[error("received a partial update before the initial state")]
    NoBaseline,
}

/// Failures parsing card, rank, or suit text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseCardError {
    #[error("invalid card code '{0}'")]
    Card(String),

    #[error("invalid rank '{0}'")]
    Rank(String),

    #[error("invalid suit '{0}'")]
    Suit(String),
}
