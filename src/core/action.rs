//! Move representation.
//!
//! A `Move` is what a client asks for: play a card from hand, or draw.
//! Moves are requests; only the rules decide what they actually do.

use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::cards::{Card, Suit};

/// What the actor wants to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MoveKind {
    /// Play `card` from hand. For an Eight, `declare` may name the new suit
    /// up front; without it the resolution waits for a declaration.
    Play {
        card: Card,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        declare: Option<Suit>,
    },

    /// Take the top card of the draw pile.
    Draw,
}

/// A complete Move: who, and what.
///
/// ```
/// use crazy_eights::cards::{Card, Rank, Suit};
/// use crazy_eights::core::{Move, Player};
///
/// let play = Move::play(Player::One, Card::new(Rank::Nine, Suit::Spades));
/// let wild = Move::play_wild(Player::Two, Card::new(Rank::Eight, Suit::Clubs), Suit::Hearts);
/// let draw = Move::draw(Player::One);
///
/// assert_eq!(play.card(), Some(Card::new(Rank::Nine, Suit::Spades)));
/// assert_eq!(draw.card(), None);
/// assert_ne!(wild, play);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub actor: Player,
    #[serde(flatten)]
    pub kind: MoveKind,
}

impl Move {
    /// Play a card without an up-front suit declaration.
    #[must_use]
    pub const fn play(actor: Player, card: Card) -> Self {
        Self {
            actor,
            kind: MoveKind::Play { card, declare: None },
        }
    }

    /// Play an Eight and declare the new suit in the same request.
    #[must_use]
    pub const fn play_wild(actor: Player, card: Card, suit: Suit) -> Self {
        Self {
            actor,
            kind: MoveKind::Play {
                card,
                declare: Some(suit),
            },
        }
    }

    /// Draw from the draw pile.
    #[must_use]
    pub const fn draw(actor: Player) -> Self {
        Self {
            actor,
            kind: MoveKind::Draw,
        }
    }

    /// The played card, if this is a Play.
    #[must_use]
    pub const fn card(&self) -> Option<Card> {
        match self.kind {
            MoveKind::Play { card, .. } => Some(card),
            MoveKind::Draw => None,
        }
    }
}

/// A resolved Move, as kept in a session's history.
///
/// Records what was requested and the update version it produced, so a
/// history can be lined up against the deltas clients received.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The Move as submitted.
    pub submitted: Move,

    /// Suit declared for a wild card, if one was needed.
    pub declared: Option<Suit>,

    /// Version of the update this Move produced.
    pub version: u64,
}
