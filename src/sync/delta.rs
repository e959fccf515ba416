//! Partial state updates.
//!
//! A `StateDelta` carries only the fields a Move changed. Recipients merge
//! by field presence: an absent field is unchanged, a present one is
//! overwritten, even when its value is falsy (`gameOver: false`,
//! `winner: null`).
//!
//! `winner` is a double option so "absent" and "present but null" stay
//! distinct on the wire.

use serde::{Deserialize, Serialize};

use crate::cards::{CurrentRank, Suit};
use crate::core::{GameState, Hand, Pile, Player};

/// The fields of a `GameState` that changed, tagged with an update version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDelta {
    /// Position of this update in the session's emission order.
    pub version: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub winner: Option<Option<Player>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<Player>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand1: Option<Hand>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand2: Option<Hand>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_suit: Option<Suit>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_rank: Option<CurrentRank>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discard_pile: Option<Pile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_pile: Option<Pile>,
}

/// `Some(next)` when the field changed.
fn changed<T: PartialEq + Clone>(prev: &T, next: &T) -> Option<T> {
    (prev != next).then(|| next.clone())
}

impl StateDelta {
    /// Diff two states.
    ///
    /// ```
    /// use crazy_eights::core::{GameRng, Player};
    /// use crazy_eights::deck::deal;
    /// use crazy_eights::sync::StateDelta;
    ///
    /// let prev = deal(&mut GameRng::new(1));
    /// let mut next = prev.clone();
    /// next.turn = Player::Two;
    ///
    /// let delta = StateDelta::between(&prev, &next, 1);
    /// assert_eq!(delta.turn, Some(Player::Two));
    /// assert_eq!(delta.hand1, None);
    /// ```
    #[must_use]
    pub fn between(prev: &GameState, next: &GameState, version: u64) -> Self {
        Self {
            version,
            game_over: changed(&prev.game_over, &next.game_over),
            winner: changed(&prev.winner, &next.winner),
            turn: changed(&prev.turn, &next.turn),
            hand1: changed(&prev.hand1, &next.hand1),
            hand2: changed(&prev.hand2, &next.hand2),
            current_suit: changed(&prev.current_suit, &next.current_suit),
            current_rank: changed(&prev.current_rank, &next.current_rank),
            discard_pile: changed(&prev.discard_pile, &next.discard_pile),
            draw_pile: changed(&prev.draw_pile, &next.draw_pile),
        }
    }

    /// Merge into `state`: every present field overwrites.
    pub fn apply(&self, state: &mut GameState) {
        if let Some(game_over) = self.game_over {
            state.game_over = game_over;
        }
        if let Some(winner) = self.winner {
            state.winner = winner;
        }
        if let Some(turn) = self.turn {
            state.turn = turn;
        }
        if let Some(hand) = &self.hand1 {
            state.hand1 = hand.clone();
        }
        if let Some(hand) = &self.hand2 {
            state.hand2 = hand.clone();
        }
        if let Some(suit) = self.current_suit {
            state.current_suit = suit;
        }
        if let Some(rank) = self.current_rank {
            state.current_rank = rank;
        }
        if let Some(pile) = &self.discard_pile {
            state.discard_pile = pile.clone();
        }
        if let Some(pile) = &self.draw_pile {
            state.draw_pile = pile.clone();
        }
    }

    /// True when no state field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.game_over.is_none()
            && self.winner.is_none()
            && self.turn.is_none()
            && self.hand1.is_none()
            && self.hand2.is_none()
            && self.current_suit.is_none()
            && self.current_rank.is_none()
            && self.discard_pile.is_none()
            && self.draw_pile.is_none()
    }
}
