//! The authoritative game state.
//!
//! `GameState` is the single aggregate both clients render. It is created by
//! the dealer, replaced wholesale by the resolver after each Move, and never
//! mutated anywhere else.
//!
//! Uses `im` persistent vectors so the synchronizer can keep the previous
//! state around for diffing at O(1) clone cost.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::cards::{Card, CurrentRank, Suit, PACK_SIZE};

/// Cards held by one player. Order carries no meaning.
pub type Hand = Vector<Card>;

/// Cards in a pile; the last element is the top.
pub type Pile = Vector<Card>;

/// Full game state.
///
/// Field names on the wire match the protocol (`hand1`, `currentSuit`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Set once, when a Play empties a hand.
    pub game_over: bool,

    /// The player whose Play emptied their hand.
    pub winner: Option<Player>,

    /// The player permitted to submit the next Move.
    pub turn: Player,

    /// Player 1's hand.
    pub hand1: Hand,

    /// Player 2's hand.
    pub hand2: Hand,

    /// Suit requirement in force.
    pub current_suit: Suit,

    /// Rank requirement in force (`Wild` after an Eight).
    pub current_rank: CurrentRank,

    /// Played cards; last is the top.
    pub discard_pile: Pile,

    /// Face-down stock; last is the top.
    pub draw_pile: Pile,
}

impl GameState {
    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: Player) -> &Hand {
        match player {
            Player::One => &self.hand1,
            Player::Two => &self.hand2,
        }
    }

    /// A player's hand, mutably.
    pub fn hand_mut(&mut self, player: Player) -> &mut Hand {
        match player {
            Player::One => &mut self.hand1,
            Player::Two => &mut self.hand2,
        }
    }

    /// The visible top of the discard pile.
    #[must_use]
    pub fn top_discard(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }

    /// Does `player` hold `card`?
    #[must_use]
    pub fn holds(&self, player: Player, card: Card) -> bool {
        self.hand(player).contains(&card)
    }

    /// Total cards across both hands and both piles.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand1.len() + self.hand2.len() + self.discard_pile.len() + self.draw_pile.len()
    }

    /// Does the state account for every card of the pack exactly once?
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        if self.card_count() != PACK_SIZE {
            return false;
        }
        let mut seen = std::collections::HashSet::with_capacity(PACK_SIZE);
        self.hand1
            .iter()
            .chain(self.hand2.iter())
            .chain(self.discard_pile.iter())
            .chain(self.draw_pile.iter())
            .all(|card| seen.insert(*card))
    }

    /// Remove one copy of `card` from a hand.
    ///
    /// Returns true if the card was found and removed.
    pub(crate) fn remove_from_hand(&mut self, player: Player, card: Card) -> bool {
        let hand = self.hand_mut(player);
        match hand.index_of(&card) {
            Some(pos) => {
                hand.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Place a card on the discard pile and make it the requirement.
    pub(crate) fn discard(&mut self, card: Card) {
        self.discard_pile.push_back(card);
        self.current_suit = card.suit;
        self.current_rank = CurrentRank::Rank(card.rank);
    }

    /// Hand the turn to the other player.
    pub(crate) fn pass_turn(&mut self) {
        self.turn = self.turn.opponent();
    }
}
