//! The fixed 40-card pack.
//!
//! Four suits of ten ranks each: the pips 2–7, 9 and 10, the Ace, and the
//! wild Eight. Court cards are valid `Rank`s but are not dealt.

use super::card::{Card, Rank, Suit};

/// Number of cards in the pack.
pub const PACK_SIZE: usize = 40;

/// Ranks present in every suit of the pack.
pub const PACK_RANKS: [Rank; 10] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Nine,
    Rank::Ten,
    Rank::Ace,
    Rank::Eight,
];

/// Build the pack in canonical order (suit-major).
#[must_use]
pub fn pack() -> Vec<Card> {
    let mut cards = Vec::with_capacity(PACK_SIZE);
    for suit in Suit::ALL {
        for rank in PACK_RANKS {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}
