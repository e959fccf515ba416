//! Initial deal.
//!
//! The dealer is the only place randomness enters a game: one shuffle of
//! the pack and the choice of starter card. Everything after that is a pure
//! function of the Moves submitted (plus reshuffles, which use their own
//! stream).

use im::Vector;
use tracing::debug;

use crate::cards::{pack, Card, CurrentRank, PACK_SIZE};
use crate::core::{GameRng, GameState, Player};

/// Cards dealt to each player.
pub const HAND_SIZE: usize = 7;

/// Cards left in the draw pile after the deal.
pub const INITIAL_DRAW_PILE: usize = PACK_SIZE - 2 * HAND_SIZE - 1;

/// Shuffle, deal two hands, and turn up a non-wild starter.
///
/// ## Procedure
///
/// 1. Shuffle the pack uniformly.
/// 2. Deal the first 7 cards to Player 1 and the next 7 to Player 2.
/// 3. Sample positions among the remaining 26 until one holds a non-Eight;
///    that card alone forms the discard pile and sets the requirement.
/// 4. The other 25, in dealt order, become the draw pile.
///
/// ```
/// use crazy_eights::core::{GameRng, Player};
/// use crazy_eights::deck::{deal, HAND_SIZE};
///
/// let state = deal(&mut GameRng::new(42));
/// assert_eq!(state.hand1.len(), HAND_SIZE);
/// assert_eq!(state.turn, Player::One);
/// assert!(!state.top_discard().unwrap().is_wild());
/// ```
pub fn deal(rng: &mut GameRng) -> GameState {
    let mut cards = pack();
    rng.shuffle(&mut cards);

    let mut rest = cards.split_off(2 * HAND_SIZE);
    let hand2 = cards.split_off(HAND_SIZE);
    let hand1 = cards;

    let starter = take_starter(&mut rest, rng);
    debug!(%starter, "dealt starter card");

    GameState {
        game_over: false,
        winner: None,
        turn: Player::One,
        hand1: hand1.into_iter().collect(),
        hand2: hand2.into_iter().collect(),
        current_suit: starter.suit,
        current_rank: CurrentRank::Rank(starter.rank),
        discard_pile: Vector::unit(starter),
        draw_pile: rest.into_iter().collect(),
    }
}

/// Remove a randomly chosen non-wild card from `rest`, keeping the order of
/// the others.
///
/// `rest` always holds at most four Eights among 26 cards, so the rejection
/// loop terminates.
fn take_starter(rest: &mut Vec<Card>, rng: &mut GameRng) -> Card {
    loop {
        let idx = rng.index_below(rest.len());
        if !rest[idx].is_wild() {
            return rest.remove(idx);
        }
    }
}
