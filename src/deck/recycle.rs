//! Draw pile recovery.
//!
//! When the draw pile runs out, every discard except the top is shuffled
//! back in. The top stays put: it still sets the requirement.

use im::Vector;
use tracing::debug;

use crate::core::{GameRng, GameState};

/// Can the draw pile be refilled from the discard pile?
#[must_use]
pub fn can_recycle(state: &GameState) -> bool {
    state.discard_pile.len() >= 2
}

/// Refill an empty draw pile from the discard pile.
///
/// Returns the number of cards moved. Does nothing (and returns 0) when the
/// draw pile still has cards or the discard pile holds only its top card.
pub fn recycle_discards(state: &mut GameState, rng: &mut GameRng) -> usize {
    if !state.draw_pile.is_empty() || !can_recycle(state) {
        return 0;
    }

    let top = state.discard_pile.split_off(state.discard_pile.len() - 1);
    let mut reserve: Vec<_> = std::mem::replace(&mut state.discard_pile, top)
        .into_iter()
        .collect();
    rng.shuffle(&mut reserve);

    let moved = reserve.len();
    state.draw_pile = reserve.into_iter().collect::<Vector<_>>();
    debug!(moved, "recycled discard pile into draw pile");
    moved
}
