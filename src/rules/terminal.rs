//! Win detection.
//!
//! The only way a game ends is a Play that empties the actor's hand. The
//! check takes the hand size *before* the card was removed, so it does not
//! depend on whether removal has happened yet.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Player};

/// Outcome of a terminal check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    /// The game goes on.
    Continue,
    /// The actor played their last card.
    Won(Player),
}

/// Did a Play by `actor`, from a hand of `pre_move_hand_size` cards, end
/// the game?
#[must_use]
pub fn check_terminal(pre_move_hand_size: usize, actor: Player) -> Terminal {
    if pre_move_hand_size == 1 {
        Terminal::Won(actor)
    } else {
        Terminal::Continue
    }
}

/// Record a win on the state. `winner` is written only on the transition
/// into game over and never changed afterwards.
pub(crate) fn apply_terminal(state: &mut GameState, terminal: Terminal) {
    if let Terminal::Won(player) = terminal {
        if !state.game_over {
            state.game_over = true;
            state.winner = Some(player);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::fixtures::state_with;

    #[test]
    fn test_last_card_wins() {
        assert_eq!(check_terminal(1, Player::One), Terminal::Won(Player::One));
        assert_eq!(check_terminal(2, Player::Two), Terminal::Continue);
        assert_eq!(check_terminal(7, Player::One), Terminal::Continue);
    }

    #[test]
    fn test_apply_terminal_sets_winner_once() {
        let mut state = state_with(&[], &[], "7S".parse().unwrap());

        apply_terminal(&mut state, Terminal::Continue);
        assert!(!state.game_over);

        apply_terminal(&mut state, Terminal::Won(Player::Two));
        assert!(state.game_over);
        assert_eq!(state.winner, Some(Player::Two));

        apply_terminal(&mut state, Terminal::Won(Player::One));
        assert_eq!(state.winner, Some(Player::Two));
    }
}
