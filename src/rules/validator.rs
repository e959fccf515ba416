//! Move validation.
//!
//! `validate` is a pure function of the state and the Move: it never
//! mutates, so a rejected Move can be retried any number of times with the
//! same outcome.

use smallvec::SmallVec;

use crate::cards::{Card, Suit};
use crate::core::{GameState, Move, MoveKind, Player};
use crate::deck::can_recycle;
use crate::error::MoveError;

/// Check a Move against the authoritative state.
///
/// Checks, in order: the game is still running, the actor holds the turn,
/// then the Move itself (card ownership and matching for a Play, an
/// available card for a Draw). An up-front suit on a non-wild Play is
/// ignored.
pub fn validate(state: &GameState, mv: &Move) -> Result<(), MoveError> {
    if state.game_over {
        return Err(MoveError::GameAlreadyOver);
    }
    if mv.actor != state.turn {
        return Err(MoveError::NotYourTurn { turn: state.turn });
    }

    match mv.kind {
        MoveKind::Play { card, .. } => {
            if !state.holds(mv.actor, card) {
                return Err(MoveError::CardNotOwned(card));
            }
            if !is_playable(state, card) {
                return Err(MoveError::NoMatch(card));
            }
            Ok(())
        }
        MoveKind::Draw => {
            if state.draw_pile.is_empty() && !can_recycle(state) {
                return Err(MoveError::DrawPileEmpty);
            }
            Ok(())
        }
    }
}

/// Can `card` legally go on the discard pile right now?
///
/// An Eight always can; anything else must match the suit or rank in force.
#[must_use]
pub fn is_playable(state: &GameState, card: Card) -> bool {
    card.is_wild() || card.matches(state.current_suit, state.current_rank)
}

/// Every Move `actor` may submit in this state.
///
/// Eights are listed once, without a declared suit. Empty when it is not
/// the actor's turn or the game is over.
#[must_use]
pub fn legal_moves(state: &GameState, actor: Player) -> SmallVec<[Move; 8]> {
    let mut moves = SmallVec::new();
    if state.game_over || state.turn != actor {
        return moves;
    }

    for &card in state.hand(actor).iter() {
        if is_playable(state, card) {
            moves.push(Move::play(actor, card));
        }
    }
    let draw = Move::draw(actor);
    if validate(state, &draw).is_ok() {
        moves.push(draw);
    }
    moves
}

/// Turn a free-text suit declaration into a `Suit`.
pub fn parse_declaration(raw: &str) -> Result<Suit, MoveError> {
    raw.parse()
        .map_err(|_| MoveError::InvalidSuitDeclaration(raw.to_string()))
}
