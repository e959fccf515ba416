//! Move resolution.
//!
//! `resolve` turns a validated Move into the next authoritative state. The
//! input state is never touched: every resolution works on a clone, which is
//! cheap because hands and piles are persistent vectors.
//!
//! ## Wild cards
//!
//! An Eight (played from hand, or auto-played off the draw pile) needs a
//! suit before the turn can pass. If the suit is not known yet the resolver
//! returns [`Resolution::AwaitingSuit`] holding a [`PendingWild`]; nothing
//! is committed until [`PendingWild::declare`] finishes it.

use tracing::trace;

use super::terminal::{apply_terminal, check_terminal};
use super::validator::validate;
use crate::cards::{Card, CurrentRank, Suit};
use crate::core::{GameRng, GameState, Move, MoveKind, Player};
use crate::deck::recycle_discards;
use crate::error::MoveError;

/// What happened to the card taken by a Draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// It matched and went straight onto the discard pile.
    AutoPlayed(Card),
    /// It was an Eight and went onto the discard pile; a suit was declared.
    AutoPlayedWild(Card),
    /// It stayed in the drawer's hand.
    Kept(Card),
}

impl DrawOutcome {
    /// The card that was drawn.
    #[must_use]
    pub const fn card(&self) -> Card {
        match *self {
            Self::AutoPlayed(card) | Self::AutoPlayedWild(card) | Self::Kept(card) => card,
        }
    }

    /// Did the drawn card end up on the discard pile?
    #[must_use]
    pub const fn auto_played(&self) -> bool {
        !matches!(self, Self::Kept(_))
    }
}

/// A fully resolved Move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    /// The next authoritative state.
    pub state: GameState,
    /// Set for Draws.
    pub draw: Option<DrawOutcome>,
    /// Cards moved from the discard pile back into the draw pile first.
    pub recycled: usize,
}

/// Result of resolving a Move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Complete(Resolved),
    /// An Eight hit the discard pile and the new suit is still unknown.
    AwaitingSuit(PendingWild),
}

/// Where the pending Eight came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WildSource {
    Played,
    Drawn,
}

/// A wild resolution waiting for its suit.
///
/// Holds the staged state: the Eight already on the discard pile, the
/// requirement and turn not yet updated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingWild {
    actor: Player,
    card: Card,
    source: WildSource,
    staged: GameState,
    pre_move_hand_size: usize,
    recycled: usize,
}

impl PendingWild {
    /// The player who must declare.
    #[must_use]
    pub const fn actor(&self) -> Player {
        self.actor
    }

    /// The Eight awaiting a suit.
    #[must_use]
    pub const fn card(&self) -> Card {
        self.card
    }

    #[must_use]
    pub const fn source(&self) -> WildSource {
        self.source
    }

    /// Finish the resolution with the declared suit.
    ///
    /// The requirement becomes (`suit`, wild), the win check runs for a
    /// played Eight, and the turn passes.
    #[must_use]
    pub fn declare(self, suit: Suit) -> Resolved {
        let mut state = self.staged;
        state.current_suit = suit;
        state.current_rank = CurrentRank::Wild;

        let draw = match self.source {
            WildSource::Played => {
                apply_terminal(&mut state, check_terminal(self.pre_move_hand_size, self.actor));
                None
            }
            WildSource::Drawn => Some(DrawOutcome::AutoPlayedWild(self.card)),
        };
        state.pass_turn();
        trace!(actor = %self.actor, card = %self.card, %suit, "wild suit declared");

        Resolved {
            state,
            draw,
            recycled: self.recycled,
        }
    }
}

/// Resolve a Move against `state`.
///
/// Validates first, so an invalid Move returns its `MoveError` and leaves
/// nothing changed. `rng` is only used when a Draw has to recycle the
/// discard pile.
pub fn resolve(state: &GameState, mv: &Move, rng: &mut GameRng) -> Result<Resolution, MoveError> {
    validate(state, mv)?;
    let actor = mv.actor;

    match mv.kind {
        MoveKind::Play { card, declare } => Ok(resolve_play(state, actor, card, declare)),
        MoveKind::Draw => resolve_draw(state, actor, rng),
    }
}

fn resolve_play(state: &GameState, actor: Player, card: Card, declare: Option<Suit>) -> Resolution {
    let pre_move_hand_size = state.hand(actor).len();
    let mut next = state.clone();
    next.remove_from_hand(actor, card);

    if card.is_wild() {
        next.discard_pile.push_back(card);
        let pending = PendingWild {
            actor,
            card,
            source: WildSource::Played,
            staged: next,
            pre_move_hand_size,
            recycled: 0,
        };
        return match declare {
            Some(suit) => Resolution::Complete(pending.declare(suit)),
            None => Resolution::AwaitingSuit(pending),
        };
    }

    next.discard(card);
    apply_terminal(&mut next, check_terminal(pre_move_hand_size, actor));
    next.pass_turn();

    Resolution::Complete(Resolved {
        state: next,
        draw: None,
        recycled: 0,
    })
}

fn resolve_draw(state: &GameState, actor: Player, rng: &mut GameRng) -> Result<Resolution, MoveError> {
    let pre_move_hand_size = state.hand(actor).len();
    let mut next = state.clone();
    let recycled = recycle_discards(&mut next, rng);
    let drawn = next.draw_pile.pop_back().ok_or(MoveError::DrawPileEmpty)?;

    if drawn.is_wild() {
        next.discard_pile.push_back(drawn);
        return Ok(Resolution::AwaitingSuit(PendingWild {
            actor,
            card: drawn,
            source: WildSource::Drawn,
            staged: next,
            pre_move_hand_size,
            recycled,
        }));
    }

    let outcome = if drawn.matches(next.current_suit, next.current_rank) {
        next.discard(drawn);
        DrawOutcome::AutoPlayed(drawn)
    } else {
        next.hand_mut(actor).push_back(drawn);
        DrawOutcome::Kept(drawn)
    };
    next.pass_turn();

    Ok(Resolution::Complete(Resolved {
        state: next,
        draw: Some(outcome),
        recycled,
    }))
}
