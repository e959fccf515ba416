//! The single writer of a session's authoritative state.
//!
//! A `Synchronizer` owns one `GameState` and turns each accepted Move into
//! exactly one versioned `StateDelta`. Rejected Moves produce nothing. A wild
//! card that still needs its suit is parked here between `submit` and
//! `declare_suit`; while it is parked every other Move is refused.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::delta::StateDelta;
use crate::cards::{Card, Suit};
use crate::core::{GameRng, GameRngState, GameState, Move, MoveRecord, Player, SessionConfig};
use crate::deck::deal;
use crate::error::MoveError;
use crate::rules::{resolve, DrawOutcome, PendingWild, Resolution, Resolved, WildSource};

/// A complete state, sent when a client has no baseline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullUpdate {
    pub version: u64,
    #[serde(flatten)]
    pub state: GameState,
}

/// A committed Move, ready to broadcast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Published {
    /// The Move that produced this update.
    pub actor: Player,
    pub delta: StateDelta,
    /// What the drawn card did, for a Draw.
    pub draw: Option<DrawOutcome>,
    /// Cards recycled from the discard pile before drawing.
    pub recycled: usize,
}

/// Result of submitting a Move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// The Move resolved and produced an update.
    Published(Published),
    /// An Eight is on the discard pile; `actor` must declare a suit before
    /// anything is published.
    AwaitingSuit { actor: Player, card: Card, drawn: bool },
}

/// A session saved between Moves.
///
/// Restoring one resumes the reshuffle stream where it stopped, so the
/// restored session deals out exactly what the original would have.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    pub version: u64,
    pub seed: u64,
    pub state: GameState,
    pub reshuffle: GameRngState,
    pub history: Vec<MoveRecord>,
}

/// Owns the authoritative `GameState` of one session.
#[derive(Debug)]
pub struct Synchronizer {
    state: GameState,
    version: u64,
    seed: u64,
    reshuffle_rng: GameRng,
    pending: Option<(Move, PendingWild)>,
    history: Vec<MoveRecord>,
}

impl Synchronizer {
    /// Deal a new game as configured.
    ///
    /// The deal and later reshuffles draw from separate streams derived
    /// from one seed, so a seed fully determines a session.
    #[must_use]
    pub fn start(config: &SessionConfig) -> Self {
        let root = config.rng();
        let mut deal_rng = root.for_context("deal");
        let state = deal(&mut deal_rng);
        info!(seed = root.seed(), "game dealt");
        Self::from_state(state, root.seed())
    }

    /// Adopt an existing state as version 0.
    #[must_use]
    pub fn from_state(state: GameState, seed: u64) -> Self {
        Self {
            state,
            version: 0,
            seed,
            reshuffle_rng: GameRng::new(seed).for_context("reshuffle"),
            pending: None,
            history: Vec::new(),
        }
    }

    /// Resume a saved session.
    #[must_use]
    pub fn restore(checkpoint: Checkpoint) -> Self {
        debug!(version = checkpoint.version, "session restored");
        Self {
            state: checkpoint.state,
            version: checkpoint.version,
            seed: checkpoint.seed,
            reshuffle_rng: GameRng::from_state(&checkpoint.reshuffle),
            pending: None,
            history: checkpoint.history,
        }
    }

    /// Save the session. Refused while a wild card waits for its suit.
    pub fn checkpoint(&self) -> Result<Checkpoint, MoveError> {
        if let Some(actor) = self.awaiting() {
            return Err(MoveError::AwaitingSuitDeclaration { actor });
        }
        Ok(Checkpoint {
            version: self.version,
            seed: self.seed,
            state: self.state.clone(),
            reshuffle: self.reshuffle_rng.state(),
            history: self.history.clone(),
        })
    }

    /// The current authoritative state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Version of the last published update (0 before any Move).
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Every committed Move, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The player who owes a suit declaration, if any.
    #[must_use]
    pub fn awaiting(&self) -> Option<Player> {
        self.pending.as_ref().map(|(_, pending)| pending.actor())
    }

    /// The parked Eight and whether it came off the draw pile.
    #[must_use]
    pub fn pending_card(&self) -> Option<(Card, bool)> {
        self.pending
            .as_ref()
            .map(|(_, pending)| (pending.card(), pending.source() == WildSource::Drawn))
    }

    /// The whole state at the current version.
    #[must_use]
    pub fn publish_full(&self) -> FullUpdate {
        FullUpdate {
            version: self.version,
            state: self.state.clone(),
        }
    }

    /// Diff two states as the next update in this session.
    #[must_use]
    pub fn publish_delta(&self, prev: &GameState, next: &GameState) -> StateDelta {
        StateDelta::between(prev, next, self.version + 1)
    }

    /// Validate and resolve a Move.
    ///
    /// A rejection leaves the session exactly as it was.
    pub fn submit(&mut self, mv: Move) -> Result<Step, MoveError> {
        if let Some(actor) = self.awaiting() {
            return Err(MoveError::AwaitingSuitDeclaration { actor });
        }

        match resolve(&self.state, &mv, &mut self.reshuffle_rng)? {
            Resolution::Complete(resolved) => Ok(Step::Published(self.commit(mv, None, resolved))),
            Resolution::AwaitingSuit(pending) => {
                let step = Step::AwaitingSuit {
                    actor: pending.actor(),
                    card: pending.card(),
                    drawn: pending.source() == WildSource::Drawn,
                };
                debug!(actor = %pending.actor(), card = %pending.card(), "awaiting suit declaration");
                self.pending = Some((mv, pending));
                Ok(step)
            }
        }
    }

    /// Complete a parked wild resolution.
    pub fn declare_suit(&mut self, actor: Player, suit: Suit) -> Result<Published, MoveError> {
        let owner = self.awaiting().ok_or(MoveError::NoPendingDeclaration)?;
        if owner != actor {
            return Err(MoveError::NotYourTurn { turn: owner });
        }
        let (mv, pending) = self.pending.take().ok_or(MoveError::NoPendingDeclaration)?;
        let resolved = pending.declare(suit);
        Ok(self.commit(mv, Some(suit), resolved))
    }

    fn commit(&mut self, mv: Move, declared: Option<Suit>, resolved: Resolved) -> Published {
        let delta = self.publish_delta(&self.state, &resolved.state);
        self.version = delta.version;
        self.state = resolved.state;
        self.history.push(MoveRecord {
            submitted: mv,
            declared,
            version: self.version,
        });

        debug!(actor = %mv.actor, version = self.version, "move committed");
        if let Some(winner) = self.state.winner.filter(|_| delta.game_over == Some(true)) {
            info!(%winner, "game over");
        }

        Published {
            actor: mv.actor,
            delta,
            draw: resolved.draw,
            recycled: resolved.recycled,
        }
    }
}
