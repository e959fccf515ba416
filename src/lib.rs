//! # crazy-eights
//!
//! An authoritative two-player Crazy Eights engine with a versioned
//! state-sync protocol.
//!
//! ## Design Principles
//!
//! 1. **One Writer**: Each room's `GameState` is owned by a single task.
//!    Clients only submit Moves; they never compute state themselves.
//!
//! 2. **Pure Rules**: Validation and resolution are functions of the state
//!    and the Move. A rejected Move changes nothing and can be retried.
//!
//! 3. **Explicit Suspension**: A wild card that still needs a suit is a
//!    value (`PendingWild`), not a callback, and it times out.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Hands and piles are `im` vectors, so
//!   the synchronizer keeps the previous state for diffing at O(1) cost.
//!
//! - **Deterministic Randomness**: One seed fixes the deal and every
//!   reshuffle, so any session can be replayed.
//!
//! ## Modules
//!
//! - `cards`: Suits, ranks, cards and the 40-card pack
//! - `core`: Players, state, Moves, RNG, configuration
//! - `deck`: Dealing and discard recycling
//! - `rules`: Validation, resolution and win detection
//! - `sync`: Versioned full and partial updates, client-side merging
//! - `session`: Rooms, connections and the JSON wire protocol
//! - `error`: Error types

pub mod cards;
pub mod core;
pub mod deck;
pub mod error;
pub mod rules;
pub mod session;
pub mod sync;

// Re-export commonly used types
pub use crate::cards::{Card, CurrentRank, Rank, Suit};

pub use crate::core::{
    GameRng, GameRngState, GameState, Move, MoveKind, MoveRecord, Player, PlayerMap,
    SessionConfig,
};

pub use crate::deck::deal;

pub use crate::error::{MoveError, ParseCardError, SessionError, SyncError};

pub use crate::rules::{
    check_terminal, legal_moves, resolve, validate, DrawOutcome, PendingWild, Resolution,
    Resolved, Terminal,
};

pub use crate::session::{ClientMessage, Connection, Lobby, ServerMessage};

pub use crate::sync::{Checkpoint, ClientView, FullUpdate, StateDelta, Synchronizer};
