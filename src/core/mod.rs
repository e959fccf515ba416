//! Core engine types: players, state, moves, RNG, configuration.
//!
//! Everything the rules and the synchronizer pass between each other lives
//! here. Nothing in this module performs I/O.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Move, MoveKind, MoveRecord};
pub use config::SessionConfig;
pub use player::{Player, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, Hand, Pile};
