//! Crazy Eights rules.
//!
//! - `validator`: is a Move legal in this state?
//! - `resolver`: what state does a legal Move produce?
//! - `terminal`: did it end the game?
//!
//! All three are pure over `GameState`; the only side input is the RNG a
//! Draw uses when it has to recycle the discard pile.

pub mod resolver;
pub mod terminal;
pub mod validator;

pub use resolver::{resolve, DrawOutcome, PendingWild, Resolution, Resolved, WildSource};
pub use terminal::{check_terminal, Terminal};
pub use validator::{is_playable, legal_moves, parse_declaration, validate};
