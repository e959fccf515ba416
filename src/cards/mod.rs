//! Card system: suits, ranks, cards, and the fixed pack.
//!
//! ## Key Types
//!
//! - `Suit`, `Rank`: the two card dimensions (`Rank::Eight` is wild)
//! - `Card`: an immutable `(rank, suit)` value
//! - `CurrentRank`: the rank requirement in force, which may be `Wild`
//! - `pack()`: the 40 cards every game is dealt from

pub mod card;
pub mod pack;

pub use card::{Card, CurrentRank, Rank, Suit};
pub use pack::{pack, PACK_RANKS, PACK_SIZE};
