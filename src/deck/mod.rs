//! Deck management: building, shuffling and dealing the pack, and
//! refilling the draw pile from the discards.

pub mod dealer;
pub mod recycle;

pub use dealer::{deal, HAND_SIZE, INITIAL_DRAW_PILE};
pub use recycle::{can_recycle, recycle_discards};
