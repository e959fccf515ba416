//! Shared helpers for integration tests.

#![allow(dead_code)]

use crazy_eights::cards::{pack, Card, CurrentRank};
use crazy_eights::core::{GameState, Pile, Player};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once per binary.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then "warn".
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn card(code: &str) -> Card {
    code.parse().unwrap_or_else(|err| panic!("bad card code {code}: {err}"))
}

pub fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|code| card(code)).collect()
}

/// A conserved state with explicit hands and starter. Every other pack card
/// goes to the draw pile in pack order; Player 1 to move.
pub fn state_with(hand1: &[&str], hand2: &[&str], starter: &str) -> GameState {
    let hand1 = cards(hand1);
    let hand2 = cards(hand2);
    let starter = card(starter);
    let draw_pile: Pile = pack()
        .into_iter()
        .filter(|c| !hand1.contains(c) && !hand2.contains(c) && *c != starter)
        .collect();

    GameState {
        game_over: false,
        winner: None,
        turn: Player::One,
        hand1: hand1.into_iter().collect(),
        hand2: hand2.into_iter().collect(),
        current_suit: starter.suit,
        current_rank: CurrentRank::Rank(starter.rank),
        discard_pile: Pile::unit(starter),
        draw_pile,
    }
}

/// Put `code` on top of the draw pile.
pub fn stack_draw(state: &mut GameState, code: &str) {
    let top = card(code);
    state.draw_pile.retain(|c| *c != top);
    state.draw_pile.push_back(top);
}

/// Move the whole draw pile beneath the current top discard.
pub fn exhaust_draw_pile(state: &mut GameState) {
    let top = state.discard_pile.pop_back().expect("discard pile has a top");
    let mut discards = std::mem::take(&mut state.draw_pile);
    discards.append(std::mem::take(&mut state.discard_pile));
    discards.push_back(top);
    state.discard_pile = discards;
}
