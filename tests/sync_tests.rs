//! State sync integration tests.
//!
//! Updates go through their JSON encoding before reaching the client view,
//! the way a remote client would see them.

mod common;

use common::{card, init_logging, state_with};
use crazy_eights::cards::{CurrentRank, Suit};
use crazy_eights::core::{Move, Player};
use crazy_eights::error::SyncError;
use crazy_eights::session::ServerMessage;
use crazy_eights::sync::{ClientView, Step, Synchronizer};

/// Encode and decode, as if over a socket.
fn over_the_wire(msg: ServerMessage) -> ServerMessage {
    let raw = msg.to_json().unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn apply(view: &mut ClientView, msg: ServerMessage) -> Result<(), SyncError> {
    match over_the_wire(msg) {
        ServerMessage::InitGameState(full) => {
            view.apply_full(&full);
            Ok(())
        }
        ServerMessage::UpdateGameState(delta) => view.apply_delta(&delta),
        other => panic!("not a state message: {other:?}"),
    }
}

#[test]
fn test_client_follows_a_game_over_the_wire() {
    init_logging();
    let state = state_with(&["9S", "8D"], &["4S", "2C"], "7S");
    let mut sync = Synchronizer::from_state(state, 0);
    let mut view = ClientView::new();

    apply(&mut view, ServerMessage::InitGameState(sync.publish_full())).unwrap();

    let moves = [
        Move::play(Player::One, card("9S")),
        Move::play(Player::Two, card("4S")),
    ];
    for mv in moves {
        let Step::Published(update) = sync.submit(mv).unwrap() else {
            panic!("no wild expected");
        };
        apply(&mut view, ServerMessage::UpdateGameState(update.delta)).unwrap();
        assert_eq!(view.state(), Some(sync.state()));
    }

    // Last card is an Eight: declared, wins, and the delta says so.
    let Step::AwaitingSuit { actor, .. } = sync.submit(Move::play(Player::One, card("8D"))).unwrap() else {
        panic!("expected a suit prompt");
    };
    let update = sync.declare_suit(actor, Suit::Clubs).unwrap();
    assert_eq!(update.delta.game_over, Some(true));
    assert_eq!(update.delta.winner, Some(Some(Player::One)));
    assert_eq!(update.delta.current_rank, Some(CurrentRank::Wild));

    apply(&mut view, ServerMessage::UpdateGameState(update.delta)).unwrap();
    let seen = view.state().unwrap();
    assert!(seen.game_over);
    assert_eq!(seen.winner, Some(Player::One));
    assert_eq!(view.version(), 3);
}

#[test]
fn test_replayed_delta_is_rejected() {
    let state = state_with(&["9S", "2H"], &["4S"], "7S");
    let mut sync = Synchronizer::from_state(state, 0);
    let mut view = ClientView::new();
    view.apply_full(&sync.publish_full());

    let Step::Published(update) = sync.submit(Move::play(Player::One, card("9S"))).unwrap() else {
        panic!("no wild expected");
    };
    view.apply_delta(&update.delta).unwrap();

    assert_eq!(
        view.apply_delta(&update.delta),
        Err(SyncError::OutOfOrder { expected: 2, got: 1 })
    );
    assert_eq!(view.state(), Some(sync.state()));
}

#[test]
fn test_late_joiner_gets_current_version() {
    let state = state_with(&["9S", "2H"], &["4S"], "7S");
    let mut sync = Synchronizer::from_state(state, 0);
    sync.submit(Move::play(Player::One, card("9S"))).unwrap();

    let mut late = ClientView::new();
    apply(&mut late, ServerMessage::InitGameState(sync.publish_full())).unwrap();

    assert_eq!(late.version(), 1);
    assert_eq!(late.state(), Some(sync.state()));
}
