//! Session integration tests.
//!
//! Real room tasks on a paused tokio clock: joining, turn enforcement,
//! wild declarations and their timeout, chat, and reconnection.

mod common;

use std::future::{poll_fn, Future};
use std::task::Poll;
use std::time::Duration;

use common::init_logging;
use crazy_eights::cards::{Card, CurrentRank, Suit};
use crazy_eights::core::{Player, SessionConfig};
use crazy_eights::error::SessionError;
use crazy_eights::session::{ClientMessage, Connection, Lobby, ServerMessage, WILD_TIMEOUT_REASON};
use crazy_eights::sync::{ClientView, FullUpdate, Synchronizer};
use tokio::time::timeout;

const WILD_TIMEOUT: Duration = Duration::from_secs(10);

fn lobby(seed: u64) -> Lobby {
    init_logging();
    Lobby::new(
        SessionConfig::default()
            .with_seed(seed)
            .with_wild_timeout(WILD_TIMEOUT),
    )
}

/// A seed whose opening hand for Player 1 holds an Eight.
fn seed_with_opening_eight() -> (u64, Card) {
    (0..)
        .find_map(|seed| {
            let sync = Synchronizer::start(&SessionConfig::default().with_seed(seed));
            let eight = sync.state().hand1.iter().copied().find(|c| c.is_wild());
            eight.map(|card| (seed, card))
        })
        .unwrap()
}

async fn next_message(conn: &mut Connection) -> ServerMessage {
    timeout(Duration::from_secs(5), conn.recv())
        .await
        .expect("timed out waiting for a message")
        .expect("room closed")
}

/// Skip messages until `pick` accepts one.
async fn wait_for<T>(conn: &mut Connection, mut pick: impl FnMut(ServerMessage) -> Option<T>) -> T {
    loop {
        if let Some(found) = pick(next_message(conn).await) {
            return found;
        }
    }
}

async fn wait_for_init(conn: &mut Connection) -> FullUpdate {
    wait_for(conn, |msg| match msg {
        ServerMessage::InitGameState(update) => Some(update),
        _ => None,
    })
    .await
}

/// Send a chat line and wait for its echo, so everything sent before it
/// has been handled.
async fn barrier(conn: &mut Connection, tag: &str) {
    conn.send(ClientMessage::SendMessage { text: tag.into() }).await.unwrap();
    wait_for(conn, |msg| match msg {
        ServerMessage::Message(entry) if entry.text == tag => Some(()),
        _ => None,
    })
    .await;
}

/// Start a join, let it queue its request, then give up on it.
async fn abandon_join(lobby: &Lobby, room: &str) {
    let mut join = Box::pin(lobby.join(room));
    let first = poll_fn(|cx| Poll::Ready(join.as_mut().poll(cx))).await;
    assert!(first.is_pending(), "join finished before the room ran");
}

async fn seat_both(lobby: &Lobby, room: &str) -> (Connection, Connection) {
    let mut one = lobby.join(room).await.unwrap();
    let mut two = lobby.join(room).await.unwrap();
    wait_for_init(&mut one).await;
    wait_for_init(&mut two).await;
    (one, two)
}

// =============================================================================
// Joining
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_join_assigns_seats_in_order() {
    let lobby = lobby(1);
    let mut one = lobby.join("ROOM").await.unwrap();

    assert_eq!(one.player(), Player::One);
    assert_eq!(
        next_message(&mut one).await,
        ServerMessage::CurrentUserData { name: Player::One }
    );

    let mut two = lobby.join("ROOM").await.unwrap();
    assert_eq!(two.player(), Player::Two);
    assert_eq!(
        next_message(&mut two).await,
        ServerMessage::CurrentUserData { name: Player::Two }
    );

    let a = wait_for_init(&mut one).await;
    let b = wait_for_init(&mut two).await;
    assert_eq!(a, b);
    assert_eq!(a.version, 0);
    assert_eq!(a.state.turn, Player::One);
    assert!(a.state.is_conserved());
}

#[tokio::test(start_paused = true)]
async fn test_third_join_is_refused() {
    let lobby = lobby(2);
    let (_one, _two) = seat_both(&lobby, "FULL").await;

    let err = lobby.join("FULL").await.unwrap_err();
    assert_eq!(err, SessionError::RoomFull("FULL".into()));
    assert_eq!(ServerMessage::error(&err), ServerMessage::Error {
        code: "roomFull".into(),
        message: "room 'FULL' is full".into(),
    });
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_join_in_new_room_takes_no_seat() {
    let lobby = lobby(10);
    abandon_join(&lobby, "GHOST").await;

    let (one, two) = seat_both(&lobby, "GHOST").await;
    assert_eq!(one.player(), Player::One);
    assert_eq!(two.player(), Player::Two);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_join_beside_a_player_takes_no_seat() {
    let lobby = lobby(11);
    let mut one = lobby.join("HALF").await.unwrap();
    abandon_join(&lobby, "HALF").await;

    let mut two = lobby.join("HALF").await.unwrap();
    assert_eq!(two.player(), Player::Two);
    let a = wait_for_init(&mut one).await;
    let b = wait_for_init(&mut two).await;
    assert_eq!(a, b);
}

#[tokio::test(start_paused = true)]
async fn test_rooms_are_independent() {
    let lobby = lobby(3);
    let (_a1, _a2) = seat_both(&lobby, "A").await;
    let (_b1, _b2) = seat_both(&lobby, "B").await;

    assert_eq!(lobby.room_count(), 2);
}

// =============================================================================
// Moves
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_out_of_turn_move_is_rejected_locally() {
    let lobby = lobby(4);
    let (mut one, mut two) = seat_both(&lobby, "TURN").await;

    two.send(ClientMessage::DrawCard).await.unwrap();
    let code = wait_for(&mut two, |msg| match msg {
        ServerMessage::Rejected { code, .. } => Some(code),
        _ => None,
    })
    .await;
    assert_eq!(code, "notYourTurn");

    barrier(&mut one, "sync").await;
    assert!(one.try_recv().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_draw_is_broadcast_as_delta() {
    let lobby = lobby(5);
    let (mut one, mut two) = seat_both(&lobby, "DRAW").await;
    let mut view = ClientView::new();

    one.send(ClientMessage::DrawCard).await.unwrap();

    // A drawn Eight needs a suit before anything is published.
    let delta = loop {
        match next_message(&mut one).await {
            ServerMessage::ChooseSuit { drawn, .. } => {
                assert!(drawn);
                one.send(ClientMessage::DeclareSuit { suit: "clubs".into() }).await.unwrap();
            }
            ServerMessage::UpdateGameState(delta) => break delta,
            _ => {}
        }
    };
    assert_eq!(delta.version, 1);
    assert_eq!(delta.turn, Some(Player::Two));

    let result = wait_for(&mut one, |msg| match msg {
        ServerMessage::DrawResult { card, notice, .. } => Some((card, notice)),
        _ => None,
    })
    .await;
    assert!(result.1.contains(&result.0.name()));

    // Player 2 sees the same delta but no draw notice.
    let seen = wait_for(&mut two, |msg| match msg {
        ServerMessage::UpdateGameState(delta) => Some(delta),
        _ => None,
    })
    .await;
    assert_eq!(seen, delta);

    // The room deals from the lobby's seed, so a local replica can follow.
    view.apply_full(&Synchronizer::start(lobby.config()).publish_full());
    view.apply_delta(&delta).unwrap();
    assert_eq!(view.state().unwrap().turn, Player::Two);
}

// =============================================================================
// Wild declarations
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_bad_suit_reprompts_then_declaration_resolves() {
    let (seed, eight) = seed_with_opening_eight();
    let lobby = lobby(seed);
    let (mut one, mut two) = seat_both(&lobby, "WILD").await;

    one.send(ClientMessage::PlayCard { card: eight, suit: None }).await.unwrap();
    let prompt = wait_for(&mut one, |msg| match msg {
        ServerMessage::ChooseSuit { card, drawn } => Some((card, drawn)),
        _ => None,
    })
    .await;
    assert_eq!(prompt, (eight, false));

    one.send(ClientMessage::DeclareSuit { suit: "purple".into() }).await.unwrap();
    let code = wait_for(&mut one, |msg| match msg {
        ServerMessage::Rejected { code, .. } => Some(code),
        _ => None,
    })
    .await;
    assert_eq!(code, "invalidSuitDeclaration");
    assert!(matches!(next_message(&mut one).await, ServerMessage::ChooseSuit { .. }));

    // Nothing else moves while the suit is open.
    two.send(ClientMessage::DrawCard).await.unwrap();
    let code = wait_for(&mut two, |msg| match msg {
        ServerMessage::Rejected { code, .. } => Some(code),
        _ => None,
    })
    .await;
    assert_eq!(code, "awaitingSuitDeclaration");

    one.send(ClientMessage::DeclareSuit { suit: "Hearts".into() }).await.unwrap();
    let delta = wait_for(&mut two, |msg| match msg {
        ServerMessage::UpdateGameState(delta) => Some(delta),
        _ => None,
    })
    .await;
    assert_eq!(delta.version, 1);
    assert_eq!(delta.current_suit, Some(Suit::Hearts));
    assert_eq!(delta.current_rank, Some(CurrentRank::Wild));
    assert_eq!(delta.turn, Some(Player::Two));
}

#[tokio::test(start_paused = true)]
async fn test_up_front_suit_needs_no_prompt() {
    let (seed, eight) = seed_with_opening_eight();
    let lobby = lobby(seed);
    let (mut one, _two) = seat_both(&lobby, "FAST").await;

    one.send(ClientMessage::PlayCard {
        card: eight,
        suit: Some("d".into()),
    })
    .await
    .unwrap();

    let delta = loop {
        match next_message(&mut one).await {
            ServerMessage::ChooseSuit { .. } => panic!("suit was already declared"),
            ServerMessage::UpdateGameState(delta) => break delta,
            _ => {}
        }
    };
    assert_eq!(delta.current_suit, Some(Suit::Diamonds));
}

#[tokio::test(start_paused = true)]
async fn test_wild_timeout_closes_session() {
    let (seed, eight) = seed_with_opening_eight();
    let lobby = lobby(seed);
    let (mut one, mut two) = seat_both(&lobby, "SLOW").await;

    let started = tokio::time::Instant::now();
    one.send(ClientMessage::PlayCard { card: eight, suit: None }).await.unwrap();
    wait_for(&mut one, |msg| matches!(msg, ServerMessage::ChooseSuit { .. }).then_some(())).await;

    for conn in [&mut one, &mut two] {
        let reason = loop {
            match conn.recv().await {
                Some(ServerMessage::SessionClosed { reason }) => break reason,
                Some(_) => {}
                None => panic!("closed without sessionClosed"),
            }
        };
        assert_eq!(reason, WILD_TIMEOUT_REASON);
        assert!(conn.recv().await.is_none());
    }

    assert!(started.elapsed() >= WILD_TIMEOUT);
    assert!(!lobby.contains("SLOW"));
    assert_eq!(
        one.send(ClientMessage::DrawCard).await,
        Err(SessionError::RoomClosed("SLOW".into()))
    );
}

// =============================================================================
// Chat and roster
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_chat_is_relayed_to_both() {
    let lobby = lobby(6);
    let (mut one, mut two) = seat_both(&lobby, "CHAT").await;

    one.send(ClientMessage::SendMessage { text: "good luck".into() }).await.unwrap();

    for conn in [&mut one, &mut two] {
        let entry = wait_for(conn, |msg| match msg {
            ServerMessage::Message(entry) => Some(entry),
            _ => None,
        })
        .await;
        assert_eq!(entry.user, Player::One);
        assert_eq!(entry.text, "good luck");
    }
}

#[tokio::test(start_paused = true)]
async fn test_rejoin_takes_vacated_seat_with_full_state() {
    let lobby = lobby(7);
    let (mut one, two) = seat_both(&lobby, "BACK").await;
    barrier(&mut one, "before").await;

    one.send(ClientMessage::DrawCard).await.unwrap();
    loop {
        match next_message(&mut one).await {
            ServerMessage::ChooseSuit { .. } => {
                one.send(ClientMessage::DeclareSuit { suit: "spades".into() }).await.unwrap();
            }
            ServerMessage::UpdateGameState(_) => break,
            _ => {}
        }
    }

    drop(two);
    let users = wait_for(&mut one, |msg| match msg {
        ServerMessage::RoomData { users } if users.len() == 1 => Some(users),
        _ => None,
    })
    .await;
    assert_eq!(users[0].name, Player::One);

    let mut again = lobby.join("BACK").await.unwrap();
    assert_eq!(again.player(), Player::Two);

    let chat = wait_for(&mut again, |msg| match msg {
        ServerMessage::Message(entry) => Some(entry),
        _ => None,
    })
    .await;
    assert_eq!(chat.text, "before");

    let full = wait_for_init(&mut again).await;
    assert_eq!(full.version, 1);
    assert_eq!(full.state.turn, Player::Two);
}

#[tokio::test(start_paused = true)]
async fn test_join_right_after_room_empties_reopens_it() {
    let lobby = lobby(12);
    let only = lobby.join("AGAIN").await.unwrap();
    drop(only);

    let mut again = lobby.join("AGAIN").await.unwrap();
    assert_eq!(again.player(), Player::One);
    assert_eq!(
        next_message(&mut again).await,
        ServerMessage::CurrentUserData { name: Player::One }
    );

    let other = lobby.join("AGAIN").await.unwrap();
    assert_eq!(other.player(), Player::Two);
    assert_eq!(lobby.room_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_drop_off_runtime_with_full_queue_frees_seat() {
    init_logging();
    let lobby = Lobby::new(SessionConfig::default().with_seed(13).with_command_buffer(1));
    let (mut one, two) = seat_both(&lobby, "BUSY").await;

    // Fills the queue; the room has not run since.
    one.send(ClientMessage::SendMessage { text: "queued".into() }).await.unwrap();
    std::thread::spawn(move || drop(two)).join().unwrap();

    let users = wait_for(&mut one, |msg| match msg {
        ServerMessage::RoomData { users } if users.len() == 1 => Some(users),
        _ => None,
    })
    .await;
    assert_eq!(users[0].name, Player::One);
    assert!(lobby.join("BUSY").await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_room_closes_when_empty() {
    let lobby = lobby(8);
    let (one, two) = seat_both(&lobby, "GONE").await;
    assert!(lobby.contains("GONE"));

    one.disconnect().await;
    drop(two);

    for _ in 0..100 {
        if !lobby.contains("GONE") {
            break;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    assert!(!lobby.contains("GONE"));
}

#[tokio::test(start_paused = true)]
async fn test_garbage_frames_are_dropped() {
    let lobby = lobby(9);
    let (mut one, _two) = seat_both(&lobby, "JUNK").await;

    one.send_text("{not json").await.unwrap();
    one.send_text(r#"{"type":"playCard","card":"XX"}"#).await.unwrap();
    barrier(&mut one, "still here").await;
}
