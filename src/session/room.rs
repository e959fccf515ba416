//! The room task.
//!
//! Each room runs as one tokio task that owns its `Synchronizer`, so Moves
//! are resolved strictly one at a time in arrival order. Connections talk
//! to it through a bounded command queue; it talks back through one
//! unbounded outbound channel per seat. Leaves travel on their own unbounded
//! channel so a dropped `Connection` can always free its seat.
//!
//! ## Lifecycle
//!
//! - The first joiner takes Player 1, the second Player 2.
//! - A seat counts only once the joiner has received its admission; a join
//!   abandoned before that is rolled back.
//! - The game is dealt when the second seat is first filled.
//! - A vacated seat can be taken again; the newcomer gets the full state.
//! - The room ends when both seats are empty, or when a wild declaration
//!   times out (fatal: both players get `sessionClosed`).

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, info_span, warn, Instrument};

use super::lobby::Registry;
use super::protocol::{ChatEntry, ClientMessage, RosterEntry, ServerMessage, WILD_TIMEOUT_REASON};
use crate::core::{Move, Player, PlayerMap, SessionConfig};
use crate::error::{MoveError, SessionError};
use crate::rules::parse_declaration;
use crate::sync::{Published, Step, Synchronizer};

pub(crate) type Outbound = mpsc::UnboundedSender<ServerMessage>;

/// What a successful join hands back to the connection.
#[derive(Debug)]
pub(crate) struct Admission {
    pub seat: Player,
    pub token: u64,
}

pub(crate) enum Command {
    Join {
        outbound: Outbound,
        reply: oneshot::Sender<Result<Admission, SessionError>>,
    },
    Client {
        seat: Player,
        token: u64,
        message: ClientMessage,
    },
}

/// A seat being given up.
#[derive(Debug)]
pub(crate) struct Leave {
    pub seat: Player,
    pub token: u64,
}

/// Shared handle to a running room.
#[derive(Clone, Debug)]
pub(crate) struct RoomHandle {
    pub id: u64,
    pub commands: mpsc::Sender<Command>,
    pub leaves: mpsc::UnboundedSender<Leave>,
}

struct Seat {
    token: u64,
    outbound: Outbound,
}

enum Flow {
    Continue,
    Close,
}

pub(crate) struct Room {
    id: u64,
    code: String,
    config: SessionConfig,
    seats: PlayerMap<Option<Seat>>,
    next_token: u64,
    game: Option<Synchronizer>,
    chat: Vec<ChatEntry>,
    wild_deadline: Option<Instant>,
}

impl Room {
    /// Spawn the room task and return its handle.
    pub(crate) fn spawn(
        id: u64,
        code: String,
        config: SessionConfig,
        registry: Arc<Mutex<Registry>>,
    ) -> RoomHandle {
        let (commands, inbox) = mpsc::channel(config.command_buffer);
        let (leaves, departures) = mpsc::unbounded_channel();
        let span = info_span!("room", room = %code);
        let room = Room {
            id,
            code,
            config,
            seats: PlayerMap::default(),
            next_token: 0,
            game: None,
            chat: Vec::new(),
            wild_deadline: None,
        };
        tokio::spawn(room.run(inbox, departures, registry).instrument(span));
        RoomHandle { id, commands, leaves }
    }

    async fn run(
        mut self,
        mut inbox: mpsc::Receiver<Command>,
        mut departures: mpsc::UnboundedReceiver<Leave>,
        registry: Arc<Mutex<Registry>>,
    ) {
        info!("room opened");
        loop {
            let deadline = self.wild_deadline;
            // Leaves first: a seat freed before a queued join is free for it.
            let flow = tokio::select! {
                biased;
                Some(Leave { seat, token }) = departures.recv() => self.leave(seat, token),
                command = inbox.recv() => match command {
                    Some(command) => self.handle(command),
                    None => Flow::Close,
                },
                () = wild_timer(deadline) => self.expire_wild(),
            };
            if let Flow::Close = flow {
                break;
            }
        }

        // Unregister before dropping the queue, so a join refused with
        // `RoomClosed` always finds the code free again.
        registry.lock().remove(&self.code, self.id);
        drop(inbox);
        info!("room closed");
    }

    fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Join { outbound, reply } => match self.admit(outbound) {
                Ok(admission) => {
                    let seat = admission.seat;
                    if reply.send(Ok(admission)).is_err() {
                        debug!(%seat, "joiner went away before admission");
                        self.seats[seat] = None;
                        return if self.is_empty() { Flow::Close } else { Flow::Continue };
                    }
                    self.welcome(seat);
                    Flow::Continue
                }
                Err(err) => {
                    debug!(%err, "join refused");
                    let _ = reply.send(Err(err));
                    Flow::Continue
                }
            },
            Command::Client { seat, token, message } => {
                if !self.is_current(seat, token) {
                    debug!(%seat, "message from a stale connection");
                    return Flow::Continue;
                }
                self.on_message(seat, token, message)
            }
        }
    }

    fn is_current(&self, seat: Player, token: u64) -> bool {
        self.seats[seat].as_ref().is_some_and(|s| s.token == token)
    }

    // === Roster ===

    fn admit(&mut self, outbound: Outbound) -> Result<Admission, SessionError> {
        let seat = self
            .seats
            .find(|s| s.is_none())
            .ok_or_else(|| SessionError::RoomFull(self.code.clone()))?;

        self.next_token += 1;
        let token = self.next_token;
        self.seats[seat] = Some(Seat { token, outbound });
        Ok(Admission { seat, token })
    }

    /// Greet a confirmed joiner, dealing once both seats are filled.
    fn welcome(&mut self, seat: Player) {
        info!(%seat, "player joined");
        self.send(seat, ServerMessage::CurrentUserData { name: seat });
        self.broadcast(ServerMessage::RoomData { users: self.roster() });
        for entry in self.chat.clone() {
            self.send(seat, ServerMessage::Message(entry));
        }

        if let Some(game) = &self.game {
            self.send(seat, ServerMessage::InitGameState(game.publish_full()));
            if game.awaiting() == Some(seat) {
                self.prompt_pending(seat);
            }
        } else if self.seats.iter().all(|(_, s)| s.is_some()) {
            self.start_game();
        }
    }

    fn leave(&mut self, seat: Player, token: u64) -> Flow {
        if !self.is_current(seat, token) {
            return Flow::Continue;
        }
        self.seats[seat] = None;
        info!(%seat, "player left");

        if self.is_empty() {
            return Flow::Close;
        }
        self.broadcast(ServerMessage::RoomData { users: self.roster() });
        Flow::Continue
    }

    fn is_empty(&self) -> bool {
        self.seats.iter().all(|(_, s)| s.is_none())
    }

    fn roster(&self) -> Vec<RosterEntry> {
        self.seats
            .iter()
            .filter(|(_, s)| s.is_some())
            .map(|(name, _)| RosterEntry {
                name,
                room: self.code.clone(),
            })
            .collect()
    }

    // === Game ===

    fn start_game(&mut self) {
        let game = Synchronizer::start(&self.config);
        info!(seed = game.seed(), "game started");
        self.broadcast(ServerMessage::InitGameState(game.publish_full()));
        self.game = Some(game);
    }

    fn on_message(&mut self, seat: Player, token: u64, message: ClientMessage) -> Flow {
        match message {
            ClientMessage::Join { .. } => {
                warn!(%seat, "join on an established connection ignored");
                Flow::Continue
            }
            ClientMessage::Disconnect => self.leave(seat, token),
            ClientMessage::SendMessage { text } => {
                let entry = ChatEntry { user: seat, text };
                self.chat.push(entry.clone());
                self.broadcast(ServerMessage::Message(entry));
                Flow::Continue
            }
            ClientMessage::PlayCard { card, suit } => {
                let mv = match suit.as_deref().map(parse_declaration).transpose() {
                    Ok(Some(suit)) => Move::play_wild(seat, card, suit),
                    Ok(None) => Move::play(seat, card),
                    Err(err) => {
                        self.reject(seat, &err);
                        return Flow::Continue;
                    }
                };
                self.submit(seat, mv);
                Flow::Continue
            }
            ClientMessage::DrawCard => {
                self.submit(seat, Move::draw(seat));
                Flow::Continue
            }
            ClientMessage::DeclareSuit { suit } => {
                self.declare(seat, &suit);
                Flow::Continue
            }
        }
    }

    fn submit(&mut self, seat: Player, mv: Move) {
        let Some(game) = self.game.as_mut() else {
            self.send(seat, ServerMessage::error(&SessionError::GameNotStarted));
            return;
        };

        match game.submit(mv) {
            Ok(Step::Published(update)) => self.publish(update),
            Ok(Step::AwaitingSuit { actor, card, drawn }) => {
                self.wild_deadline = Some(Instant::now() + self.config.wild_timeout);
                self.send(actor, ServerMessage::ChooseSuit { card, drawn });
            }
            Err(err) => self.reject(seat, &err),
        }
    }

    fn declare(&mut self, seat: Player, raw: &str) {
        let Some(game) = self.game.as_mut() else {
            self.send(seat, ServerMessage::error(&SessionError::GameNotStarted));
            return;
        };

        match parse_declaration(raw).and_then(|suit| game.declare_suit(seat, suit)) {
            Ok(update) => {
                self.wild_deadline = None;
                self.publish(update);
            }
            Err(err) => {
                self.reject(seat, &err);
                // Bad suit text keeps the wild open; ask again.
                let awaiting = self.game.as_ref().and_then(Synchronizer::awaiting);
                if matches!(err, MoveError::InvalidSuitDeclaration(_)) && awaiting == Some(seat) {
                    self.prompt_pending(seat);
                }
            }
        }
    }

    /// Re-send the wild prompt for the parked Eight.
    fn prompt_pending(&self, actor: Player) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        if let Some((card, drawn)) = game.pending_card() {
            self.send(actor, ServerMessage::ChooseSuit { card, drawn });
        }
    }

    fn publish(&self, update: Published) {
        let Published {
            actor,
            delta,
            draw,
            ..
        } = update;

        self.broadcast(ServerMessage::UpdateGameState(delta));
        if let Some(outcome) = draw {
            self.send(actor, ServerMessage::draw_result(outcome));
        }
    }

    fn reject(&self, seat: Player, err: &MoveError) {
        debug!(%seat, code = err.code(), "move rejected");
        self.send(seat, ServerMessage::rejected(err));
    }

    fn expire_wild(&mut self) -> Flow {
        info!("wild declaration timed out, closing session");
        self.broadcast(ServerMessage::SessionClosed {
            reason: WILD_TIMEOUT_REASON.to_string(),
        });
        Flow::Close
    }

    // === Delivery ===

    fn send(&self, seat: Player, message: ServerMessage) {
        if let Some(s) = &self.seats[seat] {
            if s.outbound.send(message).is_err() {
                debug!(%seat, "outbound channel closed");
            }
        }
    }

    fn broadcast(&self, message: ServerMessage) {
        for seat in Player::ALL {
            self.send(seat, message.clone());
        }
    }
}

/// Resolves at the wild deadline, or never when none is set.
async fn wild_timer(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
