use arb_auth::Identity;
use arb_auth::Member;
use arb_core::Arbitrary;
use arb_core::ID;
use arb_core::SEATS;
use arb_core::Tourney;
use arb_core::Unique;
use arb_rules::Color;
use arb_rules::MoveRequest;
use arb_session::*;
use arb_tournament::Status;
use arb_tournament::Tournament;
use arb_tournament::TournamentError;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// The standing open-registration tournament every client sees by default.
const OPEN_NAME: &str = "Weekly Open";

/// Everything the outside world can ask of the lobby task.
pub enum LobbyMessage {
    Connect {
        identity: Identity,
        link: ID<Link>,
        outbox: Outbox,
    },
    Disconnect {
        who: ID<Member>,
        link: ID<Link>,
    },
    Client {
        who: Identity,
        message: ClientMessage,
    },
    Reset,
}

/// Cloneable address of the lobby task.
#[derive(Clone)]
pub struct LobbyHandle {
    inbox: UnboundedSender<LobbyMessage>,
}

impl LobbyHandle {
    pub fn connect(
        &self,
        identity: Identity,
        link: ID<Link>,
        outbox: Outbox,
    ) -> anyhow::Result<()> {
        self.send(LobbyMessage::Connect {
            identity,
            link,
            outbox,
        })
    }
    pub fn disconnect(&self, who: ID<Member>, link: ID<Link>) -> anyhow::Result<()> {
        self.send(LobbyMessage::Disconnect { who, link })
    }
    pub fn client(&self, who: Identity, message: ClientMessage) -> anyhow::Result<()> {
        self.send(LobbyMessage::Client { who, message })
    }
    pub fn reset(&self) -> anyhow::Result<()> {
        self.send(LobbyMessage::Reset)
    }
    fn send(&self, message: LobbyMessage) -> anyhow::Result<()> {
        self.inbox
            .send(message)
            .map_err(|_| anyhow::anyhow!("lobby is gone"))
    }
}

/// A finished casual game whose players may run it back.
struct Rematch {
    players: [Identity; 2],
    offered: HashSet<ID<Member>>,
}

/// Single owner of all realtime state: connections, the matchmaking
/// queue, live games, and tournaments. Runs as one task; every mutation
/// happens inside its event loop, so none of the structures lock.
///
/// Game-over reports and round-break ticks feed back through channels
/// the lobby holds both ends of, which keeps settlement ordered ahead
/// of client traffic in the loop below.
pub struct Lobby {
    registry: Registry,
    queue: Queue,
    directory: Directory,
    tournaments: HashMap<ID<Tourney>, Tournament>,
    open: ID<Tourney>,
    rematches: HashMap<ID<GameSession>, Rematch>,
    ledger: Arc<dyn Ledger>,
    inbox: UnboundedReceiver<LobbyMessage>,
    reports_tx: UnboundedSender<Report>,
    reports: UnboundedReceiver<Report>,
    ticks_tx: UnboundedSender<ID<Tourney>>,
    ticks: UnboundedReceiver<ID<Tourney>>,
}

impl Lobby {
    pub fn spawn(ledger: impl Ledger + 'static) -> LobbyHandle {
        let (tx, inbox) = unbounded_channel();
        tokio::spawn(Self::new(Arc::new(ledger), inbox).run());
        LobbyHandle { inbox: tx }
    }

    fn new(ledger: Arc<dyn Ledger>, inbox: UnboundedReceiver<LobbyMessage>) -> Self {
        let (reports_tx, reports) = unbounded_channel();
        let (ticks_tx, ticks) = unbounded_channel();
        let mut lobby = Self {
            registry: Registry::new(),
            queue: Queue::new(),
            directory: Directory::new(),
            tournaments: HashMap::new(),
            open: ID::default(),
            rematches: HashMap::new(),
            ledger,
            inbox,
            reports_tx,
            reports,
            ticks_tx,
            ticks,
        };
        lobby.reopen();
        lobby
    }

    async fn run(mut self) {
        log::info!("[lobby] open");
        loop {
            tokio::select! {
                biased;
                Some(report) = self.reports.recv() => self.on_report(report).await,
                Some(tournament) = self.ticks.recv() => self.on_tick(tournament),
                message = self.inbox.recv() => match message {
                    Some(message) => self.on_message(message).await,
                    None => break,
                },
            }
        }
        log::info!("[lobby] closed");
    }

    async fn on_message(&mut self, message: LobbyMessage) {
        match message {
            LobbyMessage::Connect {
                identity,
                link,
                outbox,
            } => self.registry.bind(&identity, link, outbox),
            LobbyMessage::Disconnect { who, link } => self.on_disconnect(who, link),
            LobbyMessage::Client { who, message } => self.on_client(who, message),
            LobbyMessage::Reset => self.on_reset(),
        }
    }

    fn on_client(&mut self, who: Identity, message: ClientMessage) {
        match message {
            ClientMessage::FindGame => self.on_find(who),
            ClientMessage::CancelFindGame => {
                self.queue.cancel(who.id);
            }
            ClientMessage::Rematch { game } => self.on_rematch(who, game),
            ClientMessage::RematchAccept { game } => self.on_rematch(who, game),
            ClientMessage::Register { tournament } => self.on_register(who, tournament),
            ClientMessage::Leave { tournament } => self.on_leave(who, tournament),
            ClientMessage::Start { tournament } => self.on_start(who, tournament),
            ClientMessage::GetState { tournament } => self.on_get_state(who, tournament),
            ClientMessage::Join { game } => self.on_join(who, game),
            ClientMessage::Move { game, request } => self.on_move(who, game, request),
            ClientMessage::Resign { game } => self.on_resign(who, game),
        }
    }

    /// A game ended somewhere. Settle the board out of the directory
    /// first, then route by origin; the stats write awaits last so the
    /// lobby's state is never suspended half-updated.
    async fn on_report(&mut self, report: Report) {
        self.directory.remove(report.game);
        match report.origin {
            Origin::Casual => {
                self.open_window(&report);
                self.ledger.record(&report.outcome).await;
            }
            Origin::Tournament(id) => match self.tournaments.get_mut(&id) {
                Some(tournament) => tournament.handle_completion(&report),
                None => log::debug!("[lobby] report for unknown tournament {}", id),
            },
        }
    }

    fn on_tick(&mut self, tournament: ID<Tourney>) {
        match self.tournaments.get_mut(&tournament) {
            Some(t) => t.on_break(&mut self.directory),
            None => log::debug!("[lobby] tick for unknown tournament {}", tournament),
        }
    }

    fn on_disconnect(&mut self, who: ID<Member>, link: ID<Link>) {
        if !self.registry.unbind(who, link) {
            return;
        }
        self.queue.cancel(who);
        if let Some(game) = self.directory.find(who) {
            if let Some(session) = self.directory.get_mut(game) {
                let _ = session.abandon(who);
            }
        }
        for tournament in self.tournaments.values_mut() {
            tournament.remove(who);
        }
        self.void_rematches(who);
    }

    fn on_find(&mut self, who: Identity) {
        if self.directory.playing(who.id) {
            return self.fail(who.id, ErrorCode::Conflict, "already in a game");
        }
        if self.in_running_tournament(who.id) {
            return self.fail(who.id, ErrorCode::Conflict, "already playing in a tournament");
        }
        log::info!("[lobby] {} is looking for a game", who);
        if let Some((a, b)) = self.queue.enqueue(who) {
            self.open_casual(a, b);
        }
    }

    /// Open a casual game for two popped queue entries (or an accepted
    /// rematch). Entries can go stale between enqueue and pop, so each
    /// side is re-checked; a survivor goes back to the front of the line.
    fn open_casual(&mut self, a: Identity, b: Identity) {
        if self.directory.playing(a.id) {
            log::debug!("[lobby] {} got seated while queued, requeueing {}", a, b);
            return self.queue.requeue(b);
        }
        if self.directory.playing(b.id) {
            log::debug!("[lobby] {} got seated while queued, requeueing {}", b, a);
            return self.queue.requeue(a);
        }
        let (white, black) = match Color::random() {
            Color::White => (a, b),
            Color::Black => (b, a),
        };
        let white_out = match self.registry.lookup(white.id) {
            Some(outbox) => outbox.clone(),
            None => return self.queue.requeue(black),
        };
        let black_out = match self.registry.lookup(black.id) {
            Some(outbox) => outbox.clone(),
            None => return self.queue.requeue(white),
        };
        let session = GameSession::new(
            Seat::new(white.clone(), white_out),
            Seat::new(black.clone(), black_out),
            Origin::Casual,
            self.reports_tx.clone(),
        );
        let game = session.id();
        let fen = session.fen();
        if let Err(e) = self.directory.insert(session) {
            log::error!("[lobby] could not seat {} vs {}: {}", white, black, e);
            return;
        }
        // a fresh game voids whatever rematch offers either player had open
        self.void_rematches(white.id);
        self.void_rematches(black.id);
        self.registry.send(
            white.id,
            ServerMessage::started(game, Color::White, fen.clone(), &black),
        );
        self.registry.send(
            black.id,
            ServerMessage::started(game, Color::Black, fen, &white),
        );
        log::info!("[lobby] opened game {}: {} vs {}", game, white, black);
    }

    /// Offer or accept a rematch of a finished casual game. Both are the
    /// same move: record the caller's interest and either open the board
    /// once both sides have spoken or nudge the other side.
    fn on_rematch(&mut self, who: Identity, game: ID<GameSession>) {
        let (participant, other) = match self.rematches.get(&game) {
            None => {
                return self.fail(who.id, ErrorCode::NotFound, "no rematch on offer for that game");
            }
            Some(window) => (
                window.players.iter().any(|p| p.id == who.id),
                window.players.iter().find(|p| p.id != who.id).cloned(),
            ),
        };
        if !participant {
            return self.fail(who.id, ErrorCode::Validation, "not a player of that game");
        }
        let Some(other) = other else { return };
        if self.directory.playing(who.id) {
            self.rematches.remove(&game);
            return self.fail(who.id, ErrorCode::Conflict, "already in a game");
        }
        if self.directory.playing(other.id) {
            self.rematches.remove(&game);
            return self.fail(who.id, ErrorCode::Conflict, "opponent already started another game");
        }
        if !self.registry.contains(other.id) {
            self.rematches.remove(&game);
            return self.fail(who.id, ErrorCode::Conflict, "opponent is no longer connected");
        }
        let agreed = match self.rematches.get_mut(&game) {
            Some(window) => {
                window.offered.insert(who.id);
                window.offered.len() >= SEATS
            }
            None => return,
        };
        if agreed {
            if let Some(window) = self.rematches.remove(&game) {
                log::info!("[lobby] rematch of {} agreed", game);
                let [a, b] = window.players;
                self.open_casual(a, b);
            }
        } else {
            self.registry
                .send(other.id, ServerMessage::rematch_offered(game));
        }
    }

    fn on_register(&mut self, who: Identity, tournament: Option<ID<Tourney>>) {
        let Some(outbox) = self.registry.lookup(who.id).cloned() else {
            return;
        };
        let id = tournament.unwrap_or(self.open);
        let Some(tournament) = self.tournaments.get_mut(&id) else {
            return self.fail(who.id, ErrorCode::NotFound, "tournament not found");
        };
        if let Err(e) = tournament.register(who.clone(), outbox) {
            self.fail(who.id, Self::tournament_code(e), &e.to_string());
        }
    }

    fn on_leave(&mut self, who: Identity, tournament: Option<ID<Tourney>>) {
        let id = tournament.unwrap_or(self.open);
        match self.tournaments.get_mut(&id) {
            Some(tournament) => {
                tournament.remove(who.id);
            }
            None => self.fail(who.id, ErrorCode::NotFound, "tournament not found"),
        }
    }

    fn on_start(&mut self, who: Identity, tournament: Option<ID<Tourney>>) {
        let id = tournament.unwrap_or(self.open);
        let Some(tournament) = self.tournaments.get_mut(&id) else {
            return self.fail(who.id, ErrorCode::NotFound, "tournament not found");
        };
        if let Err(e) = tournament.start(&mut self.directory) {
            self.fail(who.id, Self::tournament_code(e), &e.to_string());
        }
    }

    fn on_get_state(&self, who: Identity, tournament: Option<ID<Tourney>>) {
        let id = tournament.unwrap_or(self.open);
        match self.tournaments.get(&id) {
            Some(tournament) => self
                .registry
                .send(who.id, ServerMessage::update(tournament.state())),
            None => self.fail(who.id, ErrorCode::NotFound, "tournament not found"),
        }
    }

    /// Bind the caller's current connection into a game they are seated
    /// in and reply with their color and the live position.
    fn on_join(&mut self, who: Identity, game: ID<GameSession>) {
        let Some(outbox) = self.registry.lookup(who.id).cloned() else {
            return;
        };
        let Some(session) = self.directory.get_mut(game) else {
            return self.fail(who.id, ErrorCode::NotFound, "game not found");
        };
        match session.rebind(who.id, outbox) {
            Ok(color) => {
                let fen = session.fen();
                let tournament = match session.origin() {
                    Origin::Tournament(id) => Some(id),
                    Origin::Casual => None,
                };
                self.registry
                    .send(who.id, ServerMessage::state(game, color, fen, tournament));
            }
            Err(e) => self.fail(who.id, ErrorCode::Validation, &e.to_string()),
        }
    }

    fn on_move(&mut self, who: Identity, game: ID<GameSession>, request: MoveRequest) {
        let Some(session) = self.directory.get_mut(game) else {
            return self.fail(who.id, ErrorCode::NotFound, "game not found");
        };
        if let Err(e) = session.apply(who.id, &request) {
            self.fail(who.id, Self::session_code(&e), &e.to_string());
        }
    }

    fn on_resign(&mut self, who: Identity, game: ID<GameSession>) {
        let Some(session) = self.directory.get_mut(game) else {
            return self.fail(who.id, ErrorCode::NotFound, "game not found");
        };
        if let Err(e) = session.resign(who.id) {
            self.fail(who.id, Self::session_code(&e), &e.to_string());
        }
    }

    /// Tear down the open tournament and put up a fresh one, telling
    /// every connection about the clean slate.
    fn on_reset(&mut self) {
        log::info!("[lobby] resetting the open tournament");
        self.tournaments.remove(&self.open);
        self.reopen();
        if let Some(tournament) = self.tournaments.get(&self.open) {
            self.registry
                .broadcast(ServerMessage::update(tournament.state()));
        }
    }

    fn reopen(&mut self) {
        let tournament =
            Tournament::new(OPEN_NAME, self.reports_tx.clone(), self.ticks_tx.clone());
        self.open = tournament.id();
        self.tournaments.insert(tournament.id(), tournament);
    }

    fn open_window(&mut self, report: &Report) {
        let players = match &report.outcome {
            Outcome::Decisive { winner, loser } => [winner.clone(), loser.clone()],
            Outcome::Draw { players } => players.clone(),
            Outcome::Bye { .. } => return,
        };
        self.rematches.insert(
            report.game,
            Rematch {
                players,
                offered: HashSet::new(),
            },
        );
    }

    fn void_rematches(&mut self, who: ID<Member>) {
        self.rematches
            .retain(|_, window| window.players.iter().all(|p| p.id != who));
    }

    fn in_running_tournament(&self, who: ID<Member>) -> bool {
        self.tournaments
            .values()
            .any(|t| t.status() == Status::Running && t.registered(who))
    }

    fn fail(&self, who: ID<Member>, code: ErrorCode, message: &str) {
        log::debug!("[lobby] rejecting {}: {}", who, message);
        self.registry.send(who, ServerMessage::error(code, message));
    }

    fn tournament_code(e: TournamentError) -> ErrorCode {
        match e {
            TournamentError::Closed => ErrorCode::Validation,
            TournamentError::NotWaiting => ErrorCode::Conflict,
            TournamentError::TooFewPlayers => ErrorCode::Validation,
        }
    }

    fn session_code(e: &SessionError) -> ErrorCode {
        match e {
            SessionError::Finished => ErrorCode::Conflict,
            _ => ErrorCode::Validation,
        }
    }
}
