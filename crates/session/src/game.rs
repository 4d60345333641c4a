use super::*;
use arb_auth::Identity;
use arb_auth::Member;
use arb_core::ID;
use arb_core::Unique;
use arb_rules::Board;
use arb_rules::Color;
use arb_rules::MoveRequest;
use tokio::sync::mpsc::UnboundedSender;

/// One seat at the board: who sits there and how to reach them.
#[derive(Debug, Clone)]
pub struct Seat {
    identity: Identity,
    outbox: Outbox,
}

impl Seat {
    pub fn new(identity: Identity, outbox: Outbox) -> Self {
        Self { identity, outbox }
    }
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    InProgress,
    Over,
}

/// One pairwise game from first move to its single completion report.
///
/// The session never decides what its result means: it describes the ending
/// through a [`Report`] and lets the origin (matchmaker or tournament) react.
pub struct GameSession {
    id: ID<Self>,
    white: Seat,
    black: Seat,
    board: Board,
    status: Status,
    origin: Origin,
    reports: UnboundedSender<Report>,
}

impl Unique for GameSession {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl GameSession {
    pub fn new(white: Seat, black: Seat, origin: Origin, reports: UnboundedSender<Report>) -> Self {
        let id = ID::default();
        log::info!(
            "[session {}] {} (white) vs {} (black)",
            id,
            white.identity,
            black.identity
        );
        Self {
            id,
            white,
            black,
            board: Board::new(),
            status: Status::InProgress,
            origin,
            reports,
        }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn fen(&self) -> String {
        self.board.fen()
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::Over
    }

    pub fn white(&self) -> &Identity {
        &self.white.identity
    }

    pub fn black(&self) -> &Identity {
        &self.black.identity
    }

    /// Which color a member plays in this game, if seated at all.
    pub fn color_of(&self, who: ID<Member>) -> Option<Color> {
        if self.white.identity.id == who {
            Some(Color::White)
        } else if self.black.identity.id == who {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Point a seat at a fresh connection (reconnect into a running game).
    /// Returns the seat's color so the caller can describe the position.
    pub fn rebind(&mut self, who: ID<Member>, outbox: Outbox) -> Result<Color, SessionError> {
        let color = self.color_of(who).ok_or(SessionError::NotSeated(who))?;
        match color {
            Color::White => self.white.outbox = outbox,
            Color::Black => self.black.outbox = outbox,
        }
        log::debug!("[session {}] {} rebound as {}", self.id, who, color);
        Ok(color)
    }

    /// Validate and play a move, broadcast the new position, and settle the
    /// game if the move ended it.
    pub fn apply(&mut self, who: ID<Member>, request: &MoveRequest) -> Result<(), SessionError> {
        let color = self.color_of(who).ok_or(SessionError::NotSeated(who))?;
        if self.is_over() {
            return Err(SessionError::Finished);
        }
        if self.board.turn() != color {
            return Err(SessionError::NotYourTurn);
        }
        self.board.apply(request)?;
        log::info!("[session {}] {} plays {}", self.id, who, request);
        self.broadcast(ServerMessage::moved(
            self.id,
            self.board.fen(),
            request.clone(),
            who,
        ));
        if let Some(terminal) = self.board.terminal() {
            let outcome = match terminal.winner() {
                Some(color) => self.decisive(color),
                None => self.drawn(),
            };
            self.conclude(Reason::from(terminal), outcome);
        }
        Ok(())
    }

    /// The other seat wins by concession.
    pub fn resign(&mut self, who: ID<Member>) -> Result<(), SessionError> {
        let color = self.color_of(who).ok_or(SessionError::NotSeated(who))?;
        if self.is_over() {
            return Err(SessionError::Finished);
        }
        log::info!("[session {}] {} resigns", self.id, who);
        let outcome = self.decisive(color.opposite());
        self.conclude(Reason::Resignation, outcome);
        Ok(())
    }

    /// A seat went away mid-game; the remaining seat wins.
    pub fn abandon(&mut self, who: ID<Member>) -> Result<(), SessionError> {
        let color = self.color_of(who).ok_or(SessionError::NotSeated(who))?;
        if self.is_over() {
            return Err(SessionError::Finished);
        }
        log::info!("[session {}] {} abandoned", self.id, who);
        let outcome = self.decisive(color.opposite());
        self.conclude(Reason::Abandonment, outcome);
        Ok(())
    }

    fn decisive(&self, winner: Color) -> Outcome {
        let (winner, loser) = match winner {
            Color::White => (&self.white, &self.black),
            Color::Black => (&self.black, &self.white),
        };
        Outcome::Decisive {
            winner: winner.identity.clone(),
            loser: loser.identity.clone(),
        }
    }

    fn drawn(&self) -> Outcome {
        Outcome::Draw {
            players: [self.white.identity.clone(), self.black.identity.clone()],
        }
    }

    /// Enter Over, report exactly once, then tell both seats.
    /// The status guard makes a second conclusion impossible.
    fn conclude(&mut self, reason: Reason, outcome: Outcome) {
        if self.is_over() {
            return;
        }
        self.status = Status::Over;
        log::info!("[session {}] over: {}", self.id, reason);
        let winner = outcome.winner().map(|identity| identity.id);
        let report = Report {
            game: self.id,
            origin: self.origin,
            reason,
            outcome,
        };
        if let Err(e) = self.reports.send(report) {
            log::warn!("[session {}] report lost: {:?}", self.id, e);
        }
        self.broadcast(ServerMessage::over(self.id, winner, reason));
    }

    /// Sends a message to both seats.
    pub fn broadcast(&self, message: ServerMessage) {
        for seat in [&self.white, &self.black] {
            if let Err(e) = seat.outbox.send(message.clone()) {
                log::debug!(
                    "[session {}] send to {} failed: {:?}",
                    self.id,
                    seat.identity,
                    e
                );
            }
        }
    }
}
