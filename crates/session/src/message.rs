use super::*;
use arb_auth::Identity;
use arb_auth::Member;
use arb_core::ID;
use arb_core::Tourney;
use arb_rules::Color;
use arb_rules::MoveRequest;
use serde::Deserialize;
use serde::Serialize;

/// Events clients send over the socket. Tagged by the `type` field; the
/// tournament-flavored move/resign names are aliases for the casual ones
/// because routing only needs the game id.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "findGame")]
    FindGame,
    #[serde(rename = "cancelFindGame")]
    CancelFindGame,
    #[serde(rename = "rematch")]
    Rematch {
        #[serde(rename = "gameId")]
        game: ID<GameSession>,
    },
    #[serde(rename = "rematch:accept")]
    RematchAccept {
        #[serde(rename = "gameId")]
        game: ID<GameSession>,
    },
    #[serde(rename = "tournament:register")]
    Register {
        #[serde(rename = "tournamentId", default)]
        tournament: Option<ID<Tourney>>,
    },
    #[serde(rename = "tournament:leave")]
    Leave {
        #[serde(rename = "tournamentId", default)]
        tournament: Option<ID<Tourney>>,
    },
    #[serde(rename = "tournament:start")]
    Start {
        #[serde(rename = "tournamentId", default)]
        tournament: Option<ID<Tourney>>,
    },
    #[serde(rename = "tournament:getState")]
    GetState {
        #[serde(rename = "tournamentId", default)]
        tournament: Option<ID<Tourney>>,
    },
    #[serde(rename = "tournament:game:join")]
    Join {
        #[serde(rename = "gameId")]
        game: ID<GameSession>,
    },
    #[serde(rename = "move", alias = "tournament:game:move")]
    Move {
        #[serde(rename = "gameId")]
        game: ID<GameSession>,
        #[serde(rename = "move")]
        request: MoveRequest,
    },
    #[serde(rename = "surrender", alias = "tournament:game:resign")]
    Resign {
        #[serde(rename = "gameId")]
        game: ID<GameSession>,
    },
}

/// Messages sent from server to client over the socket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// A casual pairing (or rematch) formed; targeted to each seat.
    #[serde(rename = "game:started")]
    GameStarted {
        #[serde(rename = "gameId")]
        game: ID<GameSession>,
        color: Color,
        fen: String,
        opponent: PlayerInfo,
    },
    /// Reply to a tournament game join: your color and the live position.
    #[serde(rename = "game:state")]
    GameState {
        #[serde(rename = "gameId")]
        game: ID<GameSession>,
        color: Color,
        fen: String,
        #[serde(rename = "tournamentId", skip_serializing_if = "Option::is_none")]
        tournament: Option<ID<Tourney>>,
    },
    /// An accepted move; broadcast to both seats.
    #[serde(rename = "game:move")]
    GameMove {
        #[serde(rename = "gameId")]
        game: ID<GameSession>,
        fen: String,
        #[serde(rename = "move")]
        request: MoveRequest,
        by: ID<Member>,
    },
    /// The game ended; broadcast to both seats.
    #[serde(rename = "game:over")]
    GameOver {
        #[serde(rename = "gameId")]
        game: ID<GameSession>,
        #[serde(skip_serializing_if = "Option::is_none")]
        winner: Option<ID<Member>>,
        draw: bool,
        reason: String,
    },
    /// Your opponent from a finished casual game wants another.
    #[serde(rename = "rematch:offered")]
    RematchOffered {
        #[serde(rename = "gameId")]
        game: ID<GameSession>,
    },
    /// Full tournament projection; broadcast after every mutation.
    #[serde(rename = "tournament:stateUpdate")]
    TournamentUpdate(TournamentState),
    /// A round paired you into a game; targeted to each seat.
    #[serde(rename = "tournament:gameCreated")]
    TournamentGameCreated {
        #[serde(rename = "gameId")]
        game: ID<GameSession>,
    },
    /// The tournament is over.
    #[serde(rename = "tournament:finished")]
    TournamentFinished {
        winner: Option<PlayerInfo>,
        players: Vec<Standing>,
    },
    /// Targeted rejection of the triggering event.
    #[serde(rename = "error")]
    Error { code: ErrorCode, message: String },
}

/// Rejection category, mirrored to clients verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    Validation,
    Conflict,
    NotFound,
}

/// Identity as it appears on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerInfo {
    pub id: ID<Member>,
    pub username: String,
}

impl From<&Identity> for PlayerInfo {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
        }
    }
}

/// One row of the score table, sorted into standings order upstream.
#[derive(Debug, Clone, Serialize)]
pub struct Standing {
    pub id: ID<Member>,
    pub username: String,
    pub score: f32,
}

/// One pairing inside a round record. Players are listed white first, so
/// results read as chess notation relative to the first entry.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub id: ID<GameSession>,
    pub players: [ID<Member>; 2],
    pub result: Option<String>,
}

/// A formed round: its pairings plus whoever sat out with a bye.
#[derive(Debug, Clone, Serialize)]
pub struct RoundRecord {
    pub round: usize,
    pub games: Vec<MatchRecord>,
    pub byes: Vec<ID<Member>>,
}

/// Read-only projection of a whole tournament.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentState {
    pub id: ID<Tourney>,
    pub name: String,
    pub state: String,
    pub current_round: usize,
    pub total_rounds: usize,
    pub players: Vec<Standing>,
    pub rounds: Vec<RoundRecord>,
}

impl ServerMessage {
    pub fn started(game: ID<GameSession>, color: Color, fen: String, opponent: &Identity) -> Self {
        Self::GameStarted {
            game,
            color,
            fen,
            opponent: PlayerInfo::from(opponent),
        }
    }
    pub fn state(
        game: ID<GameSession>,
        color: Color,
        fen: String,
        tournament: Option<ID<Tourney>>,
    ) -> Self {
        Self::GameState {
            game,
            color,
            fen,
            tournament,
        }
    }
    pub fn moved(game: ID<GameSession>, fen: String, request: MoveRequest, by: ID<Member>) -> Self {
        Self::GameMove {
            game,
            fen,
            request,
            by,
        }
    }
    pub fn over(game: ID<GameSession>, winner: Option<ID<Member>>, reason: Reason) -> Self {
        Self::GameOver {
            game,
            draw: winner.is_none(),
            winner,
            reason: reason.to_string(),
        }
    }
    pub fn rematch_offered(game: ID<GameSession>) -> Self {
        Self::RematchOffered { game }
    }
    pub fn update(state: TournamentState) -> Self {
        Self::TournamentUpdate(state)
    }
    pub fn game_created(game: ID<GameSession>) -> Self {
        Self::TournamentGameCreated { game }
    }
    pub fn finished(winner: Option<&Identity>, players: Vec<Standing>) -> Self {
        Self::TournamentFinished {
            winner: winner.map(PlayerInfo::from),
            players,
        }
    }
    pub fn error(code: ErrorCode, message: &str) -> Self {
        Self::Error {
            code,
            message: message.to_string(),
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}
