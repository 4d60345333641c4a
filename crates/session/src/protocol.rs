use super::*;

/// Errors that can occur at the wire boundary.
#[derive(Debug, Clone)]
pub enum ProtocolError {
    Malformed(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(s) => write!(f, "malformed message: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// The JSON boundary between socket frames and typed messages.
pub struct Protocol;

impl Protocol {
    /// Parses an inbound text frame into a client message.
    pub fn decode(s: &str) -> Result<ClientMessage, ProtocolError> {
        serde_json::from_str(s).map_err(|_| ProtocolError::Malformed(s.to_string()))
    }
    /// Renders a server message for the wire.
    pub fn encode(message: &ServerMessage) -> String {
        message.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arb_core::Arbitrary;
    use arb_core::ID;
    use arb_rules::Color;

    #[test]
    fn decode_bare_events() {
        assert!(matches!(
            Protocol::decode(r#"{"type":"findGame"}"#).unwrap(),
            ClientMessage::FindGame
        ));
        assert!(matches!(
            Protocol::decode(r#"{"type":"cancelFindGame"}"#).unwrap(),
            ClientMessage::CancelFindGame
        ));
    }

    #[test]
    fn decode_tournament_events_with_and_without_id() {
        let bare = Protocol::decode(r#"{"type":"tournament:register"}"#).unwrap();
        assert!(matches!(bare, ClientMessage::Register { tournament: None }));
        let id: ID<arb_core::Tourney> = ID::default();
        let json = format!(r#"{{"type":"tournament:start","tournamentId":"{}"}}"#, id);
        match Protocol::decode(&json).unwrap() {
            ClientMessage::Start {
                tournament: Some(t),
            } => assert_eq!(t, id),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn decode_move_and_its_tournament_alias() {
        let game: ID<GameSession> = ID::default();
        for event in ["move", "tournament:game:move"] {
            let json = format!(
                r#"{{"type":"{}","gameId":"{}","move":{{"from":"e2","to":"e4"}}}}"#,
                event, game
            );
            match Protocol::decode(&json).unwrap() {
                ClientMessage::Move { game: g, request } => {
                    assert_eq!(g, game);
                    assert_eq!(request.uci(), "e2e4");
                }
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn decode_resign_aliases() {
        let game: ID<GameSession> = ID::default();
        for event in ["surrender", "tournament:game:resign"] {
            let json = format!(r#"{{"type":"{}","gameId":"{}"}}"#, event, game);
            assert!(matches!(
                Protocol::decode(&json).unwrap(),
                ClientMessage::Resign { .. }
            ));
        }
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(Protocol::decode("not json").is_err());
        assert!(Protocol::decode(r#"{"type":"teleport"}"#).is_err());
        assert!(Protocol::decode(r#"{"type":"move","gameId":"not-a-uuid"}"#).is_err());
    }

    #[test]
    fn encode_tags_events_by_type() {
        let who = arb_auth::Identity::random();
        let game: ID<GameSession> = ID::default();
        let json = Protocol::encode(&ServerMessage::started(
            game,
            Color::White,
            "fen here".to_string(),
            &who,
        ));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "game:started");
        assert_eq!(value["gameId"], game.to_string());
        assert_eq!(value["color"], "white");
        assert_eq!(value["opponent"]["username"], who.username);
    }

    #[test]
    fn encode_game_over_distinguishes_draws() {
        let game: ID<GameSession> = ID::default();
        let winner: ID<arb_auth::Member> = ID::default();
        let decisive = Protocol::encode(&ServerMessage::over(game, Some(winner), Reason::Checkmate));
        let value: serde_json::Value = serde_json::from_str(&decisive).unwrap();
        assert_eq!(value["type"], "game:over");
        assert_eq!(value["draw"], false);
        assert_eq!(value["reason"], "checkmate");
        let draw = Protocol::encode(&ServerMessage::over(game, None, Reason::Stalemate));
        let value: serde_json::Value = serde_json::from_str(&draw).unwrap();
        assert_eq!(value["draw"], true);
        assert!(value.get("winner").is_none());
    }

    #[test]
    fn encode_flattens_tournament_state() {
        let state = TournamentState {
            id: ID::default(),
            name: "Weekly Open".to_string(),
            state: "waiting".to_string(),
            current_round: 0,
            total_rounds: 0,
            players: vec![],
            rounds: vec![],
        };
        let json = Protocol::encode(&ServerMessage::update(state));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "tournament:stateUpdate");
        assert_eq!(value["name"], "Weekly Open");
        assert_eq!(value["state"], "waiting");
        assert_eq!(value["currentRound"], 0);
    }

    #[test]
    fn encode_error_codes_are_camel_case() {
        let json = Protocol::encode(&ServerMessage::error(ErrorCode::NotFound, "no such game"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["code"], "notFound");
        assert_eq!(value["message"], "no such game");
    }
}
