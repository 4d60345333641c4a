use super::*;
use shakmaty::CastlingMode;
use shakmaty::EnPassantMode;
use shakmaty::Position;
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;

/// A live chess position.
///
/// The halfmove clock reaching 100 is treated as an automatic draw rather
/// than a claimable one, so games cannot stall forever.
#[derive(Debug, Clone)]
pub struct Board {
    position: shakmaty::Chess,
}

impl Board {
    /// Standard starting position.
    pub fn new() -> Self {
        Self {
            position: shakmaty::Chess::default(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let fen: Fen = fen
            .parse()
            .map_err(|_| RulesError::BadFen(fen.to_string()))?;
        let position = fen
            .into_position(CastlingMode::Standard)
            .map_err(|_| RulesError::BadFen("unreachable position".to_string()))?;
        Ok(Self { position })
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.position.turn().into()
    }

    /// Validate a requested move against the position and play it.
    pub fn apply(&mut self, request: &MoveRequest) -> Result<(), RulesError> {
        if self.terminal().is_some() {
            return Err(RulesError::Finished);
        }
        let uci: UciMove = request
            .uci()
            .parse()
            .map_err(|_| RulesError::Unparsable(request.uci()))?;
        let candidate = uci
            .to_move(&self.position)
            .map_err(|_| RulesError::Illegal(request.uci()))?;
        self.position = self
            .position
            .clone()
            .play(&candidate)
            .map_err(|_| RulesError::Illegal(request.uci()))?;
        Ok(())
    }

    /// None while the game is still live.
    pub fn terminal(&self) -> Option<Terminal> {
        if self.position.is_checkmate() {
            Some(Terminal::Checkmate {
                winner: self.turn().opposite(),
            })
        } else if self.position.is_stalemate() {
            Some(Terminal::Stalemate)
        } else if self.position.is_insufficient_material() {
            Some(Terminal::InsufficientMaterial)
        } else if self.position.halfmoves() >= 100 {
            Some(Terminal::FiftyMoves)
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
