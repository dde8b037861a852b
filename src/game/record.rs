//! Turn records and game results.

use serde::{Deserialize, Serialize};

use crate::core::coord::Coord;
use crate::core::player::PlayerId;
use crate::pieces::{CombatOutcome, PieceId};

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// One side still holds its flag, the other does not.
    Winner(PlayerId),
    /// Neither side holds its flag.
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// One committed move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Who moved.
    pub player: PlayerId,
    pub piece: PieceId,
    pub from: Coord,
    pub to: Coord,
    /// Set when the move was an attack.
    pub combat: Option<CombatOutcome>,
    /// 1-based position in the game's history.
    pub turn: u32,
}

impl TurnRecord {
    #[must_use]
    pub fn is_attack(&self) -> bool {
        self.combat.is_some()
    }
}

/// What happened after the user moved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub user_move: TurnRecord,
    /// `None` if the game ended first or the opponent could not move.
    pub opponent_move: Option<TurnRecord>,
    pub result: Option<GameResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_winner() {
        let won = GameResult::Winner(PlayerId::USER);
        assert!(won.is_winner(PlayerId::USER));
        assert!(!won.is_winner(PlayerId::OPPONENT));
        assert!(!GameResult::Draw.is_winner(PlayerId::USER));
    }

    #[test]
    fn test_record_serialization() {
        let record = TurnRecord {
            player: PlayerId::OPPONENT,
            piece: PieceId::new(52),
            from: Coord::new(3, 6),
            to: Coord::new(3, 5),
            combat: Some(CombatOutcome::DefenderWins),
            turn: 4,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: TurnRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, back);
        assert!(back.is_attack());
    }
}
