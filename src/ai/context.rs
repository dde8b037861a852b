//! What the opponent sees when it decides a move.
//!
//! `DecisionContext` bundles read-only views of the pieces, the board and
//! both players, plus the candidate pool every fallback stage draws from.
//! Move caches must be fresh before a context is built.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::coord::Coord;
use crate::players::Player;
use crate::pieces::{Piece, PieceId, PieceSet};

/// A move chosen by a decision stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMove {
    pub piece: PieceId,
    pub from: Coord,
    pub to: Coord,
}

/// One cached move of one movable piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub piece: PieceId,
    pub from: Coord,
    pub dest: Coord,
    /// Piece standing on `dest`, if the move is an attack.
    pub target: Option<PieceId>,
}

impl Candidate {
    #[must_use]
    pub fn planned(&self) -> PlannedMove {
        PlannedMove {
            piece: self.piece,
            from: self.from,
            to: self.dest,
        }
    }
}

/// Candidate moves for the fallback stages.
#[derive(Clone, Debug, Default)]
pub struct CandidatePool {
    /// Every cached move of every movable piece, roster then cache order.
    pub all: Vec<Candidate>,
    /// `all` minus attacks on visible pieces no stronger than the mover.
    pub kept: Vec<Candidate>,
}

impl CandidatePool {
    /// Build the pool for `me`.
    #[must_use]
    pub fn build(pieces: &PieceSet, board: &Board, me: &Player) -> Self {
        let mut all = Vec::new();
        for piece in me.movable(pieces) {
            let Some(from) = piece.coord() else {
                continue;
            };
            for &dest in piece.moves() {
                all.push(Candidate {
                    piece: piece.id(),
                    from,
                    dest,
                    target: board.is_occupied(pieces, dest),
                });
            }
        }

        let kept = all
            .iter()
            .copied()
            .filter(|c| !Self::attacks_visible_weaker(pieces, c))
            .collect();

        Self { all, kept }
    }

    fn attacks_visible_weaker(pieces: &PieceSet, candidate: &Candidate) -> bool {
        let Some(target) = candidate.target.and_then(|t| pieces.get(t)) else {
            return false;
        };
        !target.is_hidden() && target.strength() <= pieces[candidate.piece].strength()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Read-only state for one opponent decision.
pub struct DecisionContext<'a> {
    pub pieces: &'a PieceSet,
    pub board: &'a Board,
    /// The side choosing a move.
    pub me: &'a Player,
    pub enemy: &'a Player,
    pool: CandidatePool,
}

impl<'a> DecisionContext<'a> {
    #[must_use]
    pub fn new(pieces: &'a PieceSet, board: &'a Board, me: &'a Player, enemy: &'a Player) -> Self {
        Self {
            pieces,
            board,
            me,
            enemy,
            pool: CandidatePool::build(pieces, board, me),
        }
    }

    /// My movable pieces, roster order.
    #[must_use]
    pub fn movable(&self) -> Vec<&'a Piece> {
        self.me.movable(self.pieces).collect()
    }

    /// Enemy pieces I have seen, roster order.
    #[must_use]
    pub fn visible_enemies(&self) -> Vec<&'a Piece> {
        self.enemy.visible(self.pieces).collect()
    }

    #[must_use]
    pub fn pool(&self) -> &CandidatePool {
        &self.pool
    }

    #[must_use]
    pub fn piece(&self, id: PieceId) -> &'a Piece {
        &self.pieces[id]
    }

    /// Does `c` move towards the enemy's back rank?
    #[must_use]
    pub fn advances(&self, c: &Candidate) -> bool {
        (c.dest.y - c.from.y) * self.me.id().forward() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BoardConfig;
    use crate::core::player::{PlayerId, PlayerMap};
    use crate::pieces::UnitTemplate;

    #[test]
    fn test_pool_filters_visible_weaker_targets() {
        let mut board = Board::new(BoardConfig::default(), PlayerMap::new(|p| match p {
            PlayerId::USER => vec![0, 1, 2, 3],
            _ => vec![9, 8, 7, 6],
        }));
        let mut pieces = PieceSet::new();
        let captain = pieces.push(PlayerId::OPPONENT, &UnitTemplate::new("Captain", 6)).unwrap();
        let weak = pieces.push(PlayerId::USER, &UnitTemplate::new("Sergeant", 4)).unwrap();
        let strong = pieces.push(PlayerId::USER, &UnitTemplate::new("Major", 7)).unwrap();
        let hidden = pieces.push(PlayerId::USER, &UnitTemplate::new("Sergeant", 4)).unwrap();
        board.place(&mut pieces, Coord::new(5, 5), captain);
        board.place(&mut pieces, Coord::new(4, 5), weak);
        board.place(&mut pieces, Coord::new(6, 5), strong);
        board.place(&mut pieces, Coord::new(5, 4), hidden);
        pieces[weak].set_hidden(false);
        pieces[strong].set_hidden(false);
        board.get_moves(&mut pieces, captain);

        let me = Player::new(PlayerId::OPPONENT, "AI", vec![captain]);
        let pool = CandidatePool::build(&pieces, &board, &me);

        assert_eq!(pool.all.len(), 4);
        let kept: Vec<Coord> = pool.kept.iter().map(|c| c.dest).collect();
        assert!(!kept.contains(&Coord::new(4, 5)));
        assert!(kept.contains(&Coord::new(6, 5)));
        assert!(kept.contains(&Coord::new(5, 4)));
        assert!(kept.contains(&Coord::new(5, 6)));

        let into_hidden = pool.all.iter().find(|c| c.dest == Coord::new(5, 4)).unwrap();
        assert_eq!(into_hidden.target, Some(hidden));
    }
}
