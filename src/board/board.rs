//! The board: placed pieces, move legality and placement.
//!
//! The board does not own pieces. It keeps the list of `PieceId`s that have
//! been placed (pieces of both players, captured ones included) and looks up
//! positions and ownership in the `PieceSet` passed to each call.
//!
//! ## Legality pipeline
//!
//! `can_move` applies its checks in a fixed order; the first failing check
//! rejects the move:
//!
//! 1. mover must be on the board
//! 2. destination differs from the current square
//! 3. destination is on the same row or column
//! 4. destination is not held by a friendly piece
//! 5. destination is on the board
//! 6. move limit (finite limit: distance; zero: never; unlimited: clear path)
//!
//! An enemy-held destination passes every check: moving there is an attack.

use serde::{Deserialize, Serialize};

use crate::core::config::BoardConfig;
use crate::core::coord::Coord;
use crate::core::error::{GameError, Result};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::pieces::{MoveList, PieceId, PieceSet};

/// Square grid of placed pieces.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    rows: i32,
    columns: i32,
    staging: PlayerMap<Vec<i32>>,
    placed: Vec<PieceId>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(dimensions: BoardConfig, staging: PlayerMap<Vec<i32>>) -> Self {
        Self {
            rows: dimensions.rows,
            columns: dimensions.columns,
            staging,
            placed: Vec::new(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Staging rows of a player, back rank first.
    #[must_use]
    pub fn staging_rows(&self, player: PlayerId) -> &[i32] {
        &self.staging[player]
    }

    /// Rows no player may set up in.
    pub fn neutral_rows(&self) -> impl Iterator<Item = i32> + '_ {
        (0..self.rows).filter(move |r| self.staging.iter().all(|(_, rows)| !rows.contains(r)))
    }

    /// Placed pieces, in placement order.
    #[must_use]
    pub fn placed(&self) -> &[PieceId] {
        &self.placed
    }

    /// Remove every piece from the board.
    pub fn reset(&mut self) {
        self.placed.clear();
    }

    #[must_use]
    pub fn in_bounds(&self, at: Coord) -> bool {
        (0..self.columns).contains(&at.x) && (0..self.rows).contains(&at.y)
    }

    /// Every square in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| Coord::new(x, y)))
    }

    /// The piece standing on `at`, if any.
    #[must_use]
    pub fn is_occupied(&self, pieces: &PieceSet, at: Coord) -> Option<PieceId> {
        self.placed
            .iter()
            .copied()
            .find(|&id| pieces.get(id).is_some_and(|p| p.position().is_at(at)))
    }

    /// Same side or not, judged relative to the user.
    ///
    /// Two pieces are friendly when the user owns both or neither of them.
    #[must_use]
    pub fn are_friendly(&self, pieces: &PieceSet, a: PieceId, b: PieceId) -> bool {
        match (pieces.get(a), pieces.get(b)) {
            (Some(a), Some(b)) => {
                (a.owner() == PlayerId::USER) == (b.owner() == PlayerId::USER)
            }
            _ => false,
        }
    }

    /// Can `piece` legally move to (or attack) `dest`?
    #[must_use]
    pub fn can_move(&self, pieces: &PieceSet, dest: Coord, piece: PieceId) -> bool {
        let Some(mover) = pieces.get(piece) else {
            return false;
        };
        let Some(from) = mover.coord() else {
            return false;
        };

        if from == dest || !from.is_orthogonal_to(dest) {
            return false;
        }
        if self
            .is_occupied(pieces, dest)
            .is_some_and(|other| self.are_friendly(pieces, piece, other))
        {
            return false;
        }
        if !self.in_bounds(dest) {
            return false;
        }

        match mover.move_limit() {
            Some(0) => false,
            Some(limit) => {
                let limit = i32::from(limit);
                (from.x - dest.x).abs() <= limit && (from.y - dest.y).abs() <= limit
            }
            None => self.path_is_clear(pieces, from, dest, piece),
        }
    }

    /// True if no piece other than `mover` stands strictly between `from` and `to`.
    fn path_is_clear(&self, pieces: &PieceSet, from: Coord, to: Coord, mover: PieceId) -> bool {
        let step = Coord::new((to.x - from.x).signum(), (to.y - from.y).signum());
        let mut at = from.offset(step.x, step.y);
        while at != to {
            if self.is_occupied(pieces, at).is_some_and(|other| other != mover) {
                return false;
            }
            at = at.offset(step.x, step.y);
        }
        true
    }

    /// Every legal destination of `piece`, scanning the whole board.
    #[must_use]
    pub fn legal_moves(&self, pieces: &PieceSet, piece: PieceId) -> MoveList {
        self.squares()
            .filter(|&dest| self.can_move(pieces, dest, piece))
            .collect()
    }

    /// Recompute and cache the legal moves of `piece`.
    pub fn get_moves(&self, pieces: &mut PieceSet, piece: PieceId) -> MoveList {
        let moves = self.legal_moves(pieces, piece);
        if let Some(p) = pieces.get_mut(piece) {
            p.set_moves(moves.clone());
        }
        moves
    }

    /// Place a piece during setup.
    ///
    /// Rejects captured pieces, and squares off the board, outside the
    /// owner's staging rows (which excludes every neutral row), or already
    /// occupied.
    pub fn add_piece(&mut self, pieces: &mut PieceSet, at: Coord, piece: PieceId) -> bool {
        let Some(owner) = pieces.get(piece).filter(|p| !p.is_captured()).map(|p| p.owner()) else {
            return false;
        };
        if !self.in_bounds(at) || !self.staging[owner].contains(&at.y) {
            return false;
        }
        if self.is_occupied(pieces, at).is_some() {
            return false;
        }

        pieces[piece].move_to(at);
        if !self.placed.contains(&piece) {
            self.placed.push(piece);
        }
        true
    }

    /// Put `piece` on `at` unconditionally and register it as placed.
    pub(crate) fn place(&mut self, pieces: &mut PieceSet, at: Coord, piece: PieceId) {
        pieces[piece].move_to(at);
        if !self.placed.contains(&piece) {
            self.placed.push(piece);
        }
    }

    /// Scatter a whole roster randomly over `player`'s staging rows.
    pub fn place_shuffled(
        &mut self,
        pieces: &mut PieceSet,
        rng: &mut GameRng,
        player: PlayerId,
        roster: &[PieceId],
    ) -> Result<()> {
        if let Some(&id) = roster.iter().find(|&&id| pieces.get(id).is_some_and(|p| p.is_captured())) {
            return Err(GameError::PieceCaptured { piece: id.0 });
        }
        let capacity = self.staging[player].len() * self.columns.max(0) as usize;
        if roster.len() != capacity {
            return Err(GameError::StagingCapacity {
                player,
                pieces: roster.len(),
                capacity,
            });
        }

        let mut order = roster.to_vec();
        rng.shuffle(&mut order);

        let squares: Vec<Coord> = self.staging[player]
            .iter()
            .flat_map(|&y| (0..self.columns).map(move |x| Coord::new(x, y)))
            .collect();
        for (at, id) in squares.into_iter().zip(order) {
            self.place(pieces, at, id);
        }
        Ok(())
    }
}
