//! The piece arena.
//!
//! `PieceSet` owns every piece of both players. `Board` and `Player` only hold
//! `PieceId`s into it, so two pieces can be borrowed mutably at once for
//! combat without shared mutable references.

use std::ops::{Index, IndexMut};

use super::definition::UnitTemplate;
use super::piece::{CombatOutcome, Piece, PieceId};
use crate::core::error::{GameError, Result};
use crate::core::player::PlayerId;

/// All pieces in a game, indexed by `PieceId`.
#[derive(Clone, Debug, Default)]
pub struct PieceSet {
    pieces: Vec<Piece>,
}

impl PieceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new off-board piece built from `template` and return its id.
    ///
    /// Fails once every `PieceId` is taken.
    pub fn push(&mut self, owner: PlayerId, template: &UnitTemplate) -> Result<PieceId> {
        let id = u16::try_from(self.pieces.len())
            .map(PieceId::new)
            .map_err(|_| GameError::InvalidConfig(format!("too many pieces: {}", self.pieces.len())))?;
        self.pieces.push(Piece::new(id, owner, template));
        Ok(id)
    }

    /// Append pieces produced by `UnitRegistry::spawn`.
    ///
    /// Ids must continue the existing numbering.
    pub fn extend(&mut self, pieces: Vec<Piece>) -> Result<()> {
        for piece in pieces {
            if piece.id().index() != self.pieces.len() {
                return Err(GameError::UnknownPiece { piece: piece.id().0 });
            }
            self.pieces.push(piece);
        }
        Ok(())
    }

    /// Drop every piece.
    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.index())
    }

    /// Like `get`, but an unknown id is an error.
    pub fn try_get(&self, id: PieceId) -> Result<&Piece> {
        self.get(id).ok_or(GameError::UnknownPiece { piece: id.0 })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Resolve `attacker` attacking `defender`, mutating both.
    pub fn attack(&mut self, attacker: PieceId, defender: PieceId) -> Result<CombatOutcome> {
        let (a, d) = (attacker.index(), defender.index());
        if a == d {
            return Err(GameError::SelfAttack { piece: attacker.0 });
        }
        let len = self.pieces.len();
        if a >= len {
            return Err(GameError::UnknownPiece { piece: attacker.0 });
        }
        if d >= len {
            return Err(GameError::UnknownPiece { piece: defender.0 });
        }

        if a < d {
            let (left, right) = self.pieces.split_at_mut(d);
            left[a].attack(&mut right[0])
        } else {
            let (left, right) = self.pieces.split_at_mut(a);
            right[0].attack(&mut left[d])
        }
    }
}

impl Index<PieceId> for PieceSet {
    type Output = Piece;

    fn index(&self, id: PieceId) -> &Self::Output {
        &self.pieces[id.index()]
    }
}

impl IndexMut<PieceId> for PieceSet {
    fn index_mut(&mut self, id: PieceId) -> &mut Self::Output {
        &mut self.pieces[id.index()]
    }
}
