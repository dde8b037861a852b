//! A player's roster and the views derived from it.
//!
//! The roster is a fixed list of `PieceId`s set at construction or reset.
//! Every view (alive, captured, movable, visible) is recomputed from the
//! `PieceSet` on each call; nothing is cached here.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;
use crate::pieces::{ranks, Piece, PieceId, PieceSet};

/// One side of the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    roster: Vec<PieceId>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, roster: Vec<PieceId>) -> Self {
        Self {
            id,
            name: name.into(),
            roster,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Piece ids in roster order.
    #[must_use]
    pub fn roster(&self) -> &[PieceId] {
        &self.roster
    }

    /// Mutable roster, for preset reordering.
    pub fn roster_mut(&mut self) -> &mut Vec<PieceId> {
        &mut self.roster
    }

    /// Replace the roster with a freshly spawned one.
    pub fn reset(&mut self, roster: Vec<PieceId>) {
        self.roster = roster;
    }

    #[must_use]
    pub fn is_owner(&self, piece: PieceId) -> bool {
        self.roster.contains(&piece)
    }

    /// Every owned piece, in roster order.
    pub fn pieces<'a>(&'a self, set: &'a PieceSet) -> impl Iterator<Item = &'a Piece> + 'a {
        self.roster.iter().filter_map(move |&id| set.get(id))
    }

    pub fn alive<'a>(&'a self, set: &'a PieceSet) -> impl Iterator<Item = &'a Piece> + 'a {
        self.pieces(set).filter(|p| !p.is_captured())
    }

    pub fn captured<'a>(&'a self, set: &'a PieceSet) -> impl Iterator<Item = &'a Piece> + 'a {
        self.pieces(set).filter(|p| p.is_captured())
    }

    /// Alive pieces with at least one cached move. Only as fresh as the last refresh.
    pub fn movable<'a>(&'a self, set: &'a PieceSet) -> impl Iterator<Item = &'a Piece> + 'a {
        self.alive(set).filter(|p| !p.moves().is_empty())
    }

    /// Alive pieces the enemy has seen.
    pub fn visible<'a>(&'a self, set: &'a PieceSet) -> impl Iterator<Item = &'a Piece> + 'a {
        self.alive(set).filter(|p| !p.is_hidden())
    }

    #[must_use]
    pub fn has_flag(&self, set: &PieceSet) -> bool {
        self.alive(set).any(|p| p.strength() == ranks::FLAG)
    }
}
