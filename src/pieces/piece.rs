//! Piece instances - runtime unit state and combat.
//!
//! A `Piece` is one unit in one game: its template data, owner, where it
//! stands, whether the enemy has seen it, whether it has been captured, and
//! the legal moves computed for it at the last refresh.
//!
//! ## Combat
//!
//! `can_kill` answers "would my attack remove this piece", ignoring
//! self-preservation. `attack_oracle` combines both directions into a single
//! `CombatOutcome`, and `attack` applies that outcome to both pieces.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{ranks, UnitTemplate};
use crate::core::coord::{Coord, Position};
use crate::core::error::{GameError, Result};
use crate::core::player::PlayerId;

/// Cached legal destinations of a piece.
pub type MoveList = SmallVec<[Coord; 8]>;

/// Index of a piece within its game's `PieceSet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u16);

impl PieceId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// Result of one piece attacking another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatOutcome {
    /// The attacker removes the defender and takes its square.
    AttackerWins,
    /// The attacker is removed; the defender holds its square.
    DefenderWins,
    /// Both pieces are removed.
    BothEliminated,
}

impl CombatOutcome {
    /// The same fight seen from the other side.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            CombatOutcome::AttackerWins => CombatOutcome::DefenderWins,
            CombatOutcome::DefenderWins => CombatOutcome::AttackerWins,
            CombatOutcome::BothEliminated => CombatOutcome::BothEliminated,
        }
    }
}

/// A unit in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    owner: PlayerId,
    name: String,
    strength: u8,
    defeats_marshal: bool,
    defuses_bombs: bool,
    move_limit: Option<u8>,
    position: Position,
    hidden: bool,
    captured: bool,
    moves: MoveList,
}

impl Piece {
    /// Create a hidden, off-board piece from a template.
    #[must_use]
    pub fn new(id: PieceId, owner: PlayerId, template: &UnitTemplate) -> Self {
        Self {
            id,
            owner,
            name: template.name.clone(),
            strength: template.strength,
            defeats_marshal: template.defeats_marshal,
            defuses_bombs: template.defuses_bombs,
            move_limit: template.move_limit,
            position: Position::OffBoard,
            hidden: true,
            captured: false,
            moves: MoveList::new(),
        }
    }

    // === Identity ===

    #[must_use]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn strength(&self) -> u8 {
        self.strength
    }

    #[must_use]
    pub fn defeats_marshal(&self) -> bool {
        self.defeats_marshal
    }

    #[must_use]
    pub fn defuses_bombs(&self) -> bool {
        self.defuses_bombs
    }

    /// Squares per move. `None` is unlimited, `Some(0)` is immobile.
    #[must_use]
    pub fn move_limit(&self) -> Option<u8> {
        self.move_limit
    }

    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.move_limit.is_none()
    }

    // === State ===

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The square, if on the board.
    #[must_use]
    pub fn coord(&self) -> Option<Coord> {
        self.position.coord()
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Legal destinations as of the last refresh.
    #[must_use]
    pub fn moves(&self) -> &[Coord] {
        &self.moves
    }

    pub fn set_moves(&mut self, moves: MoveList) {
        self.moves = moves;
    }

    /// Unconditional relocation. Legality is the caller's job.
    pub fn move_to(&mut self, position: impl Into<Position>) {
        self.position = position.into();
    }

    /// Mark captured and take the piece off the board.
    fn capture(&mut self) {
        self.captured = true;
        self.position = Position::OffBoard;
        self.moves.clear();
    }

    // === Combat ===

    /// Would attacking `opponent` remove it?
    #[must_use]
    pub fn can_kill(&self, opponent: &Piece) -> bool {
        (self.defeats_marshal && opponent.strength == ranks::MARSHAL)
            || (self.defuses_bombs && opponent.strength == ranks::BOMB)
            || self.strength >= opponent.strength
    }

    /// Predict the outcome of `self` attacking `opponent`.
    #[must_use]
    pub fn attack_oracle(&self, opponent: &Piece) -> CombatOutcome {
        match (self.can_kill(opponent), opponent.can_kill(self)) {
            (true, true) => {
                if self.defeats_marshal != opponent.defeats_marshal {
                    Self::side_with(self.defeats_marshal)
                } else if self.defuses_bombs != opponent.defuses_bombs {
                    Self::side_with(self.defuses_bombs)
                } else {
                    CombatOutcome::BothEliminated
                }
            }
            (true, false) => CombatOutcome::AttackerWins,
            _ => CombatOutcome::DefenderWins,
        }
    }

    fn side_with(attacker_has_capability: bool) -> CombatOutcome {
        if attacker_has_capability {
            CombatOutcome::AttackerWins
        } else {
            CombatOutcome::DefenderWins
        }
    }

    /// Resolve an attack on `opponent` and apply it to both pieces.
    ///
    /// The winner is revealed. A winning attacker moves onto the defender's
    /// square; a winning defender stays put.
    pub fn attack(&mut self, opponent: &mut Piece) -> Result<CombatOutcome> {
        if self.id == opponent.id {
            return Err(GameError::SelfAttack { piece: self.id.0 });
        }

        let outcome = self.attack_oracle(opponent);
        match outcome {
            CombatOutcome::AttackerWins => {
                self.hidden = false;
                self.position = opponent.position;
                opponent.capture();
            }
            CombatOutcome::DefenderWins => {
                opponent.hidden = false;
                self.capture();
            }
            CombatOutcome::BothEliminated => {
                self.capture();
                opponent.capture();
            }
        }
        Ok(outcome)
    }
}
