//! Board coordinates and piece positions.
//!
//! ## Coord
//!
//! `x` is the column, `y` is the row. Row 0 is the user's back rank.
//!
//! ## Position
//!
//! A piece is either on a board square or off the board. "Off the board"
//! covers both pieces that were never placed and pieces that were captured;
//! `Piece::is_captured` tells the two apart.

use serde::{Deserialize, Serialize};

/// A square on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Create a coordinate from column and row.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this coordinate by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours (up, down, left, right).
    ///
    /// Neighbours may lie outside the board; callers bound-check.
    #[must_use]
    pub const fn neighbors(self) -> [Coord; 4] {
        [
            self.offset(0, 1),
            self.offset(0, -1),
            self.offset(-1, 0),
            self.offset(1, 0),
        ]
    }

    /// True if `other` differs from `self` on exactly one axis.
    #[must_use]
    pub const fn is_orthogonal_to(self, other: Coord) -> bool {
        (self.x == other.x) != (self.y == other.y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Where a piece currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// On a board square.
    OnBoard(Coord),
    /// Not on the board (not yet placed, or captured).
    #[default]
    OffBoard,
}

impl Position {
    /// The square, if on the board.
    #[must_use]
    pub const fn coord(self) -> Option<Coord> {
        match self {
            Position::OnBoard(c) => Some(c),
            Position::OffBoard => None,
        }
    }

    #[must_use]
    pub const fn is_on_board(self) -> bool {
        matches!(self, Position::OnBoard(_))
    }

    /// True if on the board at exactly `at`.
    #[must_use]
    pub fn is_at(self, at: Coord) -> bool {
        self == Position::OnBoard(at)
    }
}

impl From<Coord> for Position {
    fn from(c: Coord) -> Self {
        Position::OnBoard(c)
    }
}
