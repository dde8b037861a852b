//! Error types for invariant violations.
//!
//! Illegal moves and placements are ordinary outcomes and are reported as
//! `false` / `None`. The variants here are programmer or configuration errors
//! and should never be silently ignored.

use super::{Coord, PlayerId};

/// Errors raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A piece was asked to attack itself.
    #[error("piece {piece} cannot attack itself")]
    SelfAttack { piece: u16 },

    /// No preset with this index exists.
    #[error("unknown preset {index}")]
    UnknownPreset { index: u32 },

    /// A preset names a piece that the roster cannot supply.
    #[error("invalid preset {index}: no piece named {name:?} available for slot {slot}")]
    PresetPieceMissing { index: u32, name: String, slot: usize },

    /// The number of pieces does not match the staging area.
    #[error("{player} has {pieces} pieces for {capacity} staging squares")]
    StagingCapacity {
        player: PlayerId,
        pieces: usize,
        capacity: usize,
    },

    /// A captured piece cannot be set up again until the pieces are reset.
    #[error("piece {piece} has been captured")]
    PieceCaptured { piece: u16 },

    /// A setup square already holds an enemy piece.
    #[error("square {at} is held by the {holder}")]
    SquareOccupied { at: Coord, holder: PlayerId },

    /// A piece id is not part of this game.
    #[error("unknown piece id {piece}")]
    UnknownPiece { piece: u16 },

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, GameError>;
