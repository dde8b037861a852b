//! Piece system: unit templates, piece instances, registry and arena.
//!
//! ## Key Types
//!
//! - `UnitTemplate`: Static unit data (name, strength, abilities, move limit)
//! - `UnitRegistry`: Template lookup and roster factory
//! - `Piece`: Runtime unit state and combat rules
//! - `PieceSet`: Arena owning every piece of both players

pub mod definition;
pub mod piece;
pub mod registry;
pub mod set;

pub use definition::{ranks, UnitTemplate};
pub use piece::{CombatOutcome, MoveList, Piece, PieceId};
pub use registry::UnitRegistry;
pub use set::PieceSet;
