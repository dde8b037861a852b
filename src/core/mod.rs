//! Core engine types: coordinates, players, configuration, errors, RNG.
//!
//! This module holds the building blocks every other module depends on.

pub mod config;
pub mod coord;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{BoardConfig, GameConfig, Preset, UnitCount};
pub use coord::{Coord, Position};
pub use error::{GameError, Result};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
