//! # stratego-engine
//!
//! Rules engine for classic Stratego with a heuristic computer opponent.
//!
//! ## Design Principles
//!
//! 1. **Explicit context**: `GameController` owns the whole game. There is
//!    no global state; every operation goes through it or through the types
//!    it lends out.
//!
//! 2. **Arena-owned pieces**: `PieceSet` owns every piece. `Board` and
//!    `Player` refer to pieces by `PieceId`, so combat can borrow two pieces
//!    mutably at once.
//!
//! 3. **Configuration over convention**: unit templates, per-rank counts,
//!    presets and staging rows come from `GameConfig`. `GameConfig::classic()`
//!    is the standard 40-piece game.
//!
//! ## Modules
//!
//! - `core`: coordinates, players, configuration, errors, RNG
//! - `pieces`: unit templates, piece instances, combat, the piece arena
//! - `players`: rosters and derived views
//! - `board`: occupancy, move legality, placement
//! - `ai`: the computer opponent's decision pipeline
//! - `game`: `GameController` and turn records
//!
//! ## Example
//!
//! ```
//! use stratego_engine::{GameConfig, GameController, PlayerId};
//!
//! let mut game = GameController::new(GameConfig::classic().with_seed(7)).unwrap();
//! game.apply_user_preset(1).unwrap();
//! game.setup_opponent().unwrap();
//!
//! let scout = game
//!     .player(PlayerId::USER)
//!     .movable(game.pieces())
//!     .find(|p| p.is_unlimited())
//!     .map(|p| (p.id(), p.moves()[0]))
//!     .unwrap();
//! let report = game.play_turn(scout.0, scout.1).unwrap().unwrap();
//! assert!(report.opponent_move.is_some());
//! ```

pub mod ai;
pub mod board;
pub mod core;
pub mod game;
pub mod pieces;
pub mod players;

pub use crate::core::{
    BoardConfig, Coord, GameConfig, GameError, GameRng, PlayerId, PlayerMap, Position, Preset,
    UnitCount,
};

pub use crate::pieces::{ranks, CombatOutcome, Piece, PieceId, PieceSet, UnitRegistry, UnitTemplate};

pub use crate::players::Player;

pub use crate::board::Board;

pub use crate::ai::{DecisionContext, DecisionStage, HeuristicOpponent, PlannedMove};

pub use crate::game::{GameController, GameResult, TurnRecord, TurnReport};
