//! Computer opponent.
//!
//! - `context`: read-only view of the game plus the candidate move pool
//! - `target`: high-value target selection
//! - `path`: approximate path search towards a target
//! - `stages`: the `DecisionStage` trait and the built-in stages
//! - `opponent`: `HeuristicOpponent`, which runs the stages in order

pub mod context;
pub mod opponent;
pub mod path;
pub mod stages;
pub mod target;

pub use context::{Candidate, CandidatePool, DecisionContext, PlannedMove};
pub use opponent::{Decision, HeuristicOpponent};
pub use path::{find_path, PathMove, MIN_TARGET_STRENGTH};
pub use stages::{Advance, DecisionStage, RandomMove, Scouting, SpecialCapture, TargetPursuit};
pub use target::select_target;
