//! Game orchestration: the controller and its turn records.

pub mod controller;
pub mod record;

pub use controller::GameController;
pub use record::{GameResult, TurnRecord, TurnReport};
