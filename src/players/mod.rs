//! Players: rosters and derived piece views.

pub mod player;

pub use player::Player;
