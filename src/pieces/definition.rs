//! Unit templates - static unit data.
//!
//! `UnitTemplate` holds the immutable properties of a unit type. For example,
//! the Scout has strength 2 and no move limit. Per-game state (position,
//! visibility, capture) lives in `Piece`.

use serde::{Deserialize, Serialize};

/// Strength values with special meaning in the classic rules.
pub mod ranks {
    /// Capturing it ends the game.
    pub const FLAG: u8 = 0;
    /// Defeats the marshal.
    pub const SPY: u8 = 1;
    /// Moves any distance in a straight line.
    pub const SCOUT: u8 = 2;
    /// Defuses bombs.
    pub const MINER: u8 = 3;
    pub const MARSHAL: u8 = 10;
    /// Immobile; only miners survive attacking it.
    pub const BOMB: u8 = 11;
}

/// Static unit definition.
///
/// ## Example
///
/// ```
/// use stratego_engine::pieces::UnitTemplate;
///
/// let scout = UnitTemplate::new("Scout", 2).unlimited();
/// assert_eq!(scout.move_limit, None);
///
/// let bomb = UnitTemplate::new("Bomb", 11).immobile();
/// assert_eq!(bomb.move_limit, Some(0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTemplate {
    /// Unit name. Presets refer to units by this name.
    pub name: String,

    /// Rank. Unique per template.
    pub strength: u8,

    /// Wins against the marshal regardless of strength.
    #[serde(default)]
    pub defeats_marshal: bool,

    /// Wins against bombs regardless of strength.
    #[serde(default)]
    pub defuses_bombs: bool,

    /// Squares per move. `None` is unlimited, `Some(0)` is immobile.
    #[serde(default)]
    pub move_limit: Option<u8>,
}

impl UnitTemplate {
    /// Create a standard unit (moves one square, no special abilities).
    #[must_use]
    pub fn new(name: impl Into<String>, strength: u8) -> Self {
        Self {
            name: name.into(),
            strength,
            defeats_marshal: false,
            defuses_bombs: false,
            move_limit: Some(1),
        }
    }

    #[must_use]
    pub fn defeats_marshal(mut self) -> Self {
        self.defeats_marshal = true;
        self
    }

    #[must_use]
    pub fn defuses_bombs(mut self) -> Self {
        self.defuses_bombs = true;
        self
    }

    /// No move limit (scout movement).
    #[must_use]
    pub fn unlimited(mut self) -> Self {
        self.move_limit = None;
        self
    }

    /// Cannot move at all.
    #[must_use]
    pub fn immobile(mut self) -> Self {
        self.move_limit = Some(0);
        self
    }

    /// The classic twelve unit types, weakest first.
    #[must_use]
    pub fn classic() -> Vec<UnitTemplate> {
        vec![
            UnitTemplate::new("Flag", ranks::FLAG).immobile(),
            UnitTemplate::new("Spy", ranks::SPY).defeats_marshal(),
            UnitTemplate::new("Scout", ranks::SCOUT).unlimited(),
            UnitTemplate::new("Miner", ranks::MINER).defuses_bombs(),
            UnitTemplate::new("Sergeant", 4),
            UnitTemplate::new("Lieutenant", 5),
            UnitTemplate::new("Captain", 6),
            UnitTemplate::new("Major", 7),
            UnitTemplate::new("Colonel", 8),
            UnitTemplate::new("General", 9),
            UnitTemplate::new("Marshal", ranks::MARSHAL),
            UnitTemplate::new("Bomb", ranks::BOMB).immobile(),
        ]
    }
}
