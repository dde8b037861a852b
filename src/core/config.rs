//! Game configuration types.
//!
//! Front ends configure the engine at startup by providing:
//! - `BoardConfig`: board dimensions
//! - the unit template table and per-rank `UnitCount`s
//! - `Preset` layouts
//! - staging rows per player
//!
//! `GameConfig::classic()` is the standard 10x10, 40-piece game.
//! `GameConfig::from_json` accepts the same structure as JSON.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use super::player::{PlayerId, PlayerMap};
use crate::pieces::definition::{ranks, UnitTemplate};

/// Board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: i32,
    pub columns: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
        }
    }
}

/// How many pieces of one rank each player gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCount {
    pub strength: u8,
    pub count: usize,
}

impl UnitCount {
    #[must_use]
    pub const fn new(strength: u8, count: usize) -> Self {
        Self { strength, count }
    }
}

/// A named starting layout.
///
/// `layout[i]` is the unit name for the i-th staging square, filling each
/// staging row left to right, rows in the order the player's staging rows
/// are listed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub index: u32,
    pub layout: Vec<String>,
}

impl Preset {
    pub fn new<S: AsRef<str>>(index: u32, layout: &[S]) -> Self {
        Self {
            index,
            layout: layout.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    pub board: BoardConfig,

    /// Unit template table.
    pub units: Vec<UnitTemplate>,

    /// Pieces per rank, in roster order.
    pub counts: Vec<UnitCount>,

    #[serde(default)]
    pub presets: Vec<Preset>,

    /// Staging rows per player, back rank first.
    pub staging: PlayerMap<Vec<i32>>,

    /// Preset the opponent sets up with. `None` picks one at random.
    #[serde(default)]
    pub opponent_preset: Option<u32>,

    /// Seed for the game RNG.
    #[serde(default)]
    pub seed: u64,

    pub names: PlayerMap<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    /// The classic game: 10x10 board, two neutral rows, 40 pieces per side.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            board: BoardConfig::default(),
            units: UnitTemplate::classic(),
            counts: classic_counts(),
            presets: classic_presets(),
            staging: PlayerMap::new(|p| match p {
                PlayerId::USER => vec![0, 1, 2, 3],
                _ => vec![9, 8, 7, 6],
            }),
            opponent_preset: None,
            seed: 0,
            names: PlayerMap::new(|p| match p {
                PlayerId::USER => "Player".to_string(),
                _ => "Sarge".to_string(),
            }),
        }
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_opponent_preset(mut self, preset: Option<u32>) -> Self {
        self.opponent_preset = preset;
        self
    }

    #[must_use]
    pub fn with_names(mut self, user: impl Into<String>, opponent: impl Into<String>) -> Self {
        self.names[PlayerId::USER] = user.into();
        self.names[PlayerId::OPPONENT] = opponent.into();
        self
    }

    /// Total pieces per player.
    #[must_use]
    pub fn pieces_per_player(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Number of staging squares for a player.
    #[must_use]
    pub fn staging_capacity(&self, player: PlayerId) -> usize {
        self.staging[player].len() * self.board.columns.max(0) as usize
    }

    /// Look up a preset by index.
    #[must_use]
    pub fn preset(&self, index: u32) -> Option<&Preset> {
        self.presets.iter().find(|p| p.index == index)
    }

    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));
        let BoardConfig { rows, columns } = self.board;

        if rows <= 0 || columns <= 0 {
            return invalid(format!("board must be non-empty, got {rows}x{columns}"));
        }
        if rows != columns {
            return invalid(format!("board must be square, got {rows}x{columns}"));
        }

        for (i, unit) in self.units.iter().enumerate() {
            if self.units[..i].iter().any(|u| u.strength == unit.strength) {
                return invalid(format!("duplicate unit strength {}", unit.strength));
            }
        }
        for count in &self.counts {
            if !self.units.iter().any(|u| u.strength == count.strength) {
                return invalid(format!("count for unknown strength {}", count.strength));
            }
        }
        if !self.counts.iter().any(|c| c.strength == ranks::FLAG && c.count > 0) {
            return invalid("each player needs a flag".to_string());
        }

        for (player, rows_of) in self.staging.iter() {
            if let Some(r) = rows_of.iter().find(|&&r| r < 0 || r >= rows) {
                return invalid(format!("{player} staging row {r} is off the board"));
            }
            for (i, r) in rows_of.iter().enumerate() {
                if rows_of[..i].contains(r) {
                    return invalid(format!("{player} staging row {r} listed twice"));
                }
            }
            let capacity = self.staging_capacity(player);
            if capacity != self.pieces_per_player() {
                return Err(GameError::StagingCapacity {
                    player,
                    pieces: self.pieces_per_player(),
                    capacity,
                });
            }
        }
        let user_rows = &self.staging[PlayerId::USER];
        if let Some(r) = self.staging[PlayerId::OPPONENT]
            .iter()
            .find(|r| user_rows.contains(r))
        {
            return invalid(format!("staging row {r} is shared by both players"));
        }

        for preset in &self.presets {
            if preset.layout.len() != self.pieces_per_player() {
                return invalid(format!(
                    "preset {} has {} entries, expected {}",
                    preset.index,
                    preset.layout.len(),
                    self.pieces_per_player()
                ));
            }
            if let Some(name) = preset
                .layout
                .iter()
                .find(|name| !self.units.iter().any(|u| &u.name == *name))
            {
                return invalid(format!("preset {} names unknown unit {name:?}", preset.index));
            }
        }
        if let Some(index) = self.opponent_preset {
            if self.preset(index).is_none() {
                return Err(GameError::UnknownPreset { index });
            }
        }

        Ok(())
    }
}

fn classic_counts() -> Vec<UnitCount> {
    [1, 1, 8, 5, 4, 4, 4, 3, 2, 1, 1, 6]
        .into_iter()
        .enumerate()
        .map(|(strength, count)| UnitCount::new(strength as u8, count))
        .collect()
}

fn classic_presets() -> Vec<Preset> {
    let rows = |lines: [&str; 4]| -> Vec<String> {
        lines
            .iter()
            .flat_map(|line| line.split_whitespace())
            .map(str::to_string)
            .collect()
    };

    vec![
        Preset {
            index: 1,
            layout: rows([
                "Bomb Flag Bomb Miner Sergeant Miner Bomb Sergeant Lieutenant Miner",
                "Bomb Miner Captain Lieutenant Sergeant Captain Lieutenant Bomb Sergeant Miner",
                "Scout Major Colonel Spy Scout General Major Captain Bomb Scout",
                "Scout Scout Marshal Colonel Scout Captain Lieutenant Major Scout Scout",
            ]),
        },
        Preset {
            index: 2,
            layout: rows([
                "Sergeant Miner Bomb Flag Bomb Miner Miner Sergeant Lieutenant Bomb",
                "Lieutenant Bomb Miner Bomb Captain Sergeant Miner Lieutenant Captain Bomb",
                "Scout Captain Major Spy General Scout Major Colonel Scout Sergeant",
                "Scout Major Scout Marshal Colonel Scout Captain Scout Lieutenant Scout",
            ]),
        },
        Preset {
            index: 3,
            layout: rows([
                "Miner Sergeant Lieutenant Miner Bomb Flag Bomb Miner Sergeant Lieutenant",
                "Captain Bomb Miner Sergeant Major Bomb Miner Captain Bomb Sergeant",
                "Scout Lieutenant Colonel Scout General Spy Marshal Colonel Bomb Scout",
                "Major Scout Captain Scout Scout Lieutenant Scout Major Captain Scout",
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_is_valid() {
        let config = GameConfig::classic();
        assert_eq!(config.pieces_per_player(), 40);
        assert_eq!(config.staging_capacity(PlayerId::USER), 40);
        assert_eq!(config.staging_capacity(PlayerId::OPPONENT), 40);
        assert_eq!(config.presets.len(), 3);
        config.validate().unwrap();
    }

    #[test]
    fn test_classic_presets_match_counts() {
        let config = GameConfig::classic();
        for preset in &config.presets {
            for count in &config.counts {
                let name = &config.units[count.strength as usize].name;
                let found = preset.layout.iter().filter(|n| *n == name).count();
                assert_eq!(found, count.count, "preset {} has {found} {name}", preset.index);
            }
        }
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::classic()
            .with_seed(99)
            .with_opponent_preset(Some(2))
            .with_names("Ada", "Bot");

        assert_eq!(config.seed, 99);
        assert_eq!(config.opponent_preset, Some(2));
        assert_eq!(config.names[PlayerId::USER], "Ada");
        assert_eq!(config.names[PlayerId::OPPONENT], "Bot");
    }

    #[test]
    fn test_rejects_non_square_board() {
        let mut config = GameConfig::classic();
        config.board.columns = 8;
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_capacity_mismatch() {
        let mut config = GameConfig::classic();
        config.counts[2].count = 9;
        assert!(matches!(
            config.validate(),
            Err(GameError::StagingCapacity { pieces: 41, capacity: 40, .. })
        ));
    }

    #[test]
    fn test_rejects_overlapping_staging() {
        let mut config = GameConfig::classic();
        config.staging[PlayerId::OPPONENT] = vec![9, 8, 7, 3];
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_preset() {
        let mut config = GameConfig::classic();
        config.presets[0].layout[0] = "Dragon".to_string();
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let mut config = GameConfig::classic();
        config.presets[1].layout.pop();
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_unknown_opponent_preset() {
        let config = GameConfig::classic().with_opponent_preset(Some(7));
        assert_eq!(config.validate(), Err(GameError::UnknownPreset { index: 7 }));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig::classic().with_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        let parsed = GameConfig::from_json(&json).unwrap();

        assert_eq!(parsed.seed, 5);
        assert_eq!(parsed.units, config.units);
        assert_eq!(parsed.presets, config.presets);
        assert_eq!(parsed.staging, config.staging);
    }

    #[test]
    fn test_from_json_reports_parse_errors() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(GameError::InvalidConfig(_))
        ));
    }
}
