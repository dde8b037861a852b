//! Unit registry: the immutable template table plus the piece factory.
//!
//! Pieces are never cloned from a shared prototype. Every reset asks the
//! registry for a fresh roster built from the per-rank counts.

use rustc_hash::FxHashMap;

use super::definition::UnitTemplate;
use super::piece::{Piece, PieceId};
use crate::core::config::UnitCount;
use crate::core::error::{GameError, Result};
use crate::core::player::PlayerId;

/// Registry of unit templates keyed by strength.
///
/// ## Example
///
/// ```
/// use stratego_engine::core::{PlayerId, UnitCount};
/// use stratego_engine::pieces::{UnitRegistry, UnitTemplate};
///
/// let registry = UnitRegistry::new(UnitTemplate::classic()).unwrap();
/// let roster = registry
///     .spawn(PlayerId::USER, &[UnitCount::new(2, 8)], 0)
///     .unwrap();
///
/// assert_eq!(roster.len(), 8);
/// assert!(roster.iter().all(|p| p.name() == "Scout"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct UnitRegistry {
    templates: Vec<UnitTemplate>,
    by_strength: FxHashMap<u8, usize>,
}

impl UnitRegistry {
    /// Build a registry. Strengths must be unique.
    pub fn new(templates: Vec<UnitTemplate>) -> Result<Self> {
        let mut by_strength = FxHashMap::default();
        for (i, template) in templates.iter().enumerate() {
            if by_strength.insert(template.strength, i).is_some() {
                return Err(GameError::InvalidConfig(format!(
                    "duplicate unit strength {}",
                    template.strength
                )));
            }
        }
        Ok(Self {
            templates,
            by_strength,
        })
    }

    /// Template for a strength.
    #[must_use]
    pub fn get(&self, strength: u8) -> Option<&UnitTemplate> {
        self.by_strength.get(&strength).map(|&i| &self.templates[i])
    }

    /// Template by unit name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&UnitTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over templates in table order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitTemplate> {
        self.templates.iter()
    }

    /// Produce a roster for `owner`, in count-table order, with ids starting at `first_id`.
    pub fn spawn(&self, owner: PlayerId, counts: &[UnitCount], first_id: u16) -> Result<Vec<Piece>> {
        let mut pieces = Vec::with_capacity(counts.iter().map(|c| c.count).sum());
        let mut next = usize::from(first_id);

        for entry in counts {
            let template = self.get(entry.strength).ok_or_else(|| {
                GameError::InvalidConfig(format!("no unit template with strength {}", entry.strength))
            })?;

            for _ in 0..entry.count {
                let id = u16::try_from(next).map_err(|_| {
                    GameError::InvalidConfig(format!("piece id {next} does not fit a PieceId"))
                })?;
                pieces.push(Piece::new(PieceId::new(id), owner, template));
                next += 1;
            }
        }

        Ok(pieces)
    }
}
