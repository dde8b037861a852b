//! High-value target selection.

use crate::pieces::Piece;

/// Pick the enemy piece worth chasing.
///
/// The bound is the strength of my strongest movable piece. Among the visible
/// enemy pieces strictly weaker than the bound, the strongest wins; on equal
/// strength the first one seen is kept.
#[must_use]
pub fn select_target<'a>(
    movable: &[&Piece],
    visible_enemies: impl IntoIterator<Item = &'a Piece>,
) -> Option<&'a Piece> {
    let bound = movable.iter().map(|p| p.strength()).max()?;

    let mut best: Option<&'a Piece> = None;
    for piece in visible_enemies {
        if piece.strength() >= bound {
            continue;
        }
        if best.map_or(true, |b| piece.strength() > b.strength()) {
            best = Some(piece);
        }
    }
    best
}
