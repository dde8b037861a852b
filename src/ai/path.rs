//! Approximate path search towards a target piece.
//!
//! For every candidate piece and every first step it can take, a
//! breadth-first flood from that step measures how many moves it would take
//! to reach the target. The first step with the smallest measured distance
//! wins; the first one recorded wins ties.
//!
//! Occupied squares are walls, friendly and enemy alike. Only the target's
//! own square may be entered. Each flood has its own visited set, so results
//! depend on candidate order and are not a global shortest path.

use rustc_hash::FxHashSet;
use tracing::trace;

use super::context::DecisionContext;
use crate::core::coord::Coord;
use crate::pieces::{Piece, PieceId};

/// Targets at or below this strength are not worth a search.
pub const MIN_TARGET_STRENGTH: u8 = 2;

/// The step chosen by the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathMove {
    pub piece: PieceId,
    pub from: Coord,
    pub step: Coord,
    /// Moves needed to reach the target, counting `step` as the first.
    pub distance: u32,
}

/// Search for the quickest first step any candidate can take towards `target`.
#[must_use]
pub fn find_path(ctx: &DecisionContext<'_>, target: &Piece, candidates: &[&Piece]) -> Option<PathMove> {
    let goal = target.coord()?;

    let walls: FxHashSet<Coord> = ctx
        .board
        .placed()
        .iter()
        .filter_map(|&id| ctx.pieces.get(id))
        .filter_map(Piece::coord)
        .filter(|&c| c != goal)
        .collect();
    let passable = |c: Coord| ctx.board.in_bounds(c) && !walls.contains(&c);

    let mut best: Option<PathMove> = None;
    for piece in candidates {
        let Some(from) = piece.coord() else {
            continue;
        };

        for &step in piece.moves() {
            let distance = if step == goal {
                Some(1)
            } else if walls.contains(&step) {
                None
            } else {
                flood_distance(step, goal, &passable)
            };

            let Some(distance) = distance else {
                continue;
            };
            trace!(piece = %piece.id(), %step, distance, "path found");

            if best.map_or(true, |b| distance < b.distance) {
                best = Some(PathMove {
                    piece: piece.id(),
                    from,
                    step,
                    distance,
                });
            }
        }
    }
    best
}

/// Layers from `start` (layer 1) until `goal` appears, or `None` if the flood dies out.
fn flood_distance(start: Coord, goal: Coord, passable: &impl Fn(Coord) -> bool) -> Option<u32> {
    let mut visited = FxHashSet::default();
    visited.insert(start);
    let mut frontier = vec![start];
    let mut distance = 1;

    while !frontier.is_empty() {
        distance += 1;
        let mut next = Vec::new();
        for at in frontier {
            for n in at.neighbors() {
                if passable(n) && visited.insert(n) {
                    next.push(n);
                }
            }
        }
        if next.contains(&goal) {
            return Some(distance);
        }
        frontier = next;
    }
    None
}
