//! Decision stages of the heuristic opponent.
//!
//! Each stage either proposes a move or passes. `HeuristicOpponent` runs
//! them in order and commits the first proposal.
//!
//! | Stage | Draws from | Proposes |
//! |---|---|---|
//! | `TargetPursuit` | cached moves | first step towards the high-value target |
//! | `SpecialCapture` | `pool.all` | miner onto bomb, spy onto marshal |
//! | `Scouting` | `pool.kept` | unlimited mover attacking a hidden piece |
//! | `Advance` | `pool.kept` | forward move, by strength priority |
//! | `RandomMove` | `pool.kept` | uniform random candidate |

use tracing::debug;

use super::context::{DecisionContext, PlannedMove};
use super::path::{find_path, MIN_TARGET_STRENGTH};
use super::target::select_target;
use crate::core::rng::GameRng;
use crate::pieces::{ranks, Piece};

/// One step of the opponent's decision pipeline.
pub trait DecisionStage: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Propose a move, or `None` to defer to the next stage.
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut GameRng) -> Option<PlannedMove>;
}

/// Chase the strongest visible enemy piece that can be beaten.
#[derive(Clone, Debug, Default)]
pub struct TargetPursuit;

impl DecisionStage for TargetPursuit {
    fn name(&self) -> &'static str {
        "target-pursuit"
    }

    fn decide(&self, ctx: &DecisionContext<'_>, _rng: &mut GameRng) -> Option<PlannedMove> {
        let movable = ctx.movable();
        let target = select_target(&movable, ctx.visible_enemies())?;
        if target.strength() <= MIN_TARGET_STRENGTH {
            return None;
        }

        let hunters: Vec<&Piece> = movable
            .iter()
            .copied()
            .filter(|p| p.strength() > target.strength())
            .collect();
        if hunters.is_empty() {
            return None;
        }

        debug!(target = %target.id(), strength = target.strength(), "pursuing target");
        find_path(ctx, target, &hunters).map(|m| PlannedMove {
            piece: m.piece,
            from: m.from,
            to: m.step,
        })
    }
}

/// Miner defusing a bomb, or spy striking a marshal.
#[derive(Clone, Debug, Default)]
pub struct SpecialCapture;

impl DecisionStage for SpecialCapture {
    fn name(&self) -> &'static str {
        "special-capture"
    }

    fn decide(&self, ctx: &DecisionContext<'_>, _rng: &mut GameRng) -> Option<PlannedMove> {
        ctx.pool()
            .all
            .iter()
            .find(|c| {
                let Some(target) = c.target.map(|t| ctx.piece(t)) else {
                    return false;
                };
                if ctx.me.is_owner(target.id()) {
                    return false;
                }
                let mover = ctx.piece(c.piece).strength();
                (mover == ranks::MINER && target.strength() == ranks::BOMB)
                    || (mover == ranks::SPY && target.strength() == ranks::MARSHAL)
            })
            .map(|c| c.planned())
    }
}

/// Probe a hidden piece with an unlimited mover.
#[derive(Clone, Debug, Default)]
pub struct Scouting;

impl DecisionStage for Scouting {
    fn name(&self) -> &'static str {
        "scouting"
    }

    fn decide(&self, ctx: &DecisionContext<'_>, _rng: &mut GameRng) -> Option<PlannedMove> {
        ctx.pool()
            .kept
            .iter()
            .find(|c| {
                ctx.piece(c.piece).is_unlimited()
                    && c.target.is_some_and(|t| ctx.piece(t).is_hidden())
            })
            .map(|c| c.planned())
    }
}

/// Push forward, trying strengths in a fixed priority order.
#[derive(Clone, Debug)]
pub struct Advance {
    pub priority: Vec<u8>,
}

impl Advance {
    /// Mid ranks lead; spy and scout go last.
    pub const CLASSIC_PRIORITY: [u8; 10] = [6, 5, 4, 10, 9, 8, 7, 3, 1, 2];
}

impl Default for Advance {
    fn default() -> Self {
        Self {
            priority: Self::CLASSIC_PRIORITY.to_vec(),
        }
    }
}

impl DecisionStage for Advance {
    fn name(&self) -> &'static str {
        "advance"
    }

    fn decide(&self, ctx: &DecisionContext<'_>, _rng: &mut GameRng) -> Option<PlannedMove> {
        let kept = &ctx.pool().kept;
        self.priority.iter().find_map(|&strength| {
            kept.iter()
                .find(|c| ctx.piece(c.piece).strength() == strength && ctx.advances(c))
                .map(|c| c.planned())
        })
    }
}

/// Any remaining candidate, uniformly.
#[derive(Clone, Debug, Default)]
pub struct RandomMove;

impl DecisionStage for RandomMove {
    fn name(&self) -> &'static str {
        "random"
    }

    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut GameRng) -> Option<PlannedMove> {
        rng.choose(&ctx.pool().kept).map(|c| c.planned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::core::config::BoardConfig;
    use crate::core::coord::Coord;
    use crate::core::player::{PlayerId, PlayerMap};
    use crate::players::Player;
    use crate::pieces::{PieceId, PieceSet, UnitTemplate};

    struct Scene {
        board: Board,
        pieces: PieceSet,
        ai: Vec<PieceId>,
        user: Vec<PieceId>,
    }

    impl Scene {
        fn new() -> Self {
            Self {
                board: Board::new(BoardConfig::default(), PlayerMap::new(|p| match p {
                    PlayerId::USER => vec![0, 1, 2, 3],
                    _ => vec![9, 8, 7, 6],
                })),
                pieces: PieceSet::new(),
                ai: Vec::new(),
                user: Vec::new(),
            }
        }

        fn add(&mut self, owner: PlayerId, strength: u8, at: (i32, i32)) -> PieceId {
            let template = UnitTemplate::classic()
                .into_iter()
                .find(|u| u.strength == strength)
                .unwrap();
            let id = self.pieces.push(owner, &template).unwrap();
            self.board.place(&mut self.pieces, Coord::from(at), id);
            if owner == PlayerId::USER {
                self.user.push(id);
            } else {
                self.ai.push(id);
            }
            id
        }

        fn reveal(&mut self, id: PieceId) {
            self.pieces[id].set_hidden(false);
        }

        fn run(&mut self, stage: &dyn DecisionStage) -> Option<PlannedMove> {
            for id in self.board.placed().to_vec() {
                self.board.get_moves(&mut self.pieces, id);
            }
            let me = Player::new(PlayerId::OPPONENT, "AI", self.ai.clone());
            let enemy = Player::new(PlayerId::USER, "User", self.user.clone());
            let ctx = DecisionContext::new(&self.pieces, &self.board, &me, &enemy);
            stage.decide(&ctx, &mut GameRng::new(1))
        }
    }

    #[test]
    fn test_pursuit_needs_visible_target() {
        let mut s = Scene::new();
        s.add(PlayerId::OPPONENT, 9, (4, 7));
        s.add(PlayerId::USER, 6, (4, 4));

        assert!(s.run(&TargetPursuit).is_none());
    }

    #[test]
    fn test_pursuit_moves_towards_target() {
        let mut s = Scene::new();
        let general = s.add(PlayerId::OPPONENT, 9, (4, 7));
        let captain = s.add(PlayerId::USER, 6, (4, 4));
        s.reveal(captain);

        let planned = s.run(&TargetPursuit).unwrap();
        assert_eq!(planned.piece, general);
        assert_eq!(planned.to, Coord::new(4, 6));
    }

    #[test]
    fn test_pursuit_skips_low_value_targets() {
        let mut s = Scene::new();
        s.add(PlayerId::OPPONENT, 9, (4, 7));
        let scout = s.add(PlayerId::USER, ranks::SCOUT, (4, 4));
        s.reveal(scout);

        assert!(s.run(&TargetPursuit).is_none());
    }

    #[test]
    fn test_special_capture() {
        let mut s = Scene::new();
        s.add(PlayerId::OPPONENT, 7, (0, 7));
        let miner = s.add(PlayerId::OPPONENT, ranks::MINER, (5, 5));
        s.add(PlayerId::USER, ranks::BOMB, (5, 4));

        let planned = s.run(&SpecialCapture).unwrap();
        assert_eq!(planned.piece, miner);
        assert_eq!(planned.to, Coord::new(5, 4));
    }

    #[test]
    fn test_special_capture_spy() {
        let mut s = Scene::new();
        let spy = s.add(PlayerId::OPPONENT, ranks::SPY, (2, 5));
        s.add(PlayerId::USER, ranks::MARSHAL, (3, 5));

        let planned = s.run(&SpecialCapture).unwrap();
        assert_eq!(planned.piece, spy);
        assert_eq!(planned.to, Coord::new(3, 5));
    }

    #[test]
    fn test_special_capture_passes_without_match() {
        let mut s = Scene::new();
        s.add(PlayerId::OPPONENT, ranks::MINER, (5, 5));
        s.add(PlayerId::USER, ranks::MARSHAL, (5, 4));

        assert!(s.run(&SpecialCapture).is_none());
    }

    #[test]
    fn test_scouting_hits_hidden_piece() {
        let mut s = Scene::new();
        let scout = s.add(PlayerId::OPPONENT, ranks::SCOUT, (3, 9));
        s.add(PlayerId::USER, 5, (3, 2));

        let planned = s.run(&Scouting).unwrap();
        assert_eq!(planned.piece, scout);
        assert_eq!(planned.to, Coord::new(3, 2));
    }

    #[test]
    fn test_scouting_ignores_revealed_piece() {
        let mut s = Scene::new();
        s.add(PlayerId::OPPONENT, ranks::SCOUT, (3, 9));
        let lieutenant = s.add(PlayerId::USER, 5, (3, 2));
        s.reveal(lieutenant);

        assert!(s.run(&Scouting).is_none());
    }

    #[test]
    fn test_advance_follows_priority() {
        let mut s = Scene::new();
        s.add(PlayerId::OPPONENT, 10, (0, 8));
        let captain = s.add(PlayerId::OPPONENT, 6, (8, 8));

        let planned = s.run(&Advance::default()).unwrap();
        assert_eq!(planned.piece, captain);
        assert_eq!(planned.to, Coord::new(8, 7));
    }

    #[test]
    fn test_advance_requires_forward_move() {
        let mut s = Scene::new();
        // Boxed in on every side but the back.
        let sergeant = s.add(PlayerId::OPPONENT, 4, (5, 8));
        s.add(PlayerId::OPPONENT, ranks::BOMB, (5, 7));
        s.add(PlayerId::OPPONENT, ranks::BOMB, (4, 8));
        s.add(PlayerId::OPPONENT, ranks::BOMB, (6, 8));

        assert!(s.run(&Advance::default()).is_none());
        let planned = s.run(&RandomMove).unwrap();
        assert_eq!(planned.piece, sergeant);
        assert_eq!(planned.to, Coord::new(5, 9));
    }

    #[test]
    fn test_random_empty_pool() {
        let mut s = Scene::new();
        s.add(PlayerId::OPPONENT, ranks::BOMB, (5, 8));
        assert!(s.run(&RandomMove).is_none());
    }
}
