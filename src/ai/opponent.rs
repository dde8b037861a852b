//! The computer opponent: an ordered list of decision stages.

use tracing::debug;

use super::context::{DecisionContext, PlannedMove};
use super::stages::{Advance, DecisionStage, RandomMove, Scouting, SpecialCapture, TargetPursuit};
use crate::core::rng::GameRng;

/// A decision together with the stage that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub stage: &'static str,
    pub planned: PlannedMove,
}

/// Runs its stages in order; the first proposal wins.
pub struct HeuristicOpponent {
    stages: Vec<Box<dyn DecisionStage>>,
}

impl HeuristicOpponent {
    /// An opponent with custom stages.
    #[must_use]
    pub fn new(stages: Vec<Box<dyn DecisionStage>>) -> Self {
        Self { stages }
    }

    /// Pursuit first, then special captures, scouting, advancing, and a random move.
    #[must_use]
    pub fn classic() -> Self {
        Self::new(vec![
            Box::new(TargetPursuit),
            Box::new(SpecialCapture),
            Box::new(Scouting),
            Box::new(Advance::default()),
            Box::new(RandomMove),
        ])
    }

    /// Stage names, in order.
    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|s| s.name())
    }

    /// Choose a move, or `None` if no stage has anything to offer.
    pub fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut GameRng) -> Option<Decision> {
        for stage in &self.stages {
            if let Some(planned) = stage.decide(ctx, rng) {
                debug!(
                    stage = stage.name(),
                    piece = %planned.piece,
                    from = %planned.from,
                    to = %planned.to,
                    "opponent decided"
                );
                return Some(Decision {
                    stage: stage.name(),
                    planned,
                });
            }
        }
        debug!(player = %ctx.me.id(), "opponent has no move");
        None
    }
}

impl Default for HeuristicOpponent {
    fn default() -> Self {
        Self::classic()
    }
}

impl std::fmt::Debug for HeuristicOpponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicOpponent")
            .field("stages", &self.stage_names().collect::<Vec<_>>())
            .finish()
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
    use crate::pieces::{ranks, PieceSet, UnitTemplate};

    struct Never;

    impl DecisionStage for Never {
        fn name(&self) -> &'static str {
            "never"
        }

        fn decide(&self, _ctx: &DecisionContext<'_>, _rng: &mut GameRng) -> Option<PlannedMove> {
            None
        }
    }

    fn unit(strength: u8) -> UnitTemplate {
        UnitTemplate::classic()
            .into_iter()
            .find(|u| u.strength == strength)
            .unwrap()
    }

    #[test]
    fn test_classic_stage_order() {
        let ai = HeuristicOpponent::default();
        assert_eq!(
            ai.stage_names().collect::<Vec<_>>(),
            vec!["target-pursuit", "special-capture", "scouting", "advance", "random"]
        );
        assert!(format!("{ai:?}").contains("special-capture"));
    }

    #[test]
    fn test_first_proposal_wins() {
        let mut board = Board::new(BoardConfig::default(), PlayerMap::new(|p| match p {
            PlayerId::USER => vec![0, 1, 2, 3],
            _ => vec![9, 8, 7, 6],
        }));
        let mut pieces = PieceSet::new();
        let miner = pieces.push(PlayerId::OPPONENT, &unit(ranks::MINER)).unwrap();
        let bomb = pieces.push(PlayerId::USER, &unit(ranks::BOMB)).unwrap();
        board.place(&mut pieces, Coord::new(2, 5), miner);
        board.place(&mut pieces, Coord::new(2, 4), bomb);
        board.get_moves(&mut pieces, miner);

        let me = Player::new(PlayerId::OPPONENT, "AI", vec![miner]);
        let enemy = Player::new(PlayerId::USER, "User", vec![bomb]);
        let ctx = DecisionContext::new(&pieces, &board, &me, &enemy);

        let decision = HeuristicOpponent::classic()
            .decide(&ctx, &mut GameRng::new(0))
            .unwrap();
        assert_eq!(decision.stage, "special-capture");
        assert_eq!(decision.planned.to, Coord::new(2, 4));

        let idle = HeuristicOpponent::new(vec![Box::new(Never)]);
        assert!(idle.decide(&ctx, &mut GameRng::new(0)).is_none());
    }
}
