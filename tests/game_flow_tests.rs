//! End-to-end tests through `GameController` on the classic setup.

use stratego_engine::pieces::ranks;
use stratego_engine::{
    Coord, GameConfig, GameController, GameError, GameResult, PieceId, PlayerId,
};

fn classic_game(seed: u64) -> GameController {
    let mut game = GameController::new(GameConfig::classic().with_seed(seed)).unwrap();
    game.apply_user_preset(1).unwrap();
    game.setup_opponent().unwrap();
    game
}

fn first_movable(game: &GameController, player: PlayerId) -> (PieceId, Coord) {
    game.player(player)
        .movable(game.pieces())
        .map(|p| (p.id(), p.moves()[0]))
        .next()
        .unwrap()
}

#[test]
fn test_classic_setup() {
    let game = classic_game(1);

    assert_eq!(game.board().placed().len(), 80);
    assert_eq!(game.board().neutral_rows().collect::<Vec<_>>(), vec![4, 5]);

    // Preset 1, back row: Bomb Flag Bomb ...
    assert_eq!(game.piece_at(Coord::new(0, 0)).unwrap().name(), "Bomb");
    assert_eq!(game.piece_at(Coord::new(1, 0)).unwrap().strength(), ranks::FLAG);

    for player in PlayerId::all() {
        let rows = game.config().staging[player].clone();
        for piece in game.player(player).pieces(game.pieces()) {
            assert!(rows.contains(&piece.coord().unwrap().y));
            assert!(piece.is_hidden());
        }
    }

    // Only the front rows can move at the start.
    for piece in game.player(PlayerId::USER).movable(game.pieces()) {
        assert_eq!(piece.coord().unwrap().y, 3);
    }
    assert!(game.result().is_none());
}

#[test]
fn test_configured_opponent_preset() {
    let config = GameConfig::classic().with_opponent_preset(Some(3));
    let mut game = GameController::new(config).unwrap();

    assert_eq!(game.setup_opponent().unwrap(), Some(3));
    // Opponent rows are listed back rank first: row 9 holds the first ten entries.
    assert_eq!(game.piece_at(Coord::new(5, 9)).unwrap().name(), "Flag");
    assert_eq!(game.piece_at(Coord::new(6, 6)).unwrap().name(), "Scout");
}

#[test]
fn test_unknown_opponent_preset_is_rejected() {
    let config = GameConfig::classic().with_opponent_preset(Some(8));
    assert_eq!(
        GameController::new(config).unwrap_err(),
        GameError::UnknownPreset { index: 8 }
    );
}

#[test]
fn test_turns_alternate() {
    let mut game = classic_game(5);

    for turn in 0..5u32 {
        let (piece, dest) = first_movable(&game, PlayerId::USER);
        let report = game.play_turn(piece, dest).unwrap().unwrap();

        assert_eq!(report.user_move.player, PlayerId::USER);
        assert_eq!(report.user_move.turn, turn * 2 + 1);
        let reply = report.opponent_move.unwrap();
        assert_eq!(reply.player, PlayerId::OPPONENT);
        assert_eq!(reply.turn, turn * 2 + 2);
    }
    assert_eq!(game.history().len(), 10);

    // Caches are fresh: every cached move is legal right now.
    for piece in game.player(PlayerId::USER).movable(game.pieces()) {
        for &dest in piece.moves() {
            assert!(game.board().can_move(game.pieces(), dest, piece.id()));
        }
    }
}

#[test]
fn test_illegal_user_moves_change_nothing() {
    let mut game = classic_game(2);
    let flag = game.piece_at(Coord::new(1, 0)).unwrap().id();
    let enemy = game.piece_at(Coord::new(0, 6)).unwrap().id();
    let front = game.piece_at(Coord::new(4, 3)).unwrap().id();

    assert!(game.play_turn(flag, Coord::new(1, 1)).unwrap().is_none());
    assert!(game.play_turn(enemy, Coord::new(0, 5)).unwrap().is_none());
    assert!(game.play_turn(front, Coord::new(4, 3)).unwrap().is_none());
    assert!(game.play_turn(front, Coord::new(5, 4)).unwrap().is_none());
    assert!(game.history().is_empty());
    assert!(game.last_turn().is_none());
}

#[test]
fn test_reset_and_replay() {
    let mut game = classic_game(9);
    let (piece, dest) = first_movable(&game, PlayerId::USER);
    game.play_turn(piece, dest).unwrap().unwrap();

    game.reset_pieces().unwrap();
    assert!(game.board().placed().is_empty());
    assert!(game.history().is_empty());
    assert!(game.pieces().iter().all(|p| !p.is_captured()));

    game.apply_user_preset(2).unwrap();
    game.apply_opponent_preset(1).unwrap();
    assert_eq!(game.board().placed().len(), 80);
    assert_eq!(game.piece_at(Coord::new(3, 0)).unwrap().name(), "Flag");
}

#[test]
fn test_game_runs_to_completion_or_stalls() {
    let mut game = classic_game(21);

    for _ in 0..400 {
        if game.result().is_some() {
            break;
        }
        let Some((piece, dest)) = game
            .player(PlayerId::USER)
            .movable(game.pieces())
            .map(|p| (p.id(), p.moves()[0]))
            .next()
        else {
            break;
        };
        if game.play_turn(piece, dest).unwrap().is_none() {
            break;
        }
    }

    for piece in game.pieces().iter() {
        assert_eq!(piece.is_captured(), !piece.position().is_on_board());
    }
    if let Some(GameResult::Winner(winner)) = game.result() {
        assert!(game.player(winner).has_flag(game.pieces()));
        assert!(!game.player(winner.other()).has_flag(game.pieces()));
    }
}

#[test]
fn test_config_from_json() {
    let json = serde_json::to_string(&GameConfig::classic().with_seed(3)).unwrap();
    let config = GameConfig::from_json(&json).unwrap();
    assert_eq!(config.seed, 3);
    assert_eq!(config.pieces_per_player(), 40);

    assert!(matches!(
        GameConfig::from_json("{\"board\": 3}"),
        Err(GameError::InvalidConfig(_))
    ));
}
