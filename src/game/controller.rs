//! Turn orchestration.
//!
//! `GameController` owns the whole game: configuration, unit registry, piece
//! arena, both players, the board, the RNG, the computer opponent and the
//! turn history. Front ends drive it through placement, preset and move
//! calls and read state back through the accessors.
//!
//! Every mutator leaves the move caches fresh, so `Piece::moves` can be read
//! for highlighting right after any call.

use im::Vector;
use tracing::{debug, info};

use super::record::{GameResult, TurnRecord, TurnReport};
use crate::ai::{DecisionContext, HeuristicOpponent};
use crate::board::Board;
use crate::core::config::GameConfig;
use crate::core::coord::Coord;
use crate::core::error::{GameError, Result};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::players::Player;
use crate::pieces::{Piece, PieceId, PieceSet, UnitRegistry};

/// A single game between the user and the computer opponent.
#[derive(Debug)]
pub struct GameController {
    config: GameConfig,
    registry: UnitRegistry,
    pieces: PieceSet,
    players: PlayerMap<Player>,
    board: Board,
    rng: GameRng,
    opponent: HeuristicOpponent,
    history: Vector<TurnRecord>,
}

impl GameController {
    /// Validate `config` and build a game with fresh, unplaced pieces.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let registry = UnitRegistry::new(config.units.clone())?;
        let board = Board::new(config.board, config.staging.clone());
        let players = PlayerMap::new(|p| Player::new(p, config.names[p].clone(), Vec::new()));
        let rng = GameRng::new(config.seed);

        let mut game = Self {
            config,
            registry,
            pieces: PieceSet::new(),
            players,
            board,
            rng,
            opponent: HeuristicOpponent::classic(),
            history: Vector::new(),
        };
        game.reset_pieces()?;

        info!(
            seed = game.config.seed,
            pieces = game.config.pieces_per_player(),
            "game created"
        );
        Ok(game)
    }

    /// Replace the computer opponent.
    #[must_use]
    pub fn with_opponent(mut self, opponent: HeuristicOpponent) -> Self {
        self.opponent = opponent;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    #[must_use]
    pub fn pieces(&self) -> &PieceSet {
        &self.pieces
    }

    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn opponent(&self) -> &HeuristicOpponent {
        &self.opponent
    }

    /// The piece on `at`, if any.
    #[must_use]
    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        self.board
            .is_occupied(&self.pieces, at)
            .and_then(|id| self.pieces.get(id))
    }

    /// Every committed move, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// The opponent's most recent move.
    #[must_use]
    pub fn last_turn(&self) -> Option<&TurnRecord> {
        self.history.iter().rev().find(|r| r.player == PlayerId::OPPONENT)
    }

    // === Setup ===

    /// Fresh pieces for both players; the board and history are cleared.
    pub fn reset_pieces(&mut self) -> Result<()> {
        self.pieces.clear();
        self.board.reset();
        self.history = Vector::new();

        for player in PlayerId::all() {
            let first_id = u16::try_from(self.pieces.len()).map_err(|_| {
                GameError::InvalidConfig(format!("too many pieces: {}", self.pieces.len()))
            })?;
            let spawned = self.registry.spawn(player, &self.config.counts, first_id)?;
            let roster = spawned.iter().map(Piece::id).collect();
            self.pieces.extend(spawned)?;
            self.players[player].reset(roster);
        }

        debug!(pieces = self.pieces.len(), "pieces reset");
        Ok(())
    }

    /// Recompute the cached moves of every placed piece still in play.
    pub fn update_moves(&mut self) {
        for &id in self.board.placed() {
            if self.pieces.get(id).is_some_and(|p| p.position().is_on_board()) {
                self.board.get_moves(&mut self.pieces, id);
            }
        }
    }

    /// Lay out `player`'s roster according to preset `index` over `rows`.
    ///
    /// The roster is reordered so that slot `i` holds the first piece named
    /// `layout[i]` not already used by an earlier slot. Pieces then fill the
    /// rows left to right, in the order the rows are given.
    ///
    /// Fails without touching the board when a roster piece has been
    /// captured or a target square holds the other side's piece.
    pub fn apply_preset(&mut self, index: u32, player: PlayerId, rows: &[i32]) -> Result<()> {
        let layout = self
            .config
            .preset(index)
            .ok_or(GameError::UnknownPreset { index })?
            .layout
            .clone();

        let capacity = rows.len() * self.board.columns().max(0) as usize;
        let mut roster = self.players[player].roster().to_vec();
        for pieces in [roster.len(), layout.len()] {
            if pieces != capacity {
                return Err(GameError::StagingCapacity {
                    player,
                    pieces,
                    capacity,
                });
            }
        }
        if let Some(&row) = rows.iter().find(|&&r| !(0..self.board.rows()).contains(&r)) {
            return Err(GameError::InvalidConfig(format!("row {row} is off the board")));
        }
        if let Some(&id) = roster.iter().find(|&&id| self.pieces[id].is_captured()) {
            return Err(GameError::PieceCaptured { piece: id.0 });
        }

        let columns = self.board.columns();
        let squares: Vec<Coord> = rows
            .iter()
            .flat_map(|&y| (0..columns).map(move |x| Coord::new(x, y)))
            .collect();
        for &at in &squares {
            let holder = self
                .board
                .is_occupied(&self.pieces, at)
                .map(|id| self.pieces[id].owner())
                .filter(|&owner| owner != player);
            if let Some(holder) = holder {
                return Err(GameError::SquareOccupied { at, holder });
            }
        }

        for (slot, name) in layout.iter().enumerate() {
            let found = roster[slot..]
                .iter()
                .position(|&id| self.pieces[id].name() == name.as_str())
                .ok_or_else(|| GameError::PresetPieceMissing {
                    index,
                    name: name.clone(),
                    slot,
                })?;
            roster.swap(slot, slot + found);
        }

        for (&at, &id) in squares.iter().zip(&roster) {
            self.board.place(&mut self.pieces, at, id);
        }
        *self.players[player].roster_mut() = roster;
        self.update_moves();

        info!(%player, preset = index, "preset applied");
        Ok(())
    }

    /// Apply a preset over the user's staging rows.
    pub fn apply_user_preset(&mut self, index: u32) -> Result<()> {
        let rows = self.config.staging[PlayerId::USER].clone();
        self.apply_preset(index, PlayerId::USER, &rows)
    }

    /// Apply a preset over the opponent's staging rows.
    pub fn apply_opponent_preset(&mut self, index: u32) -> Result<()> {
        let rows = self.config.staging[PlayerId::OPPONENT].clone();
        self.apply_preset(index, PlayerId::OPPONENT, &rows)
    }

    /// Set up the opponent's side.
    ///
    /// Uses the configured opponent preset, else a random preset. Without any
    /// presets the roster is scattered randomly over the staging rows.
    /// Returns the preset used.
    pub fn setup_opponent(&mut self) -> Result<Option<u32>> {
        let index = self
            .config
            .opponent_preset
            .or_else(|| self.rng.choose(&self.config.presets).map(|p| p.index));

        match index {
            Some(index) => self.apply_opponent_preset(index)?,
            None => {
                let roster = self.players[PlayerId::OPPONENT].roster().to_vec();
                self.board
                    .place_shuffled(&mut self.pieces, &mut self.rng, PlayerId::OPPONENT, &roster)?;
                self.update_moves();
                info!("opponent placed at random");
            }
        }
        Ok(index)
    }

    /// Manually place one of the user's pieces during setup.
    pub fn place_piece(&mut self, at: Coord, piece: PieceId) -> bool {
        if !self.players[PlayerId::USER].is_owner(piece) {
            return false;
        }
        if !self.board.add_piece(&mut self.pieces, at, piece) {
            return false;
        }
        self.update_moves();
        true
    }

    // === Play ===

    /// The game's outcome, judged by who still holds a flag.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        let user = self.players[PlayerId::USER].has_flag(&self.pieces);
        let opponent = self.players[PlayerId::OPPONENT].has_flag(&self.pieces);
        match (user, opponent) {
            (true, true) => None,
            (true, false) => Some(GameResult::Winner(PlayerId::USER)),
            (false, true) => Some(GameResult::Winner(PlayerId::OPPONENT)),
            (false, false) => Some(GameResult::Draw),
        }
    }

    /// Move (or attack with) one of the user's pieces.
    ///
    /// `Ok(None)` when the game is over, the piece is not the user's or not
    /// in play, or `dest` is not among its cached moves.
    pub fn commit_user_move(&mut self, piece: PieceId, dest: Coord) -> Result<Option<TurnRecord>> {
        if self.result().is_some() || !self.players[PlayerId::USER].is_owner(piece) {
            return Ok(None);
        }
        let mover = self.pieces.try_get(piece)?;
        let Some(from) = mover.coord() else {
            return Ok(None);
        };
        if mover.is_captured() || !mover.moves().contains(&dest) {
            return Ok(None);
        }

        self.commit(PlayerId::USER, piece, from, dest).map(Some)
    }

    /// Let the computer opponent make one move.
    ///
    /// `Ok(None)` when the game is over or it has nothing to move.
    pub fn opponent_turn(&mut self) -> Result<Option<TurnRecord>> {
        if self.result().is_some() {
            return Ok(None);
        }
        self.update_moves();

        let decision = {
            let ctx = DecisionContext::new(
                &self.pieces,
                &self.board,
                &self.players[PlayerId::OPPONENT],
                &self.players[PlayerId::USER],
            );
            self.opponent.decide(&ctx, &mut self.rng)
        };
        let Some(decision) = decision else {
            return Ok(None);
        };

        let planned = decision.planned;
        self.commit(PlayerId::OPPONENT, planned.piece, planned.from, planned.to)
            .map(Some)
    }

    /// The user's move followed by the opponent's reply.
    ///
    /// `Ok(None)` if the user's move was rejected. The opponent does not
    /// reply once the user's move has ended the game.
    pub fn play_turn(&mut self, piece: PieceId, dest: Coord) -> Result<Option<TurnReport>> {
        let Some(user_move) = self.commit_user_move(piece, dest)? else {
            return Ok(None);
        };

        let opponent_move = if self.result().is_none() {
            self.opponent_turn()?
        } else {
            None
        };
        let result = self.result();
        if let Some(result) = result {
            info!(?result, turns = self.history.len(), "game over");
        }

        Ok(Some(TurnReport {
            user_move,
            opponent_move,
            result,
        }))
    }

    /// Apply a validated move: attack if `to` is occupied, else relocate.
    fn commit(&mut self, player: PlayerId, piece: PieceId, from: Coord, to: Coord) -> Result<TurnRecord> {
        let combat = match self.board.is_occupied(&self.pieces, to) {
            Some(defender) => Some(self.pieces.attack(piece, defender)?),
            None => {
                self.pieces
                    .get_mut(piece)
                    .ok_or(GameError::UnknownPiece { piece: piece.0 })?
                    .move_to(to);
                None
            }
        };

        let record = TurnRecord {
            player,
            piece,
            from,
            to,
            combat,
            turn: self.history.len() as u32 + 1,
        };
        debug!(%player, %piece, %from, %to, ?combat, "move committed");

        self.history.push_back(record.clone());
        self.update_moves();
        Ok(record)
    }
}
