//! Core game state machine.
//!
//! This module contains the `Game` struct, its status, and the single-move
//! transition that enforces turn order and detects wins and draws.

use crate::board::{Board, Mark, Position, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Player identifier, allocated by the server's player registry
pub type PlayerId = u64;

/// Game identifier, allocated by the [`GameRegistry`](crate::GameRegistry)
pub type GameId = u64;

/// Number of moves that fill the board
const MAX_MOVES: u8 = (BOARD_SIZE * BOARD_SIZE) as u8;

/// Game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// X places the next mark
    #[serde(rename = "X_MOVE")]
    XToMove,
    /// O places the next mark
    #[serde(rename = "O_MOVE")]
    OToMove,
    #[serde(rename = "X_WIN")]
    XWon,
    #[serde(rename = "O_WIN")]
    OWon,
    /// Board filled with no line completed
    #[serde(rename = "DRAW")]
    Draw,
}

impl GameStatus {
    /// Whether the game is over
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::XWon | GameStatus::OWon | GameStatus::Draw)
    }

    /// The mark expected to move next, or `None` once the game is over
    pub fn to_move(self) -> Option<Mark> {
        match self {
            GameStatus::XToMove => Some(Mark::X),
            GameStatus::OToMove => Some(Mark::O),
            _ => None,
        }
    }

    /// Wire name of this status
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::XToMove => "X_MOVE",
            GameStatus::OToMove => "O_MOVE",
            GameStatus::XWon => "X_WIN",
            GameStatus::OWon => "O_WIN",
            GameStatus::Draw => "DRAW",
        }
    }

    fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::X => GameStatus::XWon,
            Mark::O => GameStatus::OWon,
        }
    }

    fn turn_of(mark: Mark) -> Self {
        match mark {
            Mark::X => GameStatus::XToMove,
            Mark::O => GameStatus::OToMove,
        }
    }

    /// Derive the status from board contents alone.
    ///
    /// X always moves first, so with no completed line it is X's turn exactly
    /// when both marks appear equally often.
    pub fn from_board(board: &Board) -> Self {
        if let Some(mark) = board.winner() {
            return GameStatus::won_by(mark);
        }
        if board.is_full() {
            return GameStatus::Draw;
        }
        if board.filled_count() % 2 == 0 {
            GameStatus::XToMove
        } else {
            GameStatus::OToMove
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when applying moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("That game does not exist.")]
    GameNotFound(GameId),

    #[error("That game has finished.")]
    GameOver,

    #[error("Player is not in this game.")]
    InvalidPlayer,

    #[error("It is not this player's turn.")]
    NotPlayerTurn,

    #[error("That square on the board is occupied.")]
    CellOccupied,

    #[error("That square is not on the board.")]
    InvalidPosition,
}

/// A single match between two players.
///
/// Serializable for output only; the only way to build one is [`Game::new`]
/// followed by [`Game::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    id: GameId,
    player_x: PlayerId,
    player_o: PlayerId,
    board: Board,
    /// Cached outcome of the board, kept in step by `apply_move`
    status: GameStatus,
    move_count: u8,
}

impl Game {
    /// Create a game with an empty board and X to move
    pub fn new(id: GameId, player_x: PlayerId, player_o: PlayerId) -> Self {
        Self {
            id,
            player_x,
            player_o,
            board: Board::new(),
            status: GameStatus::XToMove,
            move_count: 0,
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn player_x(&self) -> PlayerId {
        self.player_x
    }

    pub fn player_o(&self) -> PlayerId {
        self.player_o
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of marks placed so far (0-9)
    pub fn move_count(&self) -> u8 {
        self.move_count
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether `player` holds the seat for `mark`
    pub fn plays(&self, player: PlayerId, mark: Mark) -> bool {
        match mark {
            Mark::X => player == self.player_x,
            Mark::O => player == self.player_o,
        }
    }

    /// The player expected to move next, if the game is still running
    pub fn current_player(&self) -> Option<PlayerId> {
        self.status.to_move().map(|mark| self.player_for(mark))
    }

    /// The winning player, if any
    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::XWon => Some(self.player_x),
            GameStatus::OWon => Some(self.player_o),
            _ => None,
        }
    }

    fn player_for(&self, mark: Mark) -> PlayerId {
        match mark {
            Mark::X => self.player_x,
            Mark::O => self.player_o,
        }
    }

    /// Apply a move for `player` at `pos`.
    ///
    /// Preconditions are checked in a fixed order and each has its own error:
    /// the game must still be running, `player` must be seated in it, it must
    /// be their turn, and the target cell must be empty. Nothing is written
    /// unless every check passes. Returns the status after the move.
    pub fn apply_move(&mut self, player: PlayerId, pos: Position) -> Result<GameStatus, GameError> {
        let mark = self.status.to_move().ok_or(GameError::GameOver)?;

        if !self.plays(player, Mark::X) && !self.plays(player, Mark::O) {
            return Err(GameError::InvalidPlayer);
        }
        if !self.plays(player, mark) {
            return Err(GameError::NotPlayerTurn);
        }

        self.board.place(pos, mark)?;
        self.move_count += 1;
        self.status = self.outcome_after(pos, mark);

        Ok(self.status)
    }

    /// Status after `mark` was placed at `pos`; wins take precedence over a full board
    fn outcome_after(&self, pos: Position, mark: Mark) -> GameStatus {
        if self.board.completes_line(pos, mark) {
            GameStatus::won_by(mark)
        } else if self.move_count == MAX_MOVES {
            GameStatus::Draw
        } else {
            GameStatus::turn_of(mark.other())
        }
    }

    /// Open positions, empty once the game is over
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.is_finished() {
            return Vec::new();
        }
        self.board.empty_positions()
    }
}
