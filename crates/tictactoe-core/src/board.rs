//! Game board representation.
//!
//! This module contains:
//! - Cell states and the marks players place
//! - Validated board positions
//! - The 3x3 grid with single-cell writes and line detection
//! - The flattened text form used on the wire

use crate::game::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width and height of the board
pub const BOARD_SIZE: usize = 3;

/// The token a player places on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The opposing mark
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// State of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// Character used in the flattened board string
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'x',
            Cell::O => 'o',
        }
    }

    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '-' => Some(Cell::Empty),
            'x' => Some(Cell::X),
            'o' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The mark occupying this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

/// A (row, column) pair that is always on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Create a position, rejecting coordinates outside `0..3`
    pub fn new(row: u8, col: u8) -> Result<Self, GameError> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Ok(Self { row, col })
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    /// Decode a move index in `0..9`.
    ///
    /// The index runs down each column first: `row = index % 3`, `col = index / 3`.
    pub fn from_move_index(index: u8) -> Result<Self, GameError> {
        if (index as usize) >= BOARD_SIZE * BOARD_SIZE {
            return Err(GameError::InvalidPosition);
        }
        Self::new(index % BOARD_SIZE as u8, index / BOARD_SIZE as u8)
    }

    /// Inverse of [`Position::from_move_index`]
    pub fn move_index(self) -> u8 {
        self.col * BOARD_SIZE as u8 + self.row
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Whether this position lies on the main diagonal
    pub fn on_main_diagonal(self) -> bool {
        self.row == self.col
    }

    /// Whether this position lies on the anti-diagonal
    pub fn on_anti_diagonal(self) -> bool {
        self.row as usize + self.col as usize == BOARD_SIZE - 1
    }

    /// All nine positions in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Position { row, col }))
    }
}

/// The eight lines that win the game
const LINES: [[(usize, usize); BOARD_SIZE]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// The 3x3 grid.
///
/// Cells only ever move from [`Cell::Empty`] to a mark; [`Board::place`] is the
/// single write path and refuses occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// Write a mark into an empty cell
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<(), GameError> {
        let cell = &mut self.cells[pos.row as usize][pos.col as usize];
        if !cell.is_empty() {
            return Err(GameError::CellOccupied);
        }
        *cell = mark.into();
        Ok(())
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| !c.is_empty())
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.filled_count() == BOARD_SIZE * BOARD_SIZE
    }

    /// Positions still open, in row-major order
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all().filter(|&p| self.get(p).is_empty()).collect()
    }

    /// Check whether `mark` holds a full line through `pos`.
    ///
    /// Only the row, the column, and any diagonal passing through `pos` are
    /// inspected. A line not passing through the last placed cell cannot have
    /// been completed by it.
    pub fn completes_line(&self, pos: Position, mark: Mark) -> bool {
        let target = Cell::from(mark);
        let (row, col) = (pos.row as usize, pos.col as usize);

        if (0..BOARD_SIZE).all(|c| self.cells[row][c] == target) {
            return true;
        }
        if (0..BOARD_SIZE).all(|r| self.cells[r][col] == target) {
            return true;
        }
        if pos.on_main_diagonal() && (0..BOARD_SIZE).all(|i| self.cells[i][i] == target) {
            return true;
        }
        pos.on_anti_diagonal()
            && (0..BOARD_SIZE).all(|i| self.cells[i][BOARD_SIZE - 1 - i] == target)
    }

    /// Scan every line for three equal marks
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().copied().find_map(|line| {
            let [a, b, c] = line.map(|(r, col)| self.cells[r][col]);
            if a == b && b == c {
                a.mark()
            } else {
                None
            }
        })
    }
}

impl fmt::Display for Board {
    /// Row-major, one character per cell: `-`, `x`, or `o`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.cells.iter().flatten() {
            write!(f, "{}", cell.symbol())?;
        }
        Ok(())
    }
}

/// Errors from parsing a flattened board string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("Board must have 9 cells, got {0}")]
    WrongLength(usize),

    #[error("Invalid cell character {0:?}")]
    InvalidCell(char),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != BOARD_SIZE * BOARD_SIZE {
            return Err(ParseBoardError::WrongLength(len));
        }

        let mut board = Board::new();
        for (i, c) in s.chars().enumerate() {
            let cell = Cell::from_symbol(c).ok_or(ParseBoardError::InvalidCell(c))?;
            board.cells[i / BOARD_SIZE][i % BOARD_SIZE] = cell;
        }
        Ok(board)
    }
}
