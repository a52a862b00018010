//! Tic-tac-toe game engine for a multi-game server
//!
//! This crate provides the core game logic, including:
//! - Board representation with cells, marks, and validated positions
//! - Game state machine with turn enforcement and win/draw detection
//! - A concurrent registry holding every live game
//!
//! # Architecture
//!
//! The engine has no I/O of its own. A server layer owns a [`GameRegistry`],
//! validates player identities, and calls into it from any number of threads.
//!
//! # Modules
//!
//! - [`board`]: Cells, marks, positions, and the 3x3 grid
//! - [`game`]: Per-game state machine
//! - [`registry`]: Thread-safe storage and id allocation for games

pub mod board;
pub mod game;
pub mod registry;

// Re-export commonly used types
pub use board::{Board, Cell, Mark, ParseBoardError, Position, BOARD_SIZE};
pub use game::{Game, GameError, GameId, GameStatus, PlayerId};
pub use registry::GameRegistry;
