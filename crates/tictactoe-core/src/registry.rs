//! Concurrent registry of live games.
//!
//! Games are stored in a sharded map. A move locks only the shard holding its
//! game, so moves against one game are serialized in the order they acquire
//! that lock while games in other shards proceed in parallel. Reads copy the
//! game out under a shard read lock and never observe a half-applied move.

use crate::board::Position;
use crate::game::{Game, GameError, GameId, GameStatus, PlayerId};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe store of every game created since startup.
///
/// Ids start at 0, increase by one per created game, and are never reused.
/// Games are never removed.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: DashMap<GameId, Game>,
    next_id: AtomicU64,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh game and return its id.
    ///
    /// Player identities are not checked here; callers validate them first.
    pub fn create_game(&self, player_x: PlayerId, player_o: PlayerId) -> GameId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.games.insert(id, Game::new(id, player_x, player_o));
        id
    }

    /// Ids of every game created so far, ascending
    pub fn list_game_ids(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self.games.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// A point-in-time copy of a game
    pub fn get_game(&self, id: GameId) -> Result<Game, GameError> {
        self.games
            .get(&id)
            .map(|game| game.value().clone())
            .ok_or(GameError::GameNotFound(id))
    }

    /// Apply a move to a stored game, returning its new status
    pub fn make_move(
        &self,
        id: GameId,
        player: PlayerId,
        pos: Position,
    ) -> Result<GameStatus, GameError> {
        let mut game = self.games.get_mut(&id).ok_or(GameError::GameNotFound(id))?;
        game.apply_move(player, pos)
    }

    /// Number of games created
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
