//! Player identity allocation.

use std::sync::atomic::{AtomicU64, Ordering};
use tictactoe_core::PlayerId;

/// Hands out player ids and answers whether an id was ever handed out.
///
/// Ids start at 0 and are never released, so an id exists exactly when it is
/// below the next id to allocate.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    next_id: AtomicU64,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh player id
    pub fn allocate(&self) -> PlayerId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn exists(&self, id: PlayerId) -> bool {
        id < self.next_id.load(Ordering::SeqCst)
    }

    /// Number of players allocated so far
    pub fn len(&self) -> usize {
        self.next_id.load(Ordering::SeqCst) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_is_sequential() {
        let players = PlayerRegistry::new();
        assert_eq!(players.allocate(), 0);
        assert_eq!(players.allocate(), 1);
        assert_eq!(players.allocate(), 2);
    }

    #[test]
    fn test_len_counts_allocations() {
        let players = PlayerRegistry::new();
        assert!(players.is_empty());
        assert_eq!(players.len(), 0);

        for _ in 0..3 {
            players.allocate();
        }
        assert_eq!(players.len(), 3);
        assert!(!players.is_empty());
    }

    #[test]
    fn test_exists() {
        let players = PlayerRegistry::new();
        assert!(!players.exists(0));

        let id = players.allocate();
        assert!(players.exists(id));
        assert!(!players.exists(id + 1));
        assert!(!players.exists(u64::MAX));
    }
}
