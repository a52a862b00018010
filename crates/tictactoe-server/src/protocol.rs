//! HTTP request and response bodies.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tictactoe_core::{Game, GameId, GameStatus, PlayerId};

/// Form fields for `POST /games`.
///
/// Fields are kept as raw strings so each missing or malformed value can be
/// reported with its own message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGameForm {
    pub player_x: Option<String>,
    pub player_o: Option<String>,
}

/// Form fields for `POST /games/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoveForm {
    pub player: Option<String>,
    /// Move index 0-8
    #[serde(rename = "move")]
    pub move_index: Option<String>,
}

/// Treat an absent field and an empty one the same way
pub fn field(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Parse an unsigned decimal number made of ASCII digits only; signs are rejected
pub fn parse_unsigned<T: FromStr>(raw: &str) -> Option<T> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Response to `POST /players`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCreated {
    pub id: PlayerId,
}

/// Response to `GET /games`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameList {
    pub games: Vec<GameId>,
}

/// Response to `POST /games`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCreated {
    pub game_id: GameId,
}

/// Response to `GET /games/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: GameId,
    pub player_x: PlayerId,
    pub player_o: PlayerId,
    /// Row-major cells, one of `-`, `x`, `o` each
    pub board: String,
    pub status: GameStatus,
}

impl From<&Game> for GameInfo {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id(),
            player_x: game.player_x(),
            player_o: game.player_o(),
            board: game.board().to_string(),
            status: game.status(),
        }
    }
}
