//! HTTP server and request handling.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/players` | Register a new player |
//! | `GET` | `/games` | List every game id |
//! | `POST` | `/games` | Create a game (`player_x`, `player_o`) |
//! | `GET` | `/games/{id}` | Board and status of one game |
//! | `POST` | `/games/{id}` | Submit a move (`player`, `move`) |

use crate::error::ApiError;
use crate::players::PlayerRegistry;
use crate::protocol::{
    field, parse_unsigned, CreateGameForm, GameCreated, GameInfo, GameList, MoveForm,
    PlayerCreated,
};
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tictactoe_core::{GameId, GameRegistry, PlayerId, Position};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Server state shared across all requests.
pub struct ServerState {
    /// Every game created since startup
    pub games: GameRegistry,
    /// Every player registered since startup
    pub players: PlayerRegistry,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            games: GameRegistry::new(),
            players: PlayerRegistry::new(),
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the router with all routes and request tracing.
pub fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/players", post(create_player))
        .route("/games", get(list_games).post(create_game))
        .route("/games/{id}", get(get_game).post(make_move))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until Ctrl-C.
pub async fn run_server(addr: SocketAddr, state: Arc<ServerState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Tic-tac-toe server listening on {}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn parse_game_id(raw: &str) -> Result<GameId, ApiError> {
    parse_unsigned(raw).ok_or_else(|| ApiError::bad_request("Invalid ID for game."))
}

/// Fall back to an all-missing form when the body is not a urlencoded form
fn form_or_default<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            debug!("Unreadable form body: {}", rejection);
            T::default()
        }
    }
}

async fn create_player(State(state): State<Arc<ServerState>>) -> Json<PlayerCreated> {
    let id = state.players.allocate();
    info!(player_id = id, "Player registered");
    Json(PlayerCreated { id })
}

async fn list_games(State(state): State<Arc<ServerState>>) -> Json<GameList> {
    Json(GameList {
        games: state.games.list_game_ids(),
    })
}

async fn create_game(
    State(state): State<Arc<ServerState>>,
    form: Result<Form<CreateGameForm>, FormRejection>,
) -> Result<Json<GameCreated>, ApiError> {
    let form = form_or_default(form);

    let (Some(x), Some(o)) = (field(&form.player_x), field(&form.player_o)) else {
        return Err(ApiError::bad_request(
            "One or more players have a missing ID.",
        ));
    };
    let player_x: PlayerId =
        parse_unsigned(x).ok_or_else(|| ApiError::bad_request("Invalid ID for player X."))?;
    let player_o: PlayerId =
        parse_unsigned(o).ok_or_else(|| ApiError::bad_request("Invalid ID for player O."))?;

    if !state.players.exists(player_x) || !state.players.exists(player_o) {
        warn!(player_x, player_o, "Game requested for unknown player");
        return Err(ApiError::bad_request("One or more players does not exist."));
    }

    let game_id = state.games.create_game(player_x, player_o);
    info!(game_id, player_x, player_o, "Game created");

    Ok(Json(GameCreated { game_id }))
}

async fn get_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<GameInfo>, ApiError> {
    let id = parse_game_id(&id)?;
    let game = state
        .games
        .get_game(id)
        .map_err(|_| ApiError::NotFound("Game does not exist.".into()))?;

    Ok(Json(GameInfo::from(&game)))
}

async fn make_move(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    form: Result<Form<MoveForm>, FormRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_game_id(&id)?;
    if state.games.get_game(id).is_err() {
        return Err(ApiError::NotFound("Game does not exist.".into()));
    }

    let form = form_or_default(form);
    let player = field(&form.player).ok_or_else(|| ApiError::bad_request("Missing player ID."))?;
    let move_index =
        field(&form.move_index).ok_or_else(|| ApiError::bad_request("Missing move."))?;

    let player: PlayerId =
        parse_unsigned(player).ok_or_else(|| ApiError::bad_request("Invalid player ID."))?;
    let pos = parse_unsigned::<u8>(move_index)
        .and_then(|index| Position::from_move_index(index).ok())
        .ok_or_else(|| ApiError::bad_request("Invalid move."))?;

    if !state.players.exists(player) {
        return Err(ApiError::bad_request("Player does not exist."));
    }

    match state.games.make_move(id, player, pos) {
        Ok(status) if status.is_terminal() => {
            info!(game_id = id, player, %status, "Game finished");
            Ok(StatusCode::OK)
        }
        Ok(status) => {
            info!(game_id = id, player, index = pos.move_index(), %status, "Move applied");
            Ok(StatusCode::OK)
        }
        Err(e) => {
            debug!(game_id = id, player, "Move rejected: {}", e);
            Err(e.into())
        }
    }
}
