//! Error types for the HTTP layer.
//!
//! [`ApiError`] covers malformed requests, unknown resources, and rejected
//! moves, and converts into an HTTP response carrying a JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tictactoe_core::GameError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unparseable input, or an unknown player
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Rejected by the game engine
    #[error(transparent)]
    Game(#[from] GameError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Game(GameError::GameNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Game(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
