//! Plain HTTP handlers: game creation and leaderboard.

use actix_web::{web, HttpResponse, http::StatusCode};
use log::warn;
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::config::server::{DEFAULT_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT};
use crate::game::state::GameState;
use crate::game::types::GameMode;
use crate::server::game_session::messages::GetState;
use crate::server::game_session::server::CreateGame;
use crate::server::state::AppState;
use crate::server::ws_error::http_error_response;

#[derive(Debug, Deserialize)]
pub struct CreateGameQuery {
    pub player: Option<String>,
    pub mode: Option<GameMode>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub game_id: Uuid,
    pub size: usize,
    pub state: GameState,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

/// `POST /games?player=<id>&mode=<mode>`
///
/// Creates a session for `player`; the best score shown to the player is
/// taken from the ledger.
pub async fn create_game(
    query: web::Query<CreateGameQuery>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let query = query.into_inner();
    let player_id = match query.player.map(|p| p.trim().to_string()) {
        Some(player) if !player.is_empty() => player,
        _ => {
            return http_error_response("MISSING_PLAYER", "Missing player id", None, StatusCode::BAD_REQUEST);
        }
    };
    let mode = query.mode.unwrap_or(GameMode::Classic);

    let best_score = data.ledger.read().await.best_score(&player_id).unwrap_or(0);

    let created = data.game_session_manager
        .send(CreateGame { player_id, mode, best_score })
        .await;
    let (game_id, session) = match created {
        Ok(created) => created,
        Err(e) => {
            warn!("[Http] Failed to create game: {}", e);
            return http_error_response("INTERNAL_ERROR", "Could not create game", None, StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match session.send(GetState).await {
        Ok(state) => HttpResponse::Ok().json(CreateGameResponse {
            game_id,
            size: mode.grid_size(),
            state,
        }),
        Err(e) => {
            warn!("[Http] Game {} unavailable after creation: {}", game_id, e);
            http_error_response(
                "INTERNAL_ERROR",
                "Could not read game state",
                Some(serde_json::json!({ "game_id": game_id })),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

/// `GET /leaderboard?limit=<n>`
pub async fn get_leaderboard(
    query: web::Query<LeaderboardQuery>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let limit = query.limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .min(MAX_LEADERBOARD_LIMIT);
    let board = data.ledger.read().await.leaderboard(limit);
    HttpResponse::Ok().json(board)
}
