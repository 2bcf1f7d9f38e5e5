//! HTTP and WebSocket routing configuration.
//!
//! Defines the endpoints for creating games, playing them over WebSocket,
//! and reading the leaderboard.

use actix_web::web;
use crate::server::game_session::session::ws_game;
use crate::server::handlers::{create_game, get_leaderboard};

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/games")
            .route(web::post().to(create_game))
    )
    .service(
        web::resource("/ws/game/{game_id}")
            .to(ws_game)
    )
    .service(
        web::resource("/leaderboard")
            .route(web::get().to(get_leaderboard))
    );
}
