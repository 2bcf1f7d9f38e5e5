//! Main entry point for the backend server.
//!
//! Initializes the actor system, the score ledger and application state, and launches
//! the HTTP server with the game, WebSocket and leaderboard endpoints.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;
use server::game_session::server::GameSessionManager;

pub mod config;
mod game;
mod ledger;
mod server;


use config::server::{BIND_HOST, BIND_PORT};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    // Scores live in memory for the lifetime of the process.
    let ledger = ledger::shared(ledger::InMemoryLedger::new());

    // Start the GameSessionManager actor (creates and tracks all game sessions).
    let game_session_manager = GameSessionManager::new(ledger.clone()).start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(
        game_session_manager,
        ledger,
    ));

    info!("Listening on {}:{}", BIND_HOST, BIND_PORT);

    // Start the HTTP server with WebSocket endpoints.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .wrap(actix_web::middleware::Logger::default())
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((BIND_HOST, BIND_PORT))?
    .run()
    .await
}
