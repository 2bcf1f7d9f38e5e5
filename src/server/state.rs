// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the game session manager address and the shared score ledger.
//! Used to share state between HTTP/WebSocket handlers and the actor system.

use actix::Addr;
use crate::ledger::SharedLedger;
use crate::server::game_session::server::GameSessionManager;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the game session manager actor (creates and looks up games).
    pub game_session_manager: Addr<GameSessionManager>,
    /// Ledger holding finished runs and the leaderboard.
    pub ledger: SharedLedger,
}

impl AppState {
    /// Create a new AppState with the given actor address and ledger.
    pub fn new(
        game_session_manager: Addr<GameSessionManager>,
        ledger: SharedLedger,
    ) -> Self {
        AppState {
            game_session_manager,
            ledger,
        }
    }
}
