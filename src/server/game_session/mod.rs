//! Game session orchestration: one actor per game plus one per WebSocket connection.

pub mod messages;
pub mod server;
pub mod session;
