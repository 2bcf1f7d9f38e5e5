// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the main backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing and HTTP handlers
//! - Game session orchestration (one actor per game, one per connection)
//! - Anti-spam protection and error helpers

pub mod state;
pub mod router;
pub mod handlers;
pub mod game_session;
pub mod anti_spam;
pub mod ws_actor_utils;
pub mod ws_error;
